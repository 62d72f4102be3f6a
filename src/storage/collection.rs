use crate::core::vehicle::MAX_ID;
use crate::core::{Result, ShellError, Vehicle, VehicleData};
use chrono::{Local, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};

/// Monotonic id source owned by one collection.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the current value and advances the counter.
    ///
    /// Fails once every id up to [`MAX_ID`] has been handed out.
    pub fn next_id(&mut self) -> Result<i64> {
        if self.next > MAX_ID {
            return Err(ShellError::validation(
                "id",
                format!("no ids left, the last one ({}) is already taken", MAX_ID),
            ));
        }
        let id = self.next;
        self.next += 1;
        Ok(id)
    }

    /// Makes sure every future id is strictly greater than `id`.
    pub fn restore_from(&mut self, id: i64) {
        if self.next <= id {
            self.next = id.saturating_add(1);
        }
    }

    pub fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, duplicate-rejecting set of vehicles.
///
/// Iteration always follows the vehicle order key. A vehicle is a duplicate
/// when its order key equals a stored one or when its id is already taken;
/// duplicates are rejected with [`ShellError::Duplicate`] and the collection
/// is left untouched.
#[derive(Debug, Clone)]
pub struct VehicleCollection {
    vehicles: BTreeSet<Vehicle>,
    init_date: NaiveDateTime,
    ids: IdGenerator,
}

impl VehicleCollection {
    pub fn new() -> Self {
        Self::with_init_date(Local::now().naive_local())
    }

    pub fn with_init_date(init_date: NaiveDateTime) -> Self {
        Self {
            vehicles: BTreeSet::new(),
            init_date,
            ids: IdGenerator::new(),
        }
    }

    pub fn init_date(&self) -> NaiveDateTime {
        self.init_date
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn next_id(&mut self) -> Result<i64> {
        self.ids.next_id()
    }

    pub fn restore_counter_from(&mut self, id: i64) {
        self.ids.restore_from(id);
    }

    /// Id the next `add` will receive.
    pub fn peek_next_id(&self) -> i64 {
        self.ids.peek()
    }

    pub fn insert(&mut self, vehicle: Vehicle) -> Result<()> {
        if self.find_by_id(vehicle.id()).is_some() {
            return Err(ShellError::Duplicate(format!(
                "id {} is already in use",
                vehicle.id()
            )));
        }
        if let Some(existing) = self.vehicles.get(&vehicle) {
            return Err(ShellError::Duplicate(format!(
                "element equal to [{}] {} already exists",
                existing.id(),
                existing.name()
            )));
        }
        self.vehicles.insert(vehicle);
        Ok(())
    }

    /// Assigns a fresh id, stamps the creation date and inserts.
    ///
    /// The id is consumed even if the insert is rejected.
    pub fn add(&mut self, data: VehicleData) -> Result<i64> {
        let id = self.next_id()?;
        let vehicle = Vehicle::new(id, data)?;
        self.insert(vehicle)?;
        Ok(id)
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    pub fn remove_by_id(&mut self, id: i64) -> Result<Vehicle> {
        let target = self
            .find_by_id(id)
            .cloned()
            .ok_or(ShellError::NotFound(id))?;
        self.vehicles.remove(&target);
        Ok(target)
    }

    pub fn remove_matching<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Vehicle) -> bool,
    {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| !predicate(v));
        before - self.vehicles.len()
    }

    /// Swap the vehicle with `id` for one carrying `data`.
    ///
    /// The old vehicle keeps its id and creation date. Because the order key
    /// may change, the replacement is re-inserted instead of mutated in place.
    /// On any error the collection is unchanged.
    pub fn replace(&mut self, id: i64, data: VehicleData) -> Result<Vehicle> {
        let old = self.find_by_id(id).cloned().ok_or(ShellError::NotFound(id))?;
        let updated = old.with_data(data)?;

        if let Some(existing) = self.vehicles.get(&updated) {
            if existing.id() != id {
                return Err(ShellError::Duplicate(format!(
                    "element equal to [{}] {} already exists",
                    existing.id(),
                    existing.name()
                )));
            }
        }

        self.vehicles.remove(&old);
        self.vehicles.insert(updated.clone());
        Ok(updated)
    }

    pub fn clear(&mut self) {
        self.vehicles.clear();
    }

    pub fn max(&self) -> Option<&Vehicle> {
        self.vehicles.last()
    }

    pub fn min(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn group_by_engine_power(&self) -> BTreeMap<i32, usize> {
        let mut groups = BTreeMap::new();
        for vehicle in &self.vehicles {
            *groups.entry(vehicle.engine_power()).or_insert(0) += 1;
        }
        groups
    }

    pub fn filter_by_wheel_count(&self, wheels: i64) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.number_of_wheels() == wheels)
            .collect()
    }

    pub fn ascending_wheel_counts(&self) -> Vec<i64> {
        let mut counts: Vec<i64> = self.vehicles.iter().map(|v| v.number_of_wheels()).collect();
        counts.sort_unstable();
        counts
    }
}

impl Default for VehicleCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a VehicleCollection {
    type Item = &'a Vehicle;
    type IntoIter = std::collections::btree_set::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinates, FuelType};

    fn data(name: &str, power: i32, wheels: i64) -> VehicleData {
        VehicleData::new(
            name,
            Coordinates::new(0, 0.0).unwrap(),
            power,
            wheels,
            None,
            FuelType::Diesel,
        )
        .unwrap()
    }

    #[test]
    fn test_id_generator_is_monotonic() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id().unwrap(), 1);
        assert_eq!(ids.next_id().unwrap(), 2);
        ids.restore_from(10);
        assert_eq!(ids.next_id().unwrap(), 11);
        ids.restore_from(3);
        assert_eq!(ids.next_id().unwrap(), 12);
    }

    #[test]
    fn test_id_generator_stops_at_max_id() {
        let mut ids = IdGenerator::new();
        ids.restore_from(MAX_ID - 1);
        assert_eq!(ids.next_id().unwrap(), MAX_ID);
        assert!(matches!(ids.next_id(), Err(ShellError::Validation { field: "id", .. })));

        ids.restore_from(i64::MAX);
        assert!(ids.next_id().is_err());
    }

    #[test]
    fn test_add_after_last_id_is_rejected() {
        let mut collection = VehicleCollection::new();
        collection
            .insert(Vehicle::new(MAX_ID, data("last", 10, 4)).unwrap())
            .unwrap();
        collection.restore_counter_from(MAX_ID);

        assert!(collection.add(data("next", 20, 4)).is_err());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let mut collection = VehicleCollection::new();
        collection.add(data("bus", 100, 4)).unwrap();
        let err = collection.add(data("bus", 100, 4)).unwrap_err();
        assert!(matches!(err, ShellError::Duplicate(_)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut collection = VehicleCollection::new();
        collection.insert(Vehicle::new(5, data("bus", 100, 4)).unwrap()).unwrap();
        let err = collection
            .insert(Vehicle::new(5, data("tram", 200, 8)).unwrap())
            .unwrap_err();
        assert!(matches!(err, ShellError::Duplicate(_)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_ids_survive_removal() {
        let mut collection = VehicleCollection::new();
        let first = collection.add(data("a", 1, 1)).unwrap();
        collection.remove_by_id(first).unwrap();
        let second = collection.add(data("b", 1, 1)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_remove_by_id_missing() {
        let mut collection = VehicleCollection::new();
        assert!(matches!(collection.remove_by_id(42), Err(ShellError::NotFound(42))));
    }

    #[test]
    fn test_replace_reorders() {
        let mut collection = VehicleCollection::new();
        let low = collection.add(data("low", 10, 4)).unwrap();
        collection.add(data("mid", 50, 4)).unwrap();

        collection.replace(low, data("low", 90, 4)).unwrap();

        let names: Vec<&str> = collection.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["mid", "low"]);
        assert_eq!(collection.max().unwrap().id(), low);
    }

    #[test]
    fn test_replace_collision_leaves_collection_untouched() {
        let mut collection = VehicleCollection::new();
        let a = collection.add(data("a", 10, 4)).unwrap();
        collection.add(data("b", 20, 4)).unwrap();

        let err = collection.replace(a, data("b", 20, 4)).unwrap_err();
        assert!(matches!(err, ShellError::Duplicate(_)));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.find_by_id(a).unwrap().engine_power(), 10);
    }

    #[test]
    fn test_replace_with_same_key_is_allowed() {
        let mut collection = VehicleCollection::new();
        let a = collection.add(data("a", 10, 4)).unwrap();
        collection.replace(a, data("a", 10, 4)).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove_matching_counts() {
        let mut collection = VehicleCollection::new();
        for power in [10, 20, 30, 40] {
            collection.add(data("v", power, 4)).unwrap();
        }
        assert_eq!(collection.remove_matching(|v| v.engine_power() < 25), 2);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut collection = VehicleCollection::new();
        collection.add(data("a", 1, 1)).unwrap();
        collection.add(data("b", 1, 1)).unwrap();
        collection.clear();
        assert!(collection.is_empty());
        assert_eq!(collection.add(data("c", 1, 1)).unwrap(), 3);
    }

    #[test]
    fn test_projections() {
        let mut collection = VehicleCollection::new();
        collection.add(data("a", 100, 6)).unwrap();
        collection.add(data("b", 100, 2)).unwrap();
        collection.add(data("c", 200, 4)).unwrap();

        let groups = collection.group_by_engine_power();
        assert_eq!(groups.get(&100), Some(&2));
        assert_eq!(groups.get(&200), Some(&1));
        assert_eq!(groups.len(), 2);

        assert_eq!(collection.ascending_wheel_counts(), vec![2, 4, 6]);
    }

    #[test]
    fn test_iteration_reflects_current_state() {
        let mut collection = VehicleCollection::new();
        collection.add(data("a", 1, 1)).unwrap();
        assert_eq!(collection.iter().count(), 1);
        collection.add(data("b", 2, 1)).unwrap();
        assert_eq!(collection.iter().count(), 2);
    }
}
