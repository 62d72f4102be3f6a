use super::{Coordinates, FuelType, Result, ShellError, VehicleType};
use chrono::{Local, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

/// Characters reserved by the line codec; names may not contain them.
pub const RESERVED_NAME_CHARS: &[char] = &[';'];

/// Largest id a vehicle may carry; the id counter must always be able to
/// move past a stored id.
pub const MAX_ID: i64 = i64::MAX - 1;

/// User-editable part of a vehicle.
///
/// Everything that takes part in the order key lives here, so a candidate
/// for `add_if_max`, `add_if_min` or `remove_lower` can be compared against
/// the collection without allocating an id for it.
#[derive(Debug, Clone)]
pub struct VehicleData {
    pub name: String,
    pub coordinates: Coordinates,
    pub engine_power: i32,
    pub number_of_wheels: i64,
    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: FuelType,
}

impl VehicleData {
    pub fn new(
        name: impl Into<String>,
        coordinates: Coordinates,
        engine_power: i32,
        number_of_wheels: i64,
        vehicle_type: Option<VehicleType>,
        fuel_type: FuelType,
    ) -> Result<Self> {
        let data = Self {
            name: name.into(),
            coordinates,
            engine_power,
            number_of_wheels,
            vehicle_type,
            fuel_type,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        self.coordinates.validate()?;
        validate_engine_power(self.engine_power)?;
        validate_number_of_wheels(self.number_of_wheels)?;
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ShellError::validation("name", "must not be empty"));
    }
    if name.trim() != name {
        return Err(ShellError::validation("name", "must not start or end with whitespace"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || RESERVED_NAME_CHARS.contains(c))
    {
        return Err(ShellError::validation(
            "name",
            format!("must not contain {:?}", c),
        ));
    }
    Ok(())
}

pub fn validate_engine_power(engine_power: i32) -> Result<()> {
    if engine_power <= 0 {
        return Err(ShellError::validation(
            "engine_power",
            format!("must be greater than 0, got {}", engine_power),
        ));
    }
    Ok(())
}

pub fn validate_number_of_wheels(number_of_wheels: i64) -> Result<()> {
    if number_of_wheels <= 0 {
        return Err(ShellError::validation(
            "number_of_wheels",
            format!("must be greater than 0, got {}", number_of_wheels),
        ));
    }
    Ok(())
}

pub fn validate_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(ShellError::validation(
            "id",
            format!("must be greater than 0, got {}", id),
        ));
    }
    if id > MAX_ID {
        return Err(ShellError::validation(
            "id",
            format!("must not exceed {}, got {}", MAX_ID, id),
        ));
    }
    Ok(())
}

impl PartialEq for VehicleData {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VehicleData {}

impl PartialOrd for VehicleData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VehicleData {
    /// Order key: engine power, wheels, name, coordinates, fuel, type.
    fn cmp(&self, other: &Self) -> Ordering {
        self.engine_power
            .cmp(&other.engine_power)
            .then_with(|| self.number_of_wheels.cmp(&other.number_of_wheels))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.coordinates.cmp(&other.coordinates))
            .then_with(|| self.fuel_type.cmp(&other.fuel_type))
            .then_with(|| self.vehicle_type.cmp(&other.vehicle_type))
    }
}

/// A stored record: validated data plus store-assigned identity.
///
/// Ordering and equality look only at [`VehicleData`]; two vehicles that
/// differ just by id or creation date are duplicates of each other.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: i64,
    creation_date: NaiveDateTime,
    data: VehicleData,
}

impl Vehicle {
    /// Build a fresh vehicle stamped with the current local time.
    pub fn new(id: i64, data: VehicleData) -> Result<Self> {
        Self::from_parts(id, Local::now().naive_local(), data)
    }

    /// Rebuild a vehicle whose identity already exists (decoding, updates).
    pub fn from_parts(id: i64, creation_date: NaiveDateTime, data: VehicleData) -> Result<Self> {
        validate_id(id)?;
        data.validate()?;
        Ok(Self {
            id,
            creation_date,
            data,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn creation_date(&self) -> NaiveDateTime {
        self.creation_date
    }

    pub fn data(&self) -> &VehicleData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.data.coordinates
    }

    pub fn engine_power(&self) -> i32 {
        self.data.engine_power
    }

    pub fn number_of_wheels(&self) -> i64 {
        self.data.number_of_wheels
    }

    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.data.vehicle_type
    }

    pub fn fuel_type(&self) -> FuelType {
        self.data.fuel_type
    }

    /// Same identity, new data. Used by `update`.
    pub fn with_data(&self, data: VehicleData) -> Result<Self> {
        Self::from_parts(self.id, self.creation_date, data)
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Vehicle {}

impl PartialOrd for Vehicle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vehicle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data.cmp(&other.data)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vehicle_type = self
            .data
            .vehicle_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "[{}] {}: coordinates={}, created={}, engine_power={}, wheels={}, type={}, fuel={}",
            self.id,
            self.data.name,
            self.data.coordinates,
            self.creation_date.format("%Y-%m-%d %H:%M:%S"),
            self.data.engine_power,
            self.data.number_of_wheels,
            vehicle_type,
            self.data.fuel_type
        )
    }
}
