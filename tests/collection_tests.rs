//! Integration tests for the ordered vehicle collection

use vehicle_shell::{Coordinates, FuelType, ShellError, VehicleCollection, VehicleData, VehicleType};

fn data(name: &str, power: i32, wheels: i64) -> VehicleData {
    VehicleData::new(
        name,
        Coordinates::new(3, 4.5).unwrap(),
        power,
        wheels,
        Some(VehicleType::Car),
        FuelType::Kerosene,
    )
    .unwrap()
}

#[test]
fn test_iteration_is_ascending_regardless_of_insert_order() {
    let inputs = [
        ("delta", 300, 4),
        ("alpha", 100, 8),
        ("charlie", 100, 2),
        ("bravo", 200, 4),
        ("echo", 100, 2),
    ];

    let mut forward = VehicleCollection::new();
    for (name, power, wheels) in inputs {
        forward.add(data(name, power, wheels)).unwrap();
    }
    let mut backward = VehicleCollection::new();
    for (name, power, wheels) in inputs.iter().rev() {
        backward.add(data(name, *power, *wheels)).unwrap();
    }

    let forward_names: Vec<&str> = forward.iter().map(|v| v.name()).collect();
    let backward_names: Vec<&str> = backward.iter().map(|v| v.name()).collect();
    assert_eq!(forward_names, vec!["charlie", "echo", "alpha", "bravo", "delta"]);
    assert_eq!(forward_names, backward_names);

    let all: Vec<_> = forward.iter().collect();
    for pair in all.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_duplicate_key_does_not_grow_collection() {
    let mut collection = VehicleCollection::new();
    collection.add(data("bus", 100, 6)).unwrap();
    collection.add(data("tram", 100, 8)).unwrap();

    let result = collection.add(data("bus", 100, 6));
    assert!(matches!(result, Err(ShellError::Duplicate(_))));
    assert_eq!(collection.len(), 2);
}

#[test]
fn test_next_id_distinct_with_interleaved_removals() {
    let mut collection = VehicleCollection::new();
    let mut ids = Vec::new();
    for i in 0..10 {
        let id = collection.add(data(&format!("v{}", i), 10 + i, 4)).unwrap();
        ids.push(id);
        if i % 3 == 0 {
            collection.remove_by_id(id).unwrap();
        }
    }
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert_eq!(collection.len(), 6);
}

#[test]
fn test_min_max_follow_order_key() {
    let mut collection = VehicleCollection::new();
    assert!(collection.min().is_none());
    assert!(collection.max().is_none());

    collection.add(data("mid", 150, 4)).unwrap();
    collection.add(data("weak", 50, 4)).unwrap();
    collection.add(data("strong", 500, 4)).unwrap();

    assert_eq!(collection.min().unwrap().name(), "weak");
    assert_eq!(collection.max().unwrap().name(), "strong");
}

#[test]
fn test_filter_by_wheel_count_keeps_order() {
    let mut collection = VehicleCollection::new();
    collection.add(data("six", 10, 6)).unwrap();
    collection.add(data("four-b", 30, 4)).unwrap();
    collection.add(data("two", 5, 2)).unwrap();
    collection.add(data("four-a", 20, 4)).unwrap();

    let names: Vec<&str> = collection
        .filter_by_wheel_count(4)
        .into_iter()
        .map(|v| v.name())
        .collect();
    assert_eq!(names, vec!["four-a", "four-b"]);
    assert!(collection.filter_by_wheel_count(3).is_empty());
}

#[test]
fn test_ascending_wheel_counts_keeps_duplicates() {
    let mut collection = VehicleCollection::new();
    for (name, power, wheels) in [("a", 1, 6), ("b", 2, 4), ("c", 3, 2), ("d", 4, 4)] {
        collection.add(data(name, power, wheels)).unwrap();
    }
    assert_eq!(collection.ascending_wheel_counts(), vec![2, 4, 4, 6]);
}

#[test]
fn test_group_by_engine_power_counts() {
    let mut collection = VehicleCollection::new();
    collection.add(data("a", 100, 2)).unwrap();
    collection.add(data("b", 100, 4)).unwrap();
    collection.add(data("c", 200, 4)).unwrap();

    let groups = collection.group_by_engine_power();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[&100], 2);
    assert_eq!(groups[&200], 1);
}

#[test]
fn test_replace_missing_id() {
    let mut collection = VehicleCollection::new();
    let result = collection.replace(99, data("ghost", 1, 1));
    assert!(matches!(result, Err(ShellError::NotFound(99))));
}
