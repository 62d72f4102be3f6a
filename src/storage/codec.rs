//! Line codec for the data file.
//!
//! One vehicle per line, fields joined by [`DELIMITER`]:
//! `id;name;x;y;creation_date;engine_power;number_of_wheels;type;fuel_type`.
//! Names can never contain the delimiter (see `validate_name`), so no
//! escaping is needed. An absent type is an empty field.

use crate::core::{Coordinates, Result, ShellError, Vehicle, VehicleData};
use chrono::NaiveDateTime;
use std::str::FromStr;

pub const DELIMITER: char = ';';
pub const FIELD_COUNT: usize = 9;
pub const HEADER_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn encode_vehicle(vehicle: &Vehicle) -> String {
    let vehicle_type = vehicle
        .vehicle_type()
        .map(|t| t.to_string())
        .unwrap_or_default();
    let coordinates = vehicle.coordinates();
    [
        vehicle.id().to_string(),
        vehicle.name().to_string(),
        coordinates.x.to_string(),
        coordinates.y.to_string(),
        vehicle.creation_date().format(CREATION_DATE_FORMAT).to_string(),
        vehicle.engine_power().to_string(),
        vehicle.number_of_wheels().to_string(),
        vehicle_type,
        vehicle.fuel_type().to_string(),
    ]
    .join(&DELIMITER.to_string())
}

pub fn decode_vehicle(line: &str) -> Result<Vehicle> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ShellError::Decode(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }

    let id: i64 = parse_field(fields[0], "id")?;
    let name = fields[1];
    let x: i64 = parse_field(fields[2], "coordinates.x")?;
    let y: f64 = parse_field(fields[3], "coordinates.y")?;
    let creation_date = NaiveDateTime::parse_from_str(fields[4], CREATION_DATE_FORMAT)
        .map_err(|e| ShellError::Decode(format!("creation_date '{}': {}", fields[4], e)))?;
    let engine_power: i32 = parse_field(fields[5], "engine_power")?;
    let number_of_wheels: i64 = parse_field(fields[6], "number_of_wheels")?;
    let vehicle_type = match fields[7] {
        "" => None,
        raw => Some(raw.parse()?),
    };
    let fuel_type = fields[8].parse()?;

    let data = VehicleData::new(
        name,
        Coordinates::new(x, y)?,
        engine_power,
        number_of_wheels,
        vehicle_type,
        fuel_type,
    )?;
    Vehicle::from_parts(id, creation_date, data)
}

fn parse_field<T: FromStr>(raw: &str, field: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ShellError::Decode(format!("{} '{}': {}", field, raw, e)))
}

pub fn encode_header(init_date: NaiveDateTime) -> String {
    init_date.format(HEADER_FORMAT).to_string()
}

/// `None` means the header is malformed; the caller decides the fallback.
pub fn decode_header(line: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(line.trim(), HEADER_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FuelType, VehicleType};
    use chrono::NaiveDate;

    fn sample(vehicle_type: Option<VehicleType>) -> Vehicle {
        let data = VehicleData::new(
            "Old Bus 12",
            Coordinates::new(-17, 3.25).unwrap(),
            150,
            6,
            vehicle_type,
            FuelType::Diesel,
        )
        .unwrap();
        let created = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(8, 5, 1, 250)
            .unwrap();
        Vehicle::from_parts(12, created, data).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let line = encode_vehicle(&sample(Some(VehicleType::Car)));
        assert_eq!(
            line,
            "12;Old Bus 12;-17;3.25;2024-03-09T08:05:01.250;150;6;CAR;DIESEL"
        );
    }

    fn assert_same_vehicle(decoded: &Vehicle, original: &Vehicle) {
        assert_eq!(decoded.id(), original.id());
        assert_eq!(decoded.creation_date(), original.creation_date());
        assert_eq!(decoded.data(), original.data());
    }

    #[test]
    fn test_round_trip_with_and_without_type() {
        for vehicle_type in [Some(VehicleType::Ship), None] {
            let original = sample(vehicle_type);
            let decoded = decode_vehicle(&encode_vehicle(&original)).unwrap();
            assert_same_vehicle(&decoded, &original);
        }
    }

    #[test]
    fn test_round_trip_keeps_current_timestamp() {
        let data = VehicleData::new(
            "now",
            Coordinates::new(1, 0.1).unwrap(),
            1,
            1,
            None,
            FuelType::Plasma,
        )
        .unwrap();
        let original = Vehicle::new(3, data).unwrap();
        let decoded = decode_vehicle(&encode_vehicle(&original)).unwrap();
        assert_same_vehicle(&decoded, &original);
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        let err = decode_vehicle("1;bus;0;0").unwrap_err();
        assert!(matches!(err, ShellError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_bad_number() {
        let err = decode_vehicle("1;bus;zero;0;2024-01-01T00:00:00;1;1;;DIESEL").unwrap_err();
        assert!(matches!(err, ShellError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_out_of_policy_field() {
        let err = decode_vehicle("1;bus;0;0;2024-01-01T00:00:00;-5;1;;DIESEL").unwrap_err();
        assert!(matches!(err, ShellError::Validation { field: "engine_power", .. }));

        let err = decode_vehicle("0;bus;0;0;2024-01-01T00:00:00;5;1;;DIESEL").unwrap_err();
        assert!(matches!(err, ShellError::Validation { field: "id", .. }));
    }

    #[test]
    fn test_header_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let header = encode_header(date);
        assert_eq!(header, "31.12.2023 23:59:58");
        assert_eq!(decode_header(&header), Some(date));
        assert_eq!(decode_header("yesterday"), None);
    }
}
