use super::source::LineSource;
use crate::core::types::{MAX_X, MIN_Y_EXCLUSIVE};
use crate::core::vehicle::{validate_engine_power, validate_name, validate_number_of_wheels};
use crate::core::{Coordinates, FuelType, Result, ShellError, VehicleData, VehicleType};
use std::io::Write;
use std::str::FromStr;

/// Read a complete [`VehicleData`] from `source`, one field per line.
///
/// A line that does not parse or does not validate is reported to `out` and
/// the same field is asked again. Running out of input aborts with an
/// [`ShellError::Io`] error; nothing is defaulted.
pub fn read_vehicle_data<W: Write>(source: &mut dyn LineSource, out: &mut W) -> Result<VehicleData> {
    let name = ask(source, out, "Enter name:", |s| {
        validate_name(s)?;
        Ok(s.to_string())
    })?;

    let x = ask(
        source,
        out,
        &format!("Enter coordinate x (integer, at most {}):", MAX_X),
        |s| {
            let x = parse_number::<i64>(s, "coordinates.x", "an integer")?;
            Coordinates::validate_x(x)?;
            Ok(x)
        },
    )?;

    let y = ask(
        source,
        out,
        &format!("Enter coordinate y (number, greater than {}):", MIN_Y_EXCLUSIVE),
        |s| {
            let y = parse_number::<f64>(s, "coordinates.y", "a number")?;
            Coordinates::validate_y(y)?;
            Ok(y)
        },
    )?;

    let engine_power = ask(source, out, "Enter engine power (integer greater than 0):", |s| {
        let power = parse_number::<i32>(s, "engine_power", "an integer")?;
        validate_engine_power(power)?;
        Ok(power)
    })?;

    let number_of_wheels = ask(
        source,
        out,
        "Enter number of wheels (integer greater than 0):",
        |s| {
            let wheels = parse_number::<i64>(s, "number_of_wheels", "an integer")?;
            validate_number_of_wheels(wheels)?;
            Ok(wheels)
        },
    )?;

    let vehicle_type = ask(
        source,
        out,
        &format!(
            "Enter type ({}), or an empty line for none:",
            VehicleType::variants_hint()
        ),
        |s| {
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<VehicleType>().map(Some)
            }
        },
    )?;

    let fuel_type = ask(
        source,
        out,
        &format!("Enter fuel type ({}):", FuelType::variants_hint()),
        |s| s.parse::<FuelType>(),
    )?;

    VehicleData::new(
        name,
        Coordinates::new(x, y)?,
        engine_power,
        number_of_wheels,
        vehicle_type,
        fuel_type,
    )
}

fn ask<T, W, F>(source: &mut dyn LineSource, out: &mut W, prompt: &str, parse: F) -> Result<T>
where
    W: Write,
    F: Fn(&str) -> Result<T>,
{
    loop {
        if source.is_interactive() {
            writeln!(out, "{}", prompt)?;
            out.flush()?;
        }

        let line = source.next_line()?.ok_or_else(|| {
            ShellError::Io(format!(
                "input from {} ended while reading a vehicle",
                source.name()
            ))
        })?;

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => {
                writeln!(out, "{}", err)?;
            }
        }
    }
}

fn parse_number<T: FromStr>(raw: &str, field: &'static str, expected: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| ShellError::validation(field, format!("expected {}, got '{}'", expected, raw)))
}
