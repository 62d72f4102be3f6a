pub mod error;
pub mod types;
pub mod vehicle;

pub use error::{Result, ShellError};
pub use types::{Coordinates, FuelType, VehicleType};
pub use vehicle::{Vehicle, VehicleData};
