// ============================================================================
// Vehicle Shell Library
// ============================================================================

pub mod core;
pub mod storage;
pub mod cli;
pub mod config;

// Re-export main types for convenience
pub use self::core::{Result, ShellError, Vehicle, VehicleData, Coordinates, VehicleType, FuelType};
pub use storage::{DataFile, VehicleCollection};
pub use cli::{CommandInterpreter, Flow, LineSource, ReaderSource};
pub use config::ShellConfig;
