pub mod codec;
pub mod collection;
pub mod persistence;

pub use collection::{IdGenerator, VehicleCollection};
pub use persistence::{DataFile, read_collection, write_collection};
