pub mod command;
pub mod interpreter;
pub mod prompt;
pub mod source;

pub use command::Command;
pub use interpreter::{CommandInterpreter, Flow};
pub use source::{LineSource, ReaderSource};
