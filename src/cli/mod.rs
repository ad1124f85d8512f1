pub mod args;
pub mod commands;
pub mod report;

pub use args::{Cli, Commands, Verbosity};
