//! wit-dart CLI library
//!
//! Exposes the argument parser and the commands for programmatic use and
//! testing.

pub mod args;
pub mod commands;
pub mod error;
pub mod logging;

pub use args::{parse_args, serialize_args, ArgsError, CliArgs};
pub use error::CliError;
