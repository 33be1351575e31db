//! Command-line interface module.

mod args;
pub mod build;
pub mod shim;

pub use args::{BuildArgs, Cli, Commands};
