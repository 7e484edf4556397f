//! Command-line interface for symdoc.
//!
//! Argument parsing lives in [`args`]; each subcommand is implemented in
//! [`commands`].

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, InputArgs};
