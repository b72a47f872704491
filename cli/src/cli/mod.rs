//! CLI module for tecli.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
