//! CLI layer for cadence.
//!
//! Provides the command-line interface using clap, with commands for
//! planning, delivering, and inspecting paced message delivery.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
