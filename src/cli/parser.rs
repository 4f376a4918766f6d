//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cadence: message chunking and humanized delivery pacing.
///
/// Splits long chat replies into message-sized chunks and paces their
/// delivery like a human typist.
#[derive(Parser, Debug)]
#[command(name = "cadence-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute and print the delivery plan for a message.
    ///
    /// Reads the message from the argument, `--file`, or stdin, and
    /// prints chunks with their pacing delays without sending anything.
    Analyze {
        /// The message text (reads --file or stdin if omitted).
        message: Option<String>,

        /// Read the message from a file instead.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path to a JSON delivery configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum chunk size in graphemes.
        #[arg(long)]
        max_size: Option<usize>,

        /// Delivery strategy (natural, efficient, formal).
        #[arg(short, long)]
        strategy: Option<String>,

        /// Plan the message as a single send, without chunking.
        #[arg(long)]
        no_chunking: bool,

        /// Split by sentences only, ignoring paragraph/list/code structure.
        #[arg(long)]
        plain: bool,

        /// Seed for the pacing jitter, for reproducible plans.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Deliver a message to stdout with live pacing.
    ///
    /// Plans the message, then prints each chunk after waiting out its
    /// delay, with typing-presence events in between.
    Dispatch {
        /// The message text (reads --file or stdin if omitted).
        message: Option<String>,

        /// Read the message from a file instead.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path to a JSON delivery configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum chunk size in graphemes.
        #[arg(long)]
        max_size: Option<usize>,

        /// Delivery strategy (natural, efficient, formal).
        #[arg(short, long)]
        strategy: Option<String>,

        /// Deliver the message as a single send, without chunking.
        #[arg(long)]
        no_chunking: bool,

        /// Split by sentences only, ignoring paragraph/list/code structure.
        #[arg(long)]
        plain: bool,

        /// Minimum delay between chunks in milliseconds.
        #[arg(long)]
        fixed_delay: Option<u64>,

        /// Suppress typing-presence events.
        #[arg(long)]
        no_typing: bool,

        /// Seed for the pacing jitter, for reproducible sequences.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full sequence immediately, without waiting.
        #[arg(long)]
        dry_run: bool,
    },

    /// List the available delivery strategies.
    Strategies,
}
