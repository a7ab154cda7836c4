//! Command-line interface for rollbook.
//!
//! This module provides the CLI structure for the `rollbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, FieldArgs, ListCommand, ResetCommand,
    ShowCommand, StatusCommand, ValidateCommand,
};

/// rollbook - Keep a small list of student records
///
/// Create, update and delete student details. Records are kept in a local
/// key-value store and a two-record sample is provided on first run.
#[derive(Debug, Parser)]
#[command(name = "rollbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all records in order
    List(ListCommand),

    /// Show one record
    Show(ShowCommand),

    /// Create a record
    Add(AddCommand),

    /// Update a record; unspecified fields keep their values
    Edit(EditCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Check record fields without saving anything
    Validate(ValidateCommand),

    /// Show storage status
    Status(StatusCommand),

    /// Discard all records and restore the sample data
    Reset(ResetCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
