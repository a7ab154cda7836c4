//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::record::{InputPatch, RecordId, RecordInput};

/// Student form fields.
///
/// Values are taken as raw text; `--age` and `--marks` are checked during
/// validation, not by the argument parser, so every problem is reported at once.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Student name
    #[arg(long)]
    pub name: Option<String>,

    /// Registration number
    #[arg(long)]
    pub reg_no: Option<String>,

    /// Department
    #[arg(long)]
    pub dept: Option<String>,

    /// Age in years (integer greater than 0)
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Gender (Female, Male, Non-binary, Other, Prefer not to say)
    #[arg(long)]
    pub gender: Option<String>,

    /// Internal marks (0 - 100)
    #[arg(long, allow_hyphen_values = true)]
    pub marks: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,
}

impl FieldArgs {
    /// Build a complete form, leaving unspecified fields blank.
    #[must_use]
    pub fn into_input(self) -> RecordInput {
        RecordInput::default().merged(self.into())
    }
}

impl From<FieldArgs> for InputPatch {
    fn from(args: FieldArgs) -> Self {
        Self {
            name: args.name,
            reg_no: args.reg_no,
            dept: args.dept,
            age: args.age,
            gender: args.gender,
            marks: args.marks,
            dob: args.dob,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Record id
    pub id: RecordId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Record fields
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Output the created record as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Record id
    pub id: RecordId,

    /// Fields to change; the rest keep their current values
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Output the updated record as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Record id
    pub id: RecordId,
}

/// Validate command arguments.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Record fields to check
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Output field errors as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
