//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use signalsync_core::PayloadOperation;

#[derive(Debug, Parser)]
#[command(
    name = "signalsync",
    version,
    about = "Build monitoring service request bodies from declarative resource files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a dashboard payload.
    Dashboard(ResourceArgs),
    /// Build an alerting integration payload.
    Integration(ResourceArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ResourceArgs {
    /// Resource file (JSON).
    pub file: PathBuf,

    /// Lifecycle call the payload is for.
    #[arg(long, value_enum, default_value_t = Operation::Create)]
    pub operation: Operation,

    /// Write the payload here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only run acceptance checks; write nothing.
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Create,
    Update,
}

impl From<Operation> for PayloadOperation {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Create => PayloadOperation::Create,
            Operation::Update => PayloadOperation::Update,
        }
    }
}
