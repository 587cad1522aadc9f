use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Read, normalize and merge tab-delimited text data files",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite a file with data lines realigned to its title line
    Format(FormatArgs),
    /// Show the first data lines of a file in a formatted table
    Preview(PreviewArgs),
    /// List the canonical columns of a file
    Columns(ColumnsArgs),
    /// Impose the columns of a schema file on a data file
    Init(InitArgs),
    /// Report values that do not parse as their schema kind
    Check(CheckArgs),
    /// Upsert the data lines of one file into another by key column
    Merge(MergeArgs),
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Input data file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file (defaults to rewriting the input in place)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Print a diff of pending changes instead of writing; fails if any exist
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input data file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of data lines to display
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
    /// Emit rows as JSON objects keyed by column name
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Input data file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// YAML schema listing the columns to impose
    #[arg(short = 's', long = "schema")]
    pub schema: PathBuf,
    /// Data file to initialize (created when missing)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// YAML schema describing column kinds
    #[arg(short = 's', long = "schema")]
    pub schema: PathBuf,
    /// Data file to check
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Target data file that receives the merged lines
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Source data file whose data lines are merged in
    #[arg(long = "from")]
    pub from: PathBuf,
    /// Column whose value identifies a line
    #[arg(short = 'k', long = "key")]
    pub key: String,
    /// Output file (defaults to rewriting the target in place)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
