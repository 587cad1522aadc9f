//! Reading, normalizing and writing line-oriented, tab-delimited text data
//! files: title lines marked with `!`, `//` comments, and data lines that
//! are realigned to the title columns on save.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod format_cmd;
pub mod line;
pub mod mapping;
pub mod merge;
pub mod merge_cmd;
pub mod preview;
pub mod record;
pub mod schema_cmd;
pub mod store;
pub mod table;

pub use document::Document;
pub use error::{FormatError, Result};
pub use line::{ClassifiedLine, LineKind, classify};
pub use mapping::{Binding, FieldKind, FieldSpec, FieldValue, TypedRecord, TypedRow};
pub use merge::MergeSummary;
pub use record::{ColumnList, Record, RecordId};
pub use store::{FileStore, LineStore, MemoryStore};
pub use table::{Row, Table};

use std::{env, sync::OnceLock};

use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("teabox_data", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Format(args) => format_cmd::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Columns(args) => preview::list_columns(&args),
        Commands::Init(args) => schema_cmd::init(&args),
        Commands::Check(args) => schema_cmd::check(&args),
        Commands::Merge(args) => merge_cmd::execute(&args),
    }
}
