//! Error taxonomy for the format engine.
//!
//! Classification, field access and the write pass are total and never
//! produce one of these. Typed decode failures are not errors either: they
//! fall back to the kind's default value.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Can't find file: {}", path.display())]
    SourceNotFound { path: PathBuf },
    #[error("Can't set titles on a document that already holds {data_lines} untitled data line(s)")]
    SchemaConflict { data_lines: usize },
    #[error("Column '{column}' declares unsupported field type '{kind}'")]
    UnsupportedFieldType { column: String, kind: String },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid schema file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, FormatError>;
