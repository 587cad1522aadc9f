//! Backing stores a [`Document`](crate::document::Document) reads from and
//! saves to.
//!
//! A store only ever sees whole-file operations: one read of every line and
//! one full replacement on write.

use std::{
    cell::RefCell,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::debug;

use crate::error::{FormatError, Result};

pub trait LineStore {
    fn read_all_lines(&self) -> Result<Vec<String>>;
    fn write_all_lines(&mut self, lines: &[String]) -> Result<()>;
}

/// A line-oriented text file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    create_if_missing: bool,
}

impl FileStore {
    /// A store whose file must already exist when read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            create_if_missing: false,
        }
    }

    /// A store that reads a missing file as empty; saving creates it.
    pub fn create_if_missing(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            create_if_missing: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileStore {
    fn read_all_lines(&self) -> Result<Vec<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if self.create_if_missing {
                    debug!("{:?} is missing, starting empty", self.path);
                    return Ok(Vec::new());
                }
                return Err(FormatError::SourceNotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                return Err(FormatError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let lines = split_lines(&contents);
        debug!("Read {} line(s) from {:?}", lines.len(), self.path);
        Ok(lines)
    }

    fn write_all_lines(&mut self, lines: &[String]) -> Result<()> {
        let io_error = |source| FormatError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = io::BufWriter::new(fs::File::create(&self.path).map_err(io_error)?);
        for line in lines {
            writeln!(file, "{line}").map_err(io_error)?;
        }
        file.flush().map_err(io_error)?;
        debug!("Wrote {} line(s) to {:?}", lines.len(), self.path);
        Ok(())
    }
}

/// Splits file contents the way a "read all lines" call does: `\n` or
/// `\r\n` terminators, and no phantom empty line after a final terminator.
fn split_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.to_string())
        .collect()
}

/// In-memory store. Clones share one buffer, so a caller can keep a handle and
/// inspect what a document saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryStore {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LineStore for MemoryStore {
    fn read_all_lines(&self) -> Result<Vec<String>> {
        Ok(self.lines())
    }

    fn write_all_lines(&mut self, lines: &[String]) -> Result<()> {
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }
}
