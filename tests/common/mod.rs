#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `lines` under the workspace, one per line, and returns the path.
    pub fn write_lines(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.file(name);
        let mut file = File::create(&path).expect("create temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write temp file line");
        }
        path
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    pub fn read_lines(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.file(name))
            .expect("read temp file")
            .lines()
            .map(str::to_string)
            .collect()
    }
}
