//! File sink implementation

use crate::core::{Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file, creating it if needed
///
/// Each record is written with a single `write_all`, so lines from separate
/// handlers sharing one path never interleave mid-line on platforms with
/// atomic appends.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
    name: String,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let name = format!("file:{}", path.display());

        Ok(Self { file, path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_record(&mut self, line: &[u8]) -> io::Result<()> {
        self.file.write_all(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
