//! Flat directory file source

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::*;
use crate::types::*;

/// Lists the regular file names directly inside one directory (no recursion)
#[derive(Debug, Clone)]
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    /// Create a source for the given directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory being listed
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, err: std::io::Error) -> EobError {
        EobError::DirectoryRead {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl FileSource for DirectorySource {
    fn list_names(&self) -> EobResult<Vec<String>> {
        let entries = fs::read_dir(&self.path).map_err(|e| self.read_error(e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.read_error(e))?;
            if entry.file_type().map_err(|e| self.read_error(e))?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("skipping non-UTF-8 file name {:?}", raw),
            }
        }

        Ok(names)
    }
}
