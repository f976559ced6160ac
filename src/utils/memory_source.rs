//! In-memory file source for testing

use crate::traits::*;
use crate::types::*;

/// In-memory list of filenames, for tests and callers that already hold names
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    names: Vec<String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filename
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Number of names held
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are held
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MemorySource {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileSource for MemorySource {
    fn list_names(&self) -> EobResult<Vec<String>> {
        Ok(self.names.clone())
    }
}
