//! Traits for the filesystem collaborator

use crate::types::*;

/// Source of candidate filenames
///
/// The reconciliation core never opens files. It only needs the flat list of
/// names in one directory, so anything that can produce that list (a real
/// directory, a fixture in memory, an archive listing) can implement this.
pub trait FileSource {
    /// List the file names this source holds, in any order
    fn list_names(&self) -> EobResult<Vec<String>>;

    /// List the file names sorted, so aggregation order is reproducible
    fn sorted_names(&self) -> EobResult<Vec<String>> {
        let mut names = self.list_names()?;
        names.sort();
        Ok(names)
    }
}
