//! Validation utilities for prefix keys

use crate::types::*;

/// Split a prefix key into its (total digits, check number) fields.
///
/// The key must contain exactly two non-empty hyphen-separated fields.
pub fn split_prefix<'a>(prefix: &'a str, filename: &str) -> EobResult<(&'a str, &'a str)> {
    let fields: Vec<&str> = prefix.split('-').collect();

    match fields.as_slice() {
        [total, number] if !total.is_empty() => Ok((*total, *number)),
        _ => Err(EobError::MalformedPrefix {
            filename: filename.to_string(),
            prefix: prefix.to_string(),
        }),
    }
}
