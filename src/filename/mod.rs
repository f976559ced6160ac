//! Filename tokenizer
//!
//! Every file in a set carries its record key at the start of its name:
//! `<total digits>-<check number>_`. What follows is either a check marker
//! (`check.pdf`) or an item list (`EOB_<name>_<cents>_<name>_<cents>_.pdf`).

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::types::*;
use crate::utils::split_prefix;

/// Anchored pattern a filename must match to belong to a set
pub const PREFIX_PATTERN: &str = r"^([0-9]+)-([0-9A-Za-z]+)_";

/// Marker at the start of an item-list remainder
pub const ITEM_MARKER: &str = "EOB";

/// Marker at the start of a check remainder
pub const CHECK_MARKER: &str = "check";

/// Length of the file extension, dot included (`.pdf`, `.csv`)
pub const EXTENSION_LEN: usize = 4;

fn prefix_regex() -> &'static Regex {
    static PREFIX_RE: OnceLock<Regex> = OnceLock::new();
    PREFIX_RE.get_or_init(|| Regex::new(PREFIX_PATTERN).expect("prefix pattern compiles"))
}

/// What a tokenized file contributes to its record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    /// The check document for the record
    Check,
    /// A list of name/amount pairs
    ItemList,
    /// Neither marker matched
    Unrecognized,
}

/// A filename split into its record key and its classified suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Record key, e.g. `10050-ABC1`
    pub prefix: String,
    /// Digits of the check total, e.g. `10050`
    pub total_digits: String,
    /// Check number, e.g. `ABC1`
    pub check_number: String,
    pub kind: FileKind,
    /// Marker-stripped, extension-stripped remainder (empty when unrecognized)
    pub suffix: String,
}

/// Returns the prefix key of `filename` when it belongs to a set
pub fn match_prefix(filename: &str) -> Option<&str> {
    prefix_regex()
        .find(filename)
        .map(|m| m.as_str().trim_end_matches('_'))
}

/// Tokenize one filename.
///
/// Returns `Ok(None)` for names outside the set grammar, which callers skip
/// silently. A name that matches but whose key cannot be split into exactly
/// two hyphen-separated fields is a fatal error.
pub fn tokenize(filename: &str) -> EobResult<Option<Token>> {
    let Some(matched) = prefix_regex().find(filename) else {
        debug!("skipping {filename}: no set prefix");
        return Ok(None);
    };

    let prefix = matched.as_str().trim_end_matches('_');
    let (total_digits, check_number) = split_prefix(prefix, filename)?;
    let (kind, suffix) = classify(&filename[matched.end()..]);

    debug!("{filename}: prefix={prefix} kind={kind:?} suffix={suffix:?}");

    Ok(Some(Token {
        prefix: prefix.to_string(),
        total_digits: total_digits.to_string(),
        check_number: check_number.to_string(),
        kind,
        suffix: suffix.to_string(),
    }))
}

/// Classify the part of a filename after its prefix and strip markers/extension
pub fn classify(remainder: &str) -> (FileKind, &str) {
    let end = remainder.len().saturating_sub(EXTENSION_LEN);

    if remainder.starts_with(ITEM_MARKER) {
        let start = ITEM_MARKER.len() + 1;
        let suffix = if start <= end {
            remainder.get(start..end).unwrap_or("")
        } else {
            ""
        };
        (FileKind::ItemList, suffix)
    } else if remainder.starts_with(CHECK_MARKER) {
        (FileKind::Check, remainder.get(..end).unwrap_or(""))
    } else {
        (FileKind::Unrecognized, "")
    }
}
