//! Core types and data structures for EOB reconciliation

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single payment line parsed out of an item-list filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Free-text name token (usually the patient or payee)
    pub name: String,
    /// Amount paid for this line
    pub paid: BigDecimal,
}

impl Item {
    /// Create a new item
    pub fn new(name: impl Into<String>, paid: BigDecimal) -> Self {
        Self {
            name: name.into(),
            paid,
        }
    }
}

/// One logical reconciliation unit, shared by every file with the same prefix key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eob {
    /// Authoritative expected total, taken from the prefix digits
    pub check_total: BigDecimal,
    /// Check number, taken verbatim from the prefix
    pub check_number: String,
    /// Full name of the check document, empty until one is seen
    pub check_file: String,
    /// Payment lines in file-processing order
    pub items: Vec<Item>,
    /// Check files that were replaced by a later check file for the same key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replaced_check_files: Vec<String>,
    /// Files whose suffix is neither an item list nor a check
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecognized_files: Vec<String>,
    /// Trailing name tokens that had no amount, as (file, name)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpaired_names: Vec<(String, String)>,
}

impl Eob {
    /// Create a new record with no check file and no items
    pub fn new(check_total: BigDecimal, check_number: impl Into<String>) -> Self {
        Self {
            check_total,
            check_number: check_number.into(),
            check_file: String::new(),
            items: Vec::new(),
            replaced_check_files: Vec::new(),
            unrecognized_files: Vec::new(),
            unpaired_names: Vec::new(),
        }
    }

    /// Builder-style helper to set the check file
    pub fn with_check_file(mut self, check_file: impl Into<String>) -> Self {
        self.check_file = check_file.into();
        self
    }

    /// Builder-style helper to append an item
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Sum of every item's paid amount
    pub fn item_total(&self) -> BigDecimal {
        self.items.iter().map(|item| &item.paid).sum()
    }

    /// Whether a check file has been attached
    pub fn has_check_file(&self) -> bool {
        !self.check_file.is_empty()
    }
}

/// Records keyed by prefix (`<digits>-<check number>`)
pub type EobMap = BTreeMap<String, Eob>;

/// A collected consistency violation. Never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Check total is zero or negative
    NoCheckTotal { prefix: String },
    /// Check number is empty
    NoCheckNumber { prefix: String },
    /// No check file was seen for this record
    MissingCheckFile { prefix: String },
    /// Total encoded in the check file's name differs from the record's
    CheckFileTotalMismatch { prefix: String, file: String },
    /// Check number encoded in the check file's name differs from the record's
    CheckFileNumberMismatch { prefix: String, file: String },
    /// Check file name does not carry a readable prefix at all
    UnreadableCheckFile { prefix: String, file: String },
    /// Sum of items differs from the check total
    ItemTotalMismatch {
        prefix: String,
        check_total: BigDecimal,
        item_total: BigDecimal,
    },
    /// Grand total across all records differs from the expected total
    ExpectedTotalMismatch {
        expected: BigDecimal,
        actual: BigDecimal,
    },
    /// A later check file replaced an earlier one for the same record
    DuplicateCheckFile {
        prefix: String,
        file: String,
        previous: String,
    },
    /// Suffix matched neither the item-list nor the check marker
    UnrecognizedFile { prefix: String, file: String },
    /// An item name with no amount after it
    UnpairedItemName { file: String, name: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCheckTotal { prefix } => write!(f, "There is no check total for {prefix}"),
            Self::NoCheckNumber { prefix } => {
                write!(f, "Check number does not exist for {prefix}")
            }
            Self::MissingCheckFile { prefix } => write!(f, "Missing check file for {prefix}"),
            Self::CheckFileTotalMismatch { prefix, file } => write!(
                f,
                "Check total does not match between set {prefix} and file {file}"
            ),
            Self::CheckFileNumberMismatch { prefix, file } => write!(
                f,
                "Check number does not match between set {prefix} and file {file}"
            ),
            Self::UnreadableCheckFile { prefix, file } => {
                write!(f, "Check file name {file} cannot be read for set {prefix}")
            }
            Self::ItemTotalMismatch {
                prefix,
                check_total,
                item_total,
            } => write!(
                f,
                "Check total {check_total} does not match item totals {item_total} for {prefix}"
            ),
            Self::ExpectedTotalMismatch { expected, actual } => write!(
                f,
                "The expected total of {expected} does not equal {actual}"
            ),
            Self::DuplicateCheckFile {
                prefix,
                file,
                previous,
            } => write!(
                f,
                "Duplicate check file {file} for set {prefix} (replaced {previous})"
            ),
            Self::UnrecognizedFile { prefix, file } => {
                write!(f, "Unrecognized file {file} for set {prefix}")
            }
            Self::UnpairedItemName { file, name } => {
                write!(f, "Unpaired item name {name} in file {file}")
            }
        }
    }
}

/// Fatal errors. Any of these aborts the run with no partial report.
#[derive(Debug, thiserror::Error)]
pub enum EobError {
    #[error("Cannot read directory {path}: {message}")]
    DirectoryRead { path: String, message: String },
    #[error("Wrong prefix {prefix} for {filename}")]
    MalformedPrefix { filename: String, prefix: String },
    #[error("Cannot parse amount '{token}' in {filename}")]
    MalformedAmount { filename: String, token: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EobError {
    fn from(err: std::io::Error) -> Self {
        EobError::Io(err.to_string())
    }
}

/// Result type for reconciliation operations
pub type EobResult<T> = Result<T, EobError>;
