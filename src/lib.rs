//! # EOB Reconcile
//!
//! Validates a directory of filename-encoded explanation-of-benefits (EOB)
//! and check files. Nothing is read from inside the files: every amount and
//! identifier comes from the file names.
//!
//! ## Features
//!
//! - **Filename tokenizing**: `<cents>-<check number>_` prefix keys with
//!   `check` and `EOB_<name>_<cents>_...` suffixes
//! - **Record aggregation**: files sharing a prefix fold into one record
//! - **Integrity checks**: check file vs. prefix, item sum vs. check total,
//!   grand total vs. the expected total
//! - **Exact arithmetic**: all amounts are `BigDecimal`, never floats
//! - **Source abstraction**: a real directory or any other [`FileSource`]
//!
//! ## Quick Start
//!
//! ```rust
//! use eob_reconcile::audit;
//! use bigdecimal::BigDecimal;
//! use std::str::FromStr;
//!
//! let expected = BigDecimal::from_str("100.50").unwrap();
//! let report = audit(
//!     ["10050-ABC1_check.pdf", "10050-ABC1_EOB_John_5000_Jane_5050_.pdf"],
//!     &expected,
//! )
//! .unwrap();
//! assert!(report.is_clean());
//! ```

pub mod config;
pub mod filename;
pub mod records;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use filename::{tokenize, FileKind, Token};
pub use records::*;
pub use report::*;
pub use traits::*;
pub use types::*;
