//! Run pipeline and the numbered report

use bigdecimal::BigDecimal;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;

use crate::config::{AuditConfig, OutputFormat};
use crate::records::{aggregate_all, check_integrity};
use crate::traits::*;
use crate::types::*;
use crate::utils::DirectorySource;

/// Line printed when nothing is wrong
pub const NO_ERRORS_MESSAGE: &str = "No errors found.";

/// Outcome of one audit run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub expected_total: BigDecimal,
    /// Sum of every item across every record
    pub grand_total: BigDecimal,
    /// Expected-total mismatch first (if any), then per-record violations
    pub violations: Vec<Violation>,
    pub record_count: usize,
    pub file_count: usize,
    /// Files that did not belong to any set
    pub skipped_count: usize,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable messages in report order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Write `N. message` lines, or the single no-errors line
    pub fn write_text<W: Write>(&self, out: &mut W) -> EobResult<()> {
        if self.is_clean() {
            writeln!(out, "{NO_ERRORS_MESSAGE}")?;
            return Ok(());
        }
        for (n, message) in self.messages().iter().enumerate() {
            writeln!(out, "{}. {}", n + 1, message)?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> EobResult<()> {
        serde_json::to_writer_pretty(&mut *out, self).map_err(|e| EobError::Io(e.to_string()))?;
        writeln!(out)?;
        Ok(())
    }

    pub fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> EobResult<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }
}

/// Audit a list of filenames against an expected grand total.
///
/// Names are sorted first so item order and check-file replacement do not
/// depend on how the caller enumerated them.
pub fn audit<I, S>(filenames: I, expected_total: &BigDecimal) -> EobResult<AuditReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<S> = filenames.into_iter().collect();
    names.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

    let aggregator = aggregate_all(names.iter())?;
    let integrity = check_integrity(aggregator.records());

    let mut violations = Vec::with_capacity(integrity.violations.len() + 1);
    if integrity.grand_total != *expected_total {
        violations.push(Violation::ExpectedTotalMismatch {
            expected: expected_total.clone(),
            actual: integrity.grand_total.clone(),
        });
    }
    violations.extend(integrity.violations);

    info!(
        "audited {} file(s), {} skipped, {} record(s)",
        aggregator.files_seen(),
        aggregator.files_skipped(),
        aggregator.records().len()
    );

    Ok(AuditReport {
        expected_total: expected_total.clone(),
        grand_total: integrity.grand_total,
        violations,
        record_count: aggregator.records().len(),
        file_count: aggregator.files_seen(),
        skipped_count: aggregator.files_skipped(),
    })
}

/// Audit whatever names a file source lists
pub fn audit_source(source: &dyn FileSource, expected_total: &BigDecimal) -> EobResult<AuditReport> {
    audit(source.list_names()?, expected_total)
}

/// Audit the files directly inside `target_dir`
pub fn audit_directory(
    target_dir: impl AsRef<Path>,
    expected_total: &BigDecimal,
) -> EobResult<AuditReport> {
    audit_source(&DirectorySource::new(target_dir.as_ref()), expected_total)
}

/// Run a configured audit and write the report to `out`
pub fn run_audit<W: Write>(config: &AuditConfig, out: &mut W) -> EobResult<AuditReport> {
    config.validate()?;
    let report = audit_directory(&config.target_dir, &config.expected_total)?;
    report.write(config.format, out)?;
    Ok(report)
}

/// Audit `target_dir` and print the numbered text report to stdout
pub fn parse(target_dir: impl AsRef<Path>, expected_total: &BigDecimal) -> EobResult<AuditReport> {
    let report = audit_directory(target_dir, expected_total)?;
    report.write_text(&mut io::stdout().lock())?;
    Ok(report)
}
