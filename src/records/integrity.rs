//! Cross-total integrity checks over aggregated records

use bigdecimal::BigDecimal;
use log::info;
use serde::{Deserialize, Serialize};

use crate::filename::match_prefix;
use crate::types::*;
use crate::utils::{parse_cents, split_prefix};

/// Result of checking a full record map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Sum of every record's item total
    pub grand_total: BigDecimal,
    /// Violations in record-key order, grouped per record
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every record and compute the grand total.
///
/// Never mutates the records, so running it twice yields the same report.
pub fn check_integrity(records: &EobMap) -> IntegrityReport {
    let mut violations = Vec::new();
    let mut grand_total = BigDecimal::from(0);

    for (prefix, eob) in records {
        violations.extend(check_record(prefix, eob));
        grand_total += eob.item_total();
    }

    info!(
        "checked {} record(s): grand total {}, {} violation(s)",
        records.len(),
        grand_total,
        violations.len()
    );

    IntegrityReport {
        grand_total,
        violations,
    }
}

/// Run every per-record check. Checks never short-circuit each other.
pub fn check_record(prefix: &str, eob: &Eob) -> Vec<Violation> {
    let mut violations = Vec::new();

    if eob.check_total <= BigDecimal::from(0) {
        violations.push(Violation::NoCheckTotal {
            prefix: prefix.to_string(),
        });
    }

    if eob.check_number.is_empty() {
        violations.push(Violation::NoCheckNumber {
            prefix: prefix.to_string(),
        });
    }

    if eob.has_check_file() {
        violations.extend(check_file_name(prefix, eob));
    } else {
        violations.push(Violation::MissingCheckFile {
            prefix: prefix.to_string(),
        });
    }

    let item_total = eob.item_total();
    if item_total != eob.check_total {
        violations.push(Violation::ItemTotalMismatch {
            prefix: prefix.to_string(),
            check_total: eob.check_total.clone(),
            item_total,
        });
    }

    for previous in &eob.replaced_check_files {
        violations.push(Violation::DuplicateCheckFile {
            prefix: prefix.to_string(),
            file: eob.check_file.clone(),
            previous: previous.clone(),
        });
    }

    for file in &eob.unrecognized_files {
        violations.push(Violation::UnrecognizedFile {
            prefix: prefix.to_string(),
            file: file.clone(),
        });
    }

    for (file, name) in &eob.unpaired_names {
        violations.push(Violation::UnpairedItemName {
            file: file.clone(),
            name: name.clone(),
        });
    }

    violations
}

// The check file's own name must carry the same total and number as the record.
fn check_file_name(prefix: &str, eob: &Eob) -> Vec<Violation> {
    let file = &eob.check_file;
    let unreadable = || {
        vec![Violation::UnreadableCheckFile {
            prefix: prefix.to_string(),
            file: file.clone(),
        }]
    };

    let Some(file_prefix) = match_prefix(file) else {
        return unreadable();
    };
    let Ok((total_digits, check_number)) = split_prefix(file_prefix, file) else {
        return unreadable();
    };
    let Ok(file_total) = parse_cents(total_digits, file) else {
        return unreadable();
    };

    let mut violations = Vec::new();
    if file_total != eob.check_total {
        violations.push(Violation::CheckFileTotalMismatch {
            prefix: prefix.to_string(),
            file: file.clone(),
        });
    }
    if check_number != eob.check_number {
        violations.push(Violation::CheckFileNumberMismatch {
            prefix: prefix.to_string(),
            file: file.clone(),
        });
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn balanced() -> Eob {
        Eob::new(dec("100.50"), "ABC1")
            .with_check_file("10050-ABC1_check.pdf")
            .with_item(Item::new("John", dec("50.00")))
            .with_item(Item::new("Jane", dec("50.50")))
    }

    #[test]
    fn test_balanced_record_has_no_violations() {
        assert!(check_record("10050-ABC1", &balanced()).is_empty());
    }

    #[test]
    fn test_missing_check_file() {
        let eob = Eob::new(dec("50.00"), "ABC1").with_item(Item::new("John", dec("50.00")));
        assert_eq!(
            check_record("5000-ABC1", &eob),
            vec![Violation::MissingCheckFile {
                prefix: "5000-ABC1".to_string()
            }]
        );
    }

    #[test]
    fn test_check_file_total_mismatch_only() {
        let eob = balanced().with_check_file("99999-ABC1_check.pdf");
        assert_eq!(
            check_record("10050-ABC1", &eob),
            vec![Violation::CheckFileTotalMismatch {
                prefix: "10050-ABC1".to_string(),
                file: "99999-ABC1_check.pdf".to_string(),
            }]
        );
    }

    #[test]
    fn test_check_file_total_and_number_mismatch() {
        let eob = balanced().with_check_file("99999-XYZ9_check.pdf");
        let violations = check_record("10050-ABC1", &eob);
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], Violation::CheckFileTotalMismatch { .. }));
        assert!(matches!(violations[1], Violation::CheckFileNumberMismatch { .. }));
    }

    #[test]
    fn test_unreadable_check_file() {
        let eob = balanced().with_check_file("scan.pdf");
        assert!(matches!(
            check_record("10050-ABC1", &eob).as_slice(),
            [Violation::UnreadableCheckFile { .. }]
        ));
    }

    #[test]
    fn test_zero_items_with_positive_total_mismatches() {
        let eob = Eob::new(dec("10.00"), "A1").with_check_file("1000-A1_check.pdf");
        assert_eq!(
            check_record("1000-A1", &eob),
            vec![Violation::ItemTotalMismatch {
                prefix: "1000-A1".to_string(),
                check_total: dec("10.00"),
                item_total: BigDecimal::from(0),
            }]
        );
    }

    #[test]
    fn test_all_checks_run_without_short_circuit() {
        let eob = Eob::new(BigDecimal::from(0), "").with_item(Item::new("x", dec("1.00")));
        let violations = check_record("000-", &eob);
        assert_eq!(violations.len(), 4);
        assert!(matches!(violations[0], Violation::NoCheckTotal { .. }));
        assert!(matches!(violations[1], Violation::NoCheckNumber { .. }));
        assert!(matches!(violations[2], Violation::MissingCheckFile { .. }));
        assert!(matches!(violations[3], Violation::ItemTotalMismatch { .. }));
    }

    #[test]
    fn test_grand_total_and_idempotence() {
        let mut records = EobMap::new();
        records.insert("10050-ABC1".to_string(), balanced());
        records.insert(
            "001-Q".to_string(),
            Eob::new(dec("0.01"), "Q")
                .with_check_file("001-Q_check.pdf")
                .with_item(Item::new("p", dec("0.01"))),
        );

        let first = check_integrity(&records);
        let second = check_integrity(&records);
        assert_eq!(first.grand_total, dec("100.51"));
        assert!(first.is_valid());
        assert_eq!(first, second);
    }

    #[test]
    fn test_recorded_anomalies_are_reported() {
        let mut eob = balanced();
        eob.replaced_check_files.push("10050-ABC1_check_old.pdf".to_string());
        eob.unrecognized_files.push("10050-ABC1_note.txt".to_string());
        eob.unpaired_names
            .push(("10050-ABC1_EOB_Ann_.pdf".to_string(), "Ann".to_string()));

        let messages: Vec<String> = check_record("10050-ABC1", &eob)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Duplicate check file 10050-ABC1_check.pdf for set 10050-ABC1 (replaced 10050-ABC1_check_old.pdf)",
                "Unrecognized file 10050-ABC1_note.txt for set 10050-ABC1",
                "Unpaired item name Ann in file 10050-ABC1_EOB_Ann_.pdf",
            ]
        );
    }
}
