//! Folds a stream of filenames into records keyed by prefix

use log::{debug, warn};

use crate::filename::{tokenize, FileKind, Token};
use crate::types::*;
use crate::utils::parse_cents;

/// Accumulator for one aggregation run
///
/// Each call to [`Aggregator::fold`] consumes the accumulator and hands back
/// the updated one, so the record map is never shared while it is built.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    records: EobMap,
    files_seen: usize,
    files_skipped: usize,
}

impl Aggregator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one filename into the accumulator
    pub fn fold(mut self, filename: &str) -> EobResult<Self> {
        self.files_seen += 1;

        match tokenize(filename)? {
            Some(token) => self.apply(filename, token)?,
            None => self.files_skipped += 1,
        }

        Ok(self)
    }

    fn apply(&mut self, filename: &str, token: Token) -> EobResult<()> {
        if !self.records.contains_key(&token.prefix) {
            let check_total = parse_cents(&token.total_digits, filename)?;
            debug!("new record {} with check total {}", token.prefix, check_total);
            self.records.insert(
                token.prefix.clone(),
                Eob::new(check_total, token.check_number.clone()),
            );
        }

        let Some(record) = self.records.get_mut(&token.prefix) else {
            return Ok(());
        };

        match token.kind {
            FileKind::Check => {
                if record.has_check_file() {
                    warn!(
                        "{} replaces check file {} for {}",
                        filename, record.check_file, token.prefix
                    );
                    let previous = std::mem::take(&mut record.check_file);
                    record.replaced_check_files.push(previous);
                }
                record.check_file = filename.to_string();
            }
            FileKind::ItemList => {
                let (items, unpaired) = parse_items(&token.suffix, filename)?;
                record.items.extend(items);
                if let Some(name) = unpaired {
                    warn!("{filename}: item name {name:?} has no amount");
                    record.unpaired_names.push((filename.to_string(), name));
                }
            }
            FileKind::Unrecognized => {
                warn!("{filename}: suffix is neither an item list nor a check");
                record.unrecognized_files.push(filename.to_string());
            }
        }

        Ok(())
    }

    /// Records built so far
    pub fn records(&self) -> &EobMap {
        &self.records
    }

    /// Number of filenames folded in, skipped ones included
    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    /// Number of filenames that did not belong to any set
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    /// Finish the run and take the records
    pub fn into_records(self) -> EobMap {
        self.records
    }
}

/// Fold every filename, in the order given, into a fresh accumulator
pub fn aggregate_all<I, S>(filenames: I) -> EobResult<Aggregator>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames
        .into_iter()
        .try_fold(Aggregator::new(), |acc, name| acc.fold(name.as_ref()))
}

/// Build the prefix -> record map for a sequence of filenames
pub fn aggregate<I, S>(filenames: I) -> EobResult<EobMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate_all(filenames).map(Aggregator::into_records)
}

/// Parse an item-list suffix (`name_cents_name_cents_...`) into items.
///
/// A single empty token left by a trailing underscore is ignored. Any other
/// leftover name without an amount is returned as the second element.
pub fn parse_items(suffix: &str, filename: &str) -> EobResult<(Vec<Item>, Option<String>)> {
    let mut tokens: Vec<&str> = suffix.split('_').collect();
    if tokens.last() == Some(&"") {
        tokens.pop();
    }

    let mut items = Vec::with_capacity(tokens.len() / 2);
    let mut unpaired = None;

    for pair in tokens.chunks(2) {
        match pair {
            [name, amount] => items.push(Item::new(*name, parse_cents(amount, filename)?)),
            [name] => unpaired = Some(name.to_string()),
            _ => {}
        }
    }

    Ok((items, unpaired))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_aggregate_pairs_check_and_items() {
        let records = aggregate([
            "10050-ABC1_check.pdf",
            "10050-ABC1_EOB_John_5000_Jane_5050_.pdf",
        ])
        .unwrap();

        assert_eq!(records.len(), 1);
        let eob = &records["10050-ABC1"];
        assert_eq!(eob.check_total, dec("100.50"));
        assert_eq!(eob.check_number, "ABC1");
        assert_eq!(eob.check_file, "10050-ABC1_check.pdf");
        assert_eq!(
            eob.items,
            vec![Item::new("John", dec("50.00")), Item::new("Jane", dec("50.50"))]
        );
    }

    #[test]
    fn test_items_append_across_files_in_order() {
        let records = aggregate([
            "300-Z9_EOB_A_100_.pdf",
            "300-Z9_EOB_B_200_.pdf",
        ])
        .unwrap();

        let names: Vec<&str> = records["300-Z9"]
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(!records["300-Z9"].has_check_file());
    }

    #[test]
    fn test_skipped_files_are_counted_but_not_recorded() {
        let acc = aggregate_all(["readme.txt", "10050-ABC1_check.pdf", ".DS_Store"]).unwrap();
        assert_eq!(acc.files_seen(), 3);
        assert_eq!(acc.files_skipped(), 2);
        assert_eq!(acc.records().len(), 1);
    }

    #[test]
    fn test_last_check_file_wins_and_is_recorded() {
        let records = aggregate(["100-A1_check.pdf", "100-A1_check_copy.pdf"]).unwrap();
        let eob = &records["100-A1"];
        assert_eq!(eob.check_file, "100-A1_check_copy.pdf");
        assert_eq!(eob.replaced_check_files, vec!["100-A1_check.pdf"]);
    }

    #[test]
    fn test_unrecognized_file_still_creates_record() {
        let records = aggregate(["100-A1_receipt.pdf"]).unwrap();
        let eob = &records["100-A1"];
        assert!(eob.items.is_empty());
        assert_eq!(eob.unrecognized_files, vec!["100-A1_receipt.pdf"]);
    }

    #[test]
    fn test_malformed_amount_aborts() {
        let err = aggregate(["100-A1_check.pdf", "100-A1_EOB_John_5x_.pdf"]).unwrap_err();
        assert!(matches!(err, EobError::MalformedAmount { ref token, .. } if token == "5x"));
    }

    #[test]
    fn test_single_digit_total_aborts() {
        assert!(matches!(
            aggregate(["5-A1_check.pdf"]),
            Err(EobError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn test_parse_items_trailing_underscore() {
        let (items, unpaired) = parse_items("John_5000_Jane_5050_", "f").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(unpaired, None);
    }

    #[test]
    fn test_parse_items_odd_token_count() {
        let (items, unpaired) = parse_items("John_5000_Jane", "f").unwrap();
        assert_eq!(items, vec![Item::new("John", dec("50.00"))]);
        assert_eq!(unpaired.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_parse_items_empty_suffix() {
        let (items, unpaired) = parse_items("", "f").unwrap();
        assert!(items.is_empty());
        assert_eq!(unpaired, None);
    }
}
