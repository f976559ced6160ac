//! Fixed-point cents parsing

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::*;

/// Number of implied decimal places in an amount token
pub const CENTS_DIGITS: usize = 2;

/// Parse a digit string whose last two digits are cents, e.g. `"10050"` -> `100.50`.
///
/// `filename` is only used to build the error. The token must be all ASCII
/// digits and at least two characters long.
pub fn parse_cents(token: &str, filename: &str) -> EobResult<BigDecimal> {
    let malformed = || EobError::MalformedAmount {
        filename: filename.to_string(),
        token: token.to_string(),
    };

    if token.len() < CENTS_DIGITS || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let (whole, cents) = token.split_at(token.len() - CENTS_DIGITS);
    let whole = if whole.is_empty() { "0" } else { whole };

    BigDecimal::from_str(&format!("{whole}.{cents}")).map_err(|_| malformed())
}
