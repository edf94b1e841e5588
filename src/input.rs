//! Pure validators for user-entered values.
//!
//! These never prompt or retry; a front end calls them in whatever loop it
//! likes and shows the returned error, which names the field and the value.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    errors::{LedgerError, Result},
    ledger::{RecordKind, DATE_FORMAT},
};

/// Month-first layout accepted from people typing dates.
pub const ENTRY_DATE_FORMAT: &str = "%m-%d-%Y";

/// Parses `MM-DD-YYYY` or ISO `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, ENTRY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DATE_FORMAT))
        .map_err(|_| LedgerError::validation("date", raw, "use MM-DD-YYYY or YYYY-MM-DD"))
}

/// Parses a strictly positive decimal amount.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| LedgerError::validation("amount", raw, "not a number"))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(
            "amount",
            raw,
            "must be greater than zero",
        ));
    }
    Ok(amount)
}

/// Parses `plan`/`allowance` (or the stored `expense`/`income` tags).
pub fn parse_kind(raw: &str) -> Result<RecordKind> {
    raw.parse()
}

/// Blank input means no due date. Anything that reads as a date is stored in
/// ISO form so due dates sort chronologically; other text is kept as typed.
pub fn parse_due_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse_date(trimmed) {
        Ok(date) => Some(date.format(DATE_FORMAT).to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Parses a 1-based record number. `0` means the user cancelled.
pub fn parse_index(raw: &str) -> Result<Option<usize>> {
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::validation("record number", raw, "not a whole number"))?;
    Ok((index != 0).then_some(index))
}
