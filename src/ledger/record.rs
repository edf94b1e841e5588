use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{
    currency::{self, DEFAULT_SYMBOL},
    errors::{LedgerError, Result},
};

/// ISO 8601 calendar date layout used in the persisted file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Direction of a financial event. Amounts are always stored as magnitudes;
/// the kind decides whether they add to or subtract from the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A plan.
    #[default]
    Expense,
    /// An allowance.
    Income,
}

impl RecordKind {
    /// Literal tag written to the `record_type` field.
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Expense => "expense",
            RecordKind::Income => "income",
        }
    }

    /// Parses a persisted tag. Only the two literal tags are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "expense" => Some(RecordKind::Expense),
            "income" => Some(RecordKind::Income),
            _ => None,
        }
    }

    /// Domain label used in tables.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Expense => "Plan",
            RecordKind::Income => "Allowance",
        }
    }

    pub fn sign(self) -> char {
        match self {
            RecordKind::Expense => '-',
            RecordKind::Income => '+',
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts the stored tags as well as the domain vocabulary (`plan`, `allowance`),
/// ignoring case and surrounding whitespace.
impl FromStr for RecordKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "expense" | "plan" => Ok(RecordKind::Expense),
            "income" | "allowance" => Ok(RecordKind::Income),
            _ => Err(LedgerError::validation(
                "record type",
                value,
                "expected `plan` or `allowance`",
            )),
        }
    }
}

/// One financial event. Fields are fixed at construction; there is no edit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    date: NaiveDate,
    description: String,
    amount: Decimal,
    kind: RecordKind,
    due_date: Option<String>,
}

impl Record {
    /// Builds a validated record.
    ///
    /// The description must contain something other than whitespace and the
    /// amount must be strictly positive. A due date only applies to expenses and
    /// is dropped for income; a blank due date is treated as absent.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        kind: RecordKind,
        due_date: Option<String>,
    ) -> Result<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(LedgerError::validation(
                "description",
                &description,
                "must not be empty",
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                "amount",
                amount,
                "must be greater than zero",
            ));
        }
        Ok(Self::assemble(date, description, amount, kind, due_date))
    }

    pub fn expense(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        due_date: Option<String>,
    ) -> Result<Self> {
        Self::new(date, description, amount, RecordKind::Expense, due_date)
    }

    pub fn income(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Result<Self> {
        Self::new(date, description, amount, RecordKind::Income, None)
    }

    fn assemble(
        date: NaiveDate,
        description: String,
        amount: Decimal,
        kind: RecordKind,
        due_date: Option<String>,
    ) -> Self {
        let due_date = match kind {
            RecordKind::Income => None,
            RecordKind::Expense => due_date.filter(|due| !due.trim().is_empty()),
        };
        Self {
            date,
            description,
            amount,
            kind,
            due_date,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    /// `{date} | {description} | {sign}{symbol}{amount}[ | Due: {due_date}]`
    pub fn render(&self, symbol: &str) -> String {
        let mut line = format!(
            "{} | {} | {}{}",
            self.date.format(DATE_FORMAT),
            self.description,
            self.kind.sign(),
            currency::format_currency_value(self.amount, symbol)
        );
        if let Some(due) = &self.due_date {
            line.push_str(" | Due: ");
            line.push_str(due);
        }
        line
    }

    pub fn to_stored(&self) -> StoredRecord {
        StoredRecord::from(self)
    }

    /// Reads a record from its structured JSON form.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let stored: StoredRecord = serde_json::from_value(value)?;
        Record::try_from(stored)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_SYMBOL))
    }
}

/// Persisted shape of a [`Record`]. Field names match the on-disk format and
/// every field is checked again when converting back into a `Record`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    pub date: String,
    pub description: String,
    /// Kept as raw JSON so a string or other non-number is reported against
    /// this field instead of failing the whole document.
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
}

impl From<&Record> for StoredRecord {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            description: record.description.clone(),
            amount: Some(amount_to_json(record.amount)),
            due_date: record.due_date.clone(),
            record_type: Some(record.kind.tag().to_string()),
        }
    }
}

impl TryFrom<StoredRecord> for Record {
    type Error = LedgerError;

    fn try_from(stored: StoredRecord) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&stored.date, DATE_FORMAT).map_err(|err| {
            LedgerError::format("date", format!("`{}` is not an ISO date ({err})", stored.date))
        })?;
        let amount = match stored.amount {
            None | Some(Value::Null) => return Err(LedgerError::format("amount", "missing")),
            Some(value) => amount_from_json(&value)?,
        };
        if amount <= Decimal::ZERO {
            return Err(LedgerError::format(
                "amount",
                format!("`{amount}` must be greater than zero"),
            ));
        }
        if stored.description.trim().is_empty() {
            return Err(LedgerError::format("description", "must not be empty"));
        }
        // Files written before kinds existed only held expenses.
        let kind = match stored.record_type.as_deref() {
            None => RecordKind::Expense,
            Some(tag) => RecordKind::from_tag(tag).ok_or_else(|| {
                LedgerError::format("record_type", format!("unknown tag `{tag}`"))
            })?,
        };
        Ok(Record::assemble(
            date,
            stored.description,
            amount,
            kind,
            stored.due_date,
        ))
    }
}

/// Writes the exact decimal digits as a JSON number. serde_json is built with
/// `arbitrary_precision`, so nothing passes through `f64`.
fn amount_to_json(amount: Decimal) -> Value {
    // Decimal's Display never uses exponents or separators, so it always
    // parses as a JSON number.
    Number::from_str(&amount.to_string())
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn amount_from_json(value: &Value) -> Result<Decimal> {
    let Value::Number(number) = value else {
        return Err(LedgerError::format(
            "amount",
            format!("`{value}` is not a number"),
        ));
    };
    let text = number.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|err| LedgerError::format("amount", format!("`{text}` is out of range ({err})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_empty_description() {
        let err = Record::income(day(2024, 1, 2), "   ", dec!(10)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "description",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_positive_amount() {
        for amount in [dec!(0), dec!(-5.25)] {
            let err = Record::expense(day(2024, 1, 2), "Rent", amount, None).unwrap_err();
            match err {
                LedgerError::Validation { field, value, .. } => {
                    assert_eq!(field, "amount");
                    assert_eq!(value, amount.to_string());
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn income_drops_due_date() {
        let record = Record::new(
            day(2024, 1, 2),
            "Salary",
            dec!(2000),
            RecordKind::Income,
            Some("2024-01-31".into()),
        )
        .unwrap();
        assert_eq!(record.due_date(), None);
    }

    #[test]
    fn blank_due_date_is_absent() {
        let record = Record::expense(day(2024, 1, 2), "Rent", dec!(500), Some("  ".into())).unwrap();
        assert_eq!(record.due_date(), None);
    }

    #[test]
    fn renders_expense_with_due_date() {
        let record = Record::expense(
            day(2024, 1, 1),
            "Rent",
            dec!(500),
            Some("2024-01-05".into()),
        )
        .unwrap();
        assert_eq!(
            record.to_string(),
            "2024-01-01 | Rent | -₱500.00 | Due: 2024-01-05"
        );
    }

    #[test]
    fn renders_income_with_custom_symbol() {
        let record = Record::income(day(2024, 1, 2), "Salary", dec!(1999.5)).unwrap();
        assert_eq!(record.render("$"), "2024-01-02 | Salary | +$1999.50");
    }

    #[test]
    fn stored_form_uses_persisted_field_names() {
        let record = Record::expense(
            day(2024, 1, 1),
            "Rent",
            dec!(500.25),
            Some("2024-01-05".into()),
        )
        .unwrap();
        let value = serde_json::to_value(record.to_stored()).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2024-01-01",
                "description": "Rent",
                "amount": 500.25,
                "due_date": "2024-01-05",
                "record_type": "expense"
            })
        );
    }

    #[test]
    fn stored_form_round_trips() {
        let original = Record::income(day(2023, 12, 31), "Gift", dec!(0.10)).unwrap();
        let value = serde_json::to_value(original.to_stored()).unwrap();
        let restored = Record::from_value(value).unwrap();
        assert_eq!(restored.date(), original.date());
        assert_eq!(restored.description(), original.description());
        assert_eq!(restored.amount(), dec!(0.1));
        assert_eq!(restored.kind(), original.kind());
        assert_eq!(restored.due_date(), None);
    }

    #[test]
    fn missing_kind_defaults_to_expense() {
        let record = Record::from_value(json!({
            "date": "2022-05-01",
            "description": "Old entry",
            "amount": 12,
            "due_date": null
        }))
        .unwrap();
        assert_eq!(record.kind(), RecordKind::Expense);
        assert_eq!(record.amount(), dec!(12));
    }

    #[test]
    fn unknown_kind_is_a_format_error() {
        let err = Record::from_value(json!({
            "date": "2022-05-01",
            "description": "Mystery",
            "amount": 12,
            "record_type": "transfer"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Format {
                field: "record_type",
                ..
            }
        ));
    }

    #[test]
    fn bad_date_is_a_format_error() {
        let err = Record::from_value(json!({
            "date": "05-01-2022",
            "description": "Rent",
            "amount": 12
        }))
        .unwrap_err();
        assert!(matches!(err, LedgerError::Format { field: "date", .. }));
    }

    #[test]
    fn missing_or_non_numeric_amount_is_a_format_error() {
        let missing = Record::from_value(json!({
            "date": "2022-05-01",
            "description": "Rent"
        }))
        .unwrap_err();
        assert!(matches!(missing, LedgerError::Format { field: "amount", .. }));

        for amount in [json!("lots"), json!("12.5"), json!(true), json!([12])] {
            let err = Record::from_value(json!({
                "date": "2022-05-01",
                "description": "Rent",
                "amount": amount
            }))
            .unwrap_err();
            assert!(
                matches!(err, LedgerError::Format { field: "amount", .. }),
                "unexpected result for {amount}: {err:?}"
            );
        }
    }

    #[test]
    fn high_precision_amount_round_trips_exactly() {
        let amount = Decimal::from_str("1234567890.123456789").unwrap();
        let original = Record::income(day(2024, 1, 1), "Precise", amount).unwrap();
        let text = serde_json::to_string(&original.to_stored()).unwrap();
        assert!(text.contains("\"amount\":1234567890.123456789"), "{text}");

        let stored: StoredRecord = serde_json::from_str(&text).unwrap();
        let restored = Record::try_from(stored).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.amount().to_string(), "1234567890.123456789");
    }

    #[test]
    fn kind_parses_domain_vocabulary() {
        assert_eq!("Plan".parse::<RecordKind>().unwrap(), RecordKind::Expense);
        assert_eq!(" allowance ".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!("income".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert!("loan".parse::<RecordKind>().is_err());
    }
}
