use rust_decimal::Decimal;

use super::record::{Record, RecordKind};

/// Aggregate totals over active records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

impl Balance {
    /// Sums income and expense magnitudes separately. Decimal addition is exact,
    /// so totals never drift the way binary floats do.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let (total_income, total_expense) = records.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), record| match record.kind() {
                RecordKind::Income => (income + record.amount(), expense),
                RecordKind::Expense => (income, expense + record.amount()),
            },
        );
        Self {
            total_income,
            total_expense,
            net: total_income - total_expense,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        if self.net > Decimal::ZERO {
            BalanceStatus::Surplus
        } else if self.net < Decimal::ZERO {
            BalanceStatus::Deficit
        } else {
            BalanceStatus::Even
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Surplus,
    Deficit,
    Even,
}

impl BalanceStatus {
    /// Advisory line shown under a balance report.
    pub fn advice(self) -> &'static str {
        match self {
            BalanceStatus::Surplus => "Good. Save more!",
            BalanceStatus::Deficit => "ALERT!!! You're out of balance!",
            BalanceStatus::Even => "Zero Balance, don't forget to save!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn empty_balance_is_even() {
        let balance = Balance::from_records(&Vec::<Record>::new());
        assert_eq!(balance, Balance::default());
        assert_eq!(balance.status(), BalanceStatus::Even);
    }

    #[test]
    fn sums_without_float_drift() {
        let records: Vec<Record> = (0..3)
            .map(|_| Record::income(day(), "Coins", dec!(0.10)).unwrap())
            .collect();
        let balance = Balance::from_records(&records);
        assert_eq!(balance.total_income, dec!(0.30));
        assert_eq!(balance.net, dec!(0.3));
        assert_eq!(balance.status(), BalanceStatus::Surplus);
    }

    #[test]
    fn deficit_when_expenses_exceed_income() {
        let records = vec![
            Record::income(day(), "Allowance", dec!(100)).unwrap(),
            Record::expense(day(), "Books", dec!(150.75), None).unwrap(),
        ];
        let balance = Balance::from_records(&records);
        assert_eq!(balance.total_expense, dec!(150.75));
        assert_eq!(balance.net, dec!(-50.75));
        assert_eq!(balance.status(), BalanceStatus::Deficit);
        assert_eq!(balance.status().advice(), "ALERT!!! You're out of balance!");
    }
}
