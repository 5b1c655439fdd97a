//! Trade Summary Module
//! Aggregate deficit over rows with a negative trade balance.

use crate::data::{TradeTable, TRADE_BALANCE};
use polars::prelude::*;

/// Sum of negative trade balances, as shown under the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeSummary {
    /// Sum of `Trade Balance` over rows where it is below zero
    pub deficit_total: f64,
    pub year: u16,
}

impl TradeSummary {
    pub fn from_table(table: &TradeTable, year: u16) -> PolarsResult<Self> {
        let out = table
            .dataframe()
            .clone()
            .lazy()
            .filter(col(TRADE_BALANCE).lt(lit(0.0)))
            .select([col(TRADE_BALANCE).sum()])
            .collect()?;

        let deficit_total = out.column(TRADE_BALANCE)?.f64()?.get(0).unwrap_or(0.0);

        let summary = Self {
            deficit_total,
            year,
        };
        if !summary.has_deficit() {
            tracing::warn!("no negative trade balance in upload; summary reports a zero excess");
        }
        Ok(summary)
    }

    /// Whether any row had a negative trade balance.
    pub fn has_deficit(&self) -> bool {
        self.deficit_total < 0.0
    }

    /// Amount by which imports exceeded exports, in USD thousand.
    pub fn excess(&self) -> f64 {
        self.deficit_total.abs()
    }

    pub fn message(&self) -> String {
        format!(
            "The trade balance for this product was negative in {}, and imports exceeded exports by ${} (USD thousand).",
            self.year,
            format_thousands(self.excess())
        )
    }
}

/// Zero decimals, `,` every three digits.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && grouped != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(balances: &[Option<f64>]) -> TradeTable {
        TradeTable::from_parts(
            (0..balances.len()).map(|i| Some(format!("C{}", i))).collect(),
            vec![Some(0.0); balances.len()],
            balances.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn only_negative_rows_count() {
        let summary =
            TradeSummary::from_table(&table(&[Some(-5.0), Some(10.0), Some(-3.0)]), 2024).unwrap();
        assert_eq!(summary.deficit_total, -8.0);
        assert_eq!(summary.excess(), 8.0);
        assert!(summary.has_deficit());
    }

    #[test]
    fn blank_balances_are_ignored() {
        let summary = TradeSummary::from_table(&table(&[None, Some(-2.0)]), 2024).unwrap();
        assert_eq!(summary.excess(), 2.0);
    }

    #[test]
    fn no_negative_rows_still_renders_message() {
        let summary = TradeSummary::from_table(&table(&[Some(1.0), Some(0.0)]), 2024).unwrap();
        assert_eq!(summary.excess(), 0.0);
        assert!(!summary.has_deficit());
        assert_eq!(
            summary.message(),
            "The trade balance for this product was negative in 2024, and imports exceeded exports by $0 (USD thousand)."
        );
    }

    #[test]
    fn empty_table_has_zero_excess() {
        let summary = TradeSummary::from_table(&table(&[]), 2024).unwrap();
        assert_eq!(summary.excess(), 0.0);
    }

    #[test]
    fn message_uses_thousands_separators() {
        let summary = TradeSummary {
            deficit_total: -1_234_567.4,
            year: 2023,
        };
        assert_eq!(
            summary.message(),
            "The trade balance for this product was negative in 2023, and imports exceeded exports by $1,234,567 (USD thousand)."
        );
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(123456.6), "123,457");
        assert_eq!(format_thousands(-98765.0), "-98,765");
        assert_eq!(format_thousands(-0.2), "0");
    }
}
