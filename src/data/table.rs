//! Trade Record Table
//! Canonical four-column table; `Export Value` is always derived here.

use polars::prelude::*;

pub const COUNTRY: &str = "Country";
pub const IMPORT_VALUE: &str = "Import Value";
pub const TRADE_BALANCE: &str = "Trade Balance";
pub const EXPORT_VALUE: &str = "Export Value";

/// One country row.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub country: String,
    pub import_value: Option<f64>,
    pub trade_balance: Option<f64>,
    pub export_value: Option<f64>,
}

/// Columns: Country, Import Value, Trade Balance, Export Value (in that order).
#[derive(Debug, Clone)]
pub struct TradeTable {
    df: DataFrame,
}

impl TradeTable {
    /// Build the table from row-aligned source columns and derive `Export Value`.
    pub fn from_parts(
        countries: Vec<Option<String>>,
        import_values: Vec<Option<f64>>,
        trade_balances: Vec<Option<f64>>,
    ) -> PolarsResult<Self> {
        let base = DataFrame::new(vec![
            Column::new(COUNTRY.into(), countries),
            Column::new(IMPORT_VALUE.into(), import_values),
            Column::new(TRADE_BALANCE.into(), trade_balances),
        ])?;

        let df = base
            .lazy()
            .with_column((col(IMPORT_VALUE) + col(TRADE_BALANCE)).alias(EXPORT_VALUE))
            .collect()?;

        Ok(Self { df })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Country names in row order; a blank name is an empty string.
    pub fn countries(&self) -> PolarsResult<Vec<String>> {
        Ok(self
            .df
            .column(COUNTRY)?
            .str()?
            .into_iter()
            .map(|c| c.unwrap_or_default().to_string())
            .collect())
    }

    pub fn import_values(&self) -> PolarsResult<Vec<Option<f64>>> {
        self.values(IMPORT_VALUE)
    }

    pub fn trade_balances(&self) -> PolarsResult<Vec<Option<f64>>> {
        self.values(TRADE_BALANCE)
    }

    pub fn export_values(&self) -> PolarsResult<Vec<Option<f64>>> {
        self.values(EXPORT_VALUE)
    }

    fn values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        Ok(self.df.column(name)?.f64()?.into_iter().collect())
    }

    /// Typed row view.
    pub fn records(&self) -> PolarsResult<Vec<TradeRecord>> {
        let countries = self.countries()?;
        let imports = self.import_values()?;
        let balances = self.trade_balances()?;
        let exports = self.export_values()?;

        Ok(countries
            .into_iter()
            .zip(imports)
            .zip(balances)
            .zip(exports)
            .map(
                |(((country, import_value), trade_balance), export_value)| TradeRecord {
                    country,
                    import_value,
                    trade_balance,
                    export_value,
                },
            )
            .collect())
    }
}
