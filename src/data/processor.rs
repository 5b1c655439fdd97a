//! Data Processor Module
//! Binds the validated source columns to the canonical trade table.

use crate::config::ColumnMapping;
use crate::data::loader::is_numeric_dtype;
use crate::data::table::{TradeTable, IMPORT_VALUE, TRADE_BALANCE};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{column}' has a non-numeric value '{value}' in data row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

/// Renames and types the three source columns, then derives `Export Value`.
pub struct TradeProcessor;

impl TradeProcessor {
    /// Transform a validated sheet into the canonical trade table.
    pub fn transform(df: &DataFrame, mapping: &ColumnMapping) -> Result<TradeTable, ProcessorError> {
        let countries = Self::text_values(df.column(&mapping.country)?)?;
        let import_values = Self::numeric_values(df.column(&mapping.import_value)?, IMPORT_VALUE)?;
        let trade_balances =
            Self::numeric_values(df.column(&mapping.trade_balance)?, TRADE_BALANCE)?;

        Ok(TradeTable::from_parts(countries, import_values, trade_balances)?)
    }

    fn text_values(column: &Column) -> Result<Vec<Option<String>>, ProcessorError> {
        let text = column.cast(&DataType::String)?;
        Ok(text
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }

    /// Coerce a column to f64. Text cells must parse as numbers.
    fn numeric_values(column: &Column, name: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        match column.dtype() {
            DataType::Null => Ok(vec![None; column.len()]),
            DataType::String => column
                .str()?
                .into_iter()
                .enumerate()
                .map(|(i, value)| match value.map(str::trim) {
                    None | Some("") => Ok(None),
                    Some(s) => s.parse::<f64>().map(Some).map_err(|_| {
                        ProcessorError::NonNumeric {
                            column: name.to_string(),
                            row: i + 1,
                            value: s.to_string(),
                        }
                    }),
                })
                .collect(),
            dtype if is_numeric_dtype(dtype) => {
                let as_f64 = column.cast(&DataType::Float64)?;
                Ok(as_f64.f64()?.into_iter().collect())
            }
            _ => {
                let text = column.cast(&DataType::String)?;
                Self::numeric_values(&text, name)
            }
        }
    }
}
