//! Spreadsheet Loader Module
//! Reads the first sheet of an uploaded workbook into a Polars DataFrame.

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Spreadsheet contains no sheets")]
    NoSheets,
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

/// Loads uploaded `.xlsx` / `.xls` bytes. The first row is the header.
pub struct SheetLoader;

impl SheetLoader {
    /// Parse the first sheet of a workbook held in memory.
    pub fn load_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoaderError::NoSheets)??;

        Self::range_to_dataframe(&range)
    }

    /// Convert a cell range into a DataFrame, one column per header cell.
    /// An empty sheet gives a frame with no columns.
    pub fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame, LoaderError> {
        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            tracing::debug!("first sheet is empty");
            return Ok(DataFrame::empty());
        };
        let names = Self::header_names(header);
        let body: Vec<&[Data]> = rows.collect();

        let columns = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&Data> = body
                    .iter()
                    .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                    .collect();
                Self::build_column(name, &cells)
            })
            .collect();

        let df = DataFrame::new(columns)?;
        tracing::debug!(
            "loaded sheet: {} rows, columns {:?}",
            df.height(),
            Self::get_columns(&df)
        );
        Ok(df)
    }

    /// Normalise header cells: blanks become `Unnamed: {idx}`, repeats get a `.n` suffix.
    pub fn header_names(header: &[Data]) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();

        header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let raw = match cell {
                    Data::Empty => String::new(),
                    other => other.to_string().trim().to_string(),
                };
                let base = if raw.is_empty() {
                    format!("Unnamed: {}", idx)
                } else {
                    raw
                };

                let count = seen.entry(base.clone()).or_insert(0);
                let name = if *count == 0 {
                    base
                } else {
                    format!("{}.{}", base, count)
                };
                *count += 1;
                name
            })
            .collect()
    }

    /// All-number columns become Float64, anything else becomes String.
    fn build_column(name: &str, cells: &[&Data]) -> Column {
        let numeric: Option<Vec<Option<f64>>> = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(v) => Some(Some(*v as f64)),
                Data::Float(v) => Some(Some(*v)),
                c if Self::is_blank(c) => Some(None),
                _ => None,
            })
            .collect();

        match numeric {
            Some(values) => Column::new(name.into(), values),
            None => {
                let values: Vec<Option<String>> = cells
                    .iter()
                    .map(|cell| {
                        if Self::is_blank(cell) {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect();
                Column::new(name.into(), values)
            }
        }
    }

    fn is_blank(cell: &Data) -> bool {
        match cell {
            Data::Empty => true,
            Data::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Get list of column names.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
