//! Download Export Module
//! Builds the chart PNG and table CSV download artifacts.

use crate::charts::ChartImage;
use crate::data::{TradeTable, COUNTRY, EXPORT_VALUE, IMPORT_VALUE};
use anyhow::Context;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const CHART_FILE_NAME: &str = "trade_balance_chart.png";
pub const CHART_MIME: &str = "image/png";
pub const DATA_FILE_NAME: &str = "trade_balance_data.csv";
pub const DATA_MIME: &str = "text/csv";

/// CSV columns, matching the two chart series. `Trade Balance` is left out.
pub const EXPORT_COLUMNS: [&str; 3] = [COUNTRY, EXPORT_VALUE, IMPORT_VALUE];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// A file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub struct Exporter;

impl Exporter {
    pub fn chart_png(chart: &ChartImage) -> Download {
        Download {
            file_name: CHART_FILE_NAME,
            mime: CHART_MIME,
            bytes: chart.png.clone(),
        }
    }

    /// Comma separated, header row, no index column, table row order.
    /// A value column holding only whole numbers is written without `.0`.
    pub fn table_csv(table: &TradeTable) -> Result<Download, ExportError> {
        let mut subset = table.dataframe().select(EXPORT_COLUMNS)?;
        for name in [EXPORT_VALUE, IMPORT_VALUE] {
            if Self::is_whole_column(subset.column(name)?)? {
                let as_int = subset.column(name)?.cast(&DataType::Int64)?;
                subset.with_column(as_int)?;
            }
        }

        let mut bytes = Vec::new();
        CsvWriter::new(&mut bytes)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut subset)?;

        Ok(Download {
            file_name: DATA_FILE_NAME,
            mime: DATA_MIME,
            bytes,
        })
    }

    /// No blanks, and every value an integer that fits in `i64`.
    fn is_whole_column(column: &Column) -> PolarsResult<bool> {
        Ok(column
            .f64()?
            .into_iter()
            .all(|v| matches!(v, Some(x) if x.fract() == 0.0 && x.abs() < 9.0e15)))
    }

    /// Write a download to disk.
    pub fn save(download: &Download, path: &Path) -> anyhow::Result<()> {
        let mut file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        file.write_all(&download.bytes)
            .with_context(|| format!("writing {}", path.display()))?;

        tracing::info!(
            "saved {} ({} bytes) to {}",
            download.file_name,
            download.bytes.len(),
            path.display()
        );
        Ok(())
    }
}
