//! Column presence check against the configured source headers.

use crate::config::ColumnMapping;
use polars::prelude::DataFrame;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Excel file must contain columns: {}", .required.join(", "))]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },
}

/// Fail unless every required source column is present.
pub fn validate(df: &DataFrame, mapping: &ColumnMapping) -> Result<(), SchemaError> {
    let present = df.get_column_names();
    let required = mapping.required();

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !present.iter().any(|p| p.as_str() == **name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    tracing::warn!("upload rejected, missing columns {:?}", missing);
    Err(SchemaError::MissingColumns {
        required: required.iter().map(|s| s.to_string()).collect(),
        missing,
    })
}
