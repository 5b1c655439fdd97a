//! Trade Balance Chart Generator
//!
//! Reads a TradeMap spreadsheet export, derives `Export Value = Import Value +
//! Trade Balance` per country, renders a grouped export/import bar chart and
//! produces PNG and CSV downloads plus a one-line deficit summary.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;
pub use pipeline::{PipelineError, TradeAnalysis, TradePipeline, TradeReport};
