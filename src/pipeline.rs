//! Upload Pipeline
//! Ingest → Validate → Transform → Render → Export, run once per upload.

use crate::charts::{ChartData, ChartImage, ChartRenderer, RenderError};
use crate::config::AppConfig;
use crate::data::{
    schema, LoaderError, ProcessorError, SchemaError, SheetLoader, TradeProcessor, TradeTable,
};
use crate::export::{Download, ExportError, Exporter};
use crate::stats::TradeSummary;
use polars::prelude::PolarsError;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Transform(#[from] ProcessorError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Table error: {0}")]
    Table(#[from] PolarsError),
}

impl PipelineError {
    /// Recoverable input problems the user fixes by uploading a different file.
    pub fn is_user_error(&self) -> bool {
        matches!(self, PipelineError::Schema(_))
    }
}

/// Everything derived from the table, before the chart is rasterised.
#[derive(Debug, Clone)]
pub struct TradeAnalysis {
    pub table: TradeTable,
    pub chart_data: ChartData,
    pub summary: TradeSummary,
    pub data_download: Download,
}

/// Complete result of one upload.
#[derive(Debug, Clone)]
pub struct TradeReport {
    pub table: TradeTable,
    pub chart_data: ChartData,
    pub summary: TradeSummary,
    pub chart: ChartImage,
    pub chart_download: Download,
    pub data_download: Download,
}

/// Stateless upload handler; holds configuration only.
#[derive(Debug, Clone, Default)]
pub struct TradePipeline {
    config: AppConfig,
}

impl TradePipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline for one uploaded file.
    pub fn handle_upload(&self, bytes: &[u8]) -> Result<TradeReport, PipelineError> {
        let start = Instant::now();
        let analysis = self.analyze(bytes)?;
        let report = self.render(analysis)?;
        tracing::info!(
            "upload processed: {} rows in {:.1?}",
            report.table.height(),
            start.elapsed()
        );
        Ok(report)
    }

    /// Ingest, validate and transform; derive chart data, summary and CSV.
    pub fn analyze(&self, bytes: &[u8]) -> Result<TradeAnalysis, PipelineError> {
        let df = SheetLoader::load_bytes(bytes)?;
        tracing::info!(
            "ingested {} bytes: {} rows, {} columns",
            bytes.len(),
            df.height(),
            df.width()
        );

        schema::validate(&df, &self.config.columns)?;

        let table = TradeProcessor::transform(&df, &self.config.columns)?;
        let chart_data = ChartData::from_table(&table)?;
        let summary = TradeSummary::from_table(&table, self.config.chart.year)?;
        let data_download = Exporter::table_csv(&table)?;
        tracing::info!(
            "transformed {} rows; deficit total {}",
            table.height(),
            summary.deficit_total
        );

        Ok(TradeAnalysis {
            table,
            chart_data,
            summary,
            data_download,
        })
    }

    /// Rasterise the chart and attach the PNG download.
    pub fn render(&self, analysis: TradeAnalysis) -> Result<TradeReport, PipelineError> {
        let chart = ChartRenderer::render(&analysis.chart_data, &self.config.chart)?;
        let chart_download = Exporter::chart_png(&chart);

        Ok(TradeReport {
            table: analysis.table,
            chart_data: analysis.chart_data,
            summary: analysis.summary,
            chart,
            chart_download,
            data_download: analysis.data_download,
        })
    }
}
