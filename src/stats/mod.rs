//! Stats module - aggregate summary statistic

mod summary;

pub use summary::{format_thousands, TradeSummary};
