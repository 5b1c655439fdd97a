//! Data module - spreadsheet loading, column validation and transformation

mod loader;
mod processor;
pub mod schema;
mod table;

pub use loader::{LoaderError, SheetLoader};
pub use processor::{ProcessorError, TradeProcessor};
pub use schema::SchemaError;
pub use table::{TradeRecord, TradeTable, COUNTRY, EXPORT_VALUE, IMPORT_VALUE, TRADE_BALANCE};
