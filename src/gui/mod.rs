//! GUI module - User interface components

mod app;
mod control_panel;
mod report_view;

pub use app::TradeChartApp;
pub use control_panel::{ControlPanel, ControlPanelAction, Status};
pub use report_view::{ReportError, ReportView};
