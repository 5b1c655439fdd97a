//! Trade Balance Chart Generator - desktop front end
//!
//! Upload a TradeMap Excel export, preview the derived table and chart, and
//! save the PNG / CSV downloads.

mod gui;

use eframe::egui;
use gui::TradeChartApp;
use std::path::Path;
use trade_chart::config::{AppConfig, CONFIG_FILE_NAME};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    tracing::info!("starting Trade Balance Chart Generator");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Trade Balance Chart Generator"),
        ..Default::default()
    };

    eframe::run_native(
        "Trade Balance Chart Generator",
        options,
        Box::new(move |cc| Ok(Box::new(TradeChartApp::new(cc, config)))),
    )
}
