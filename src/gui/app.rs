//! Trade Chart Main Application
//! Main window with control panel and report view.

use crate::gui::{ControlPanel, ControlPanelAction, ReportError, ReportView, Status};
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use trade_chart::export::{Download, Exporter};
use trade_chart::{AppConfig, TradePipeline, TradeReport};

/// Pipeline result from background thread
enum RunResult {
    Progress(String),
    Complete(Box<TradeReport>),
    Error { message: String, user_error: bool },
}

/// Main application window.
pub struct TradeChartApp {
    pipeline: TradePipeline,
    control_panel: ControlPanel,
    report_view: ReportView,

    // Async pipeline run
    run_rx: Option<Receiver<RunResult>>,
    is_running: bool,
}

impl TradeChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self {
            control_panel: ControlPanel::new(&config.columns),
            pipeline: TradePipeline::new(config),
            report_view: ReportView::new(),
            run_rx: None,
            is_running: false,
        }
    }

    /// Handle file upload: pick a workbook and process it in the background.
    fn handle_upload(&mut self) {
        if self.is_running {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel Files", &["xlsx", "xls"])
            .pick_file()
        else {
            return;
        };

        self.report_view.clear();
        self.control_panel.downloads_enabled = false;
        self.control_panel.file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.control_panel
            .set_status(Status::Running("Reading file...".to_string()));
        self.is_running = true;

        let (tx, rx) = channel();
        self.run_rx = Some(rx);
        let pipeline = self.pipeline.clone();

        thread::spawn(move || Self::run_pipeline(tx, pipeline, path));
    }

    /// Run the pipeline (called from background thread)
    fn run_pipeline(tx: Sender<RunResult>, pipeline: TradePipeline, path: PathBuf) {
        let bytes = match std::fs::read(&path).with_context(|| format!("reading {}", path.display())) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("{:#}", e);
                let _ = tx.send(RunResult::Error {
                    message: format!("{:#}", e),
                    user_error: false,
                });
                return;
            }
        };

        let _ = tx.send(RunResult::Progress("Processing spreadsheet...".to_string()));

        let result = match pipeline.handle_upload(&bytes) {
            Ok(report) => RunResult::Complete(Box::new(report)),
            Err(e) => {
                tracing::error!("pipeline failed for {}: {}", path.display(), e);
                RunResult::Error {
                    message: e.to_string(),
                    user_error: e.is_user_error(),
                }
            }
        };
        let _ = tx.send(result);
    }

    /// Check for pipeline results
    fn check_run_results(&mut self) {
        let Some(rx) = self.run_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                RunResult::Progress(status) => {
                    self.control_panel.set_status(Status::Running(status));
                }
                RunResult::Complete(report) => {
                    let rows = report.table.height();
                    self.report_view.set_report(*report);
                    self.control_panel.downloads_enabled = true;
                    self.control_panel
                        .set_status(Status::Done(format!("Complete! {} countries", rows)));
                    self.is_running = false;
                    should_keep_receiver = false;
                }
                RunResult::Error { message, user_error } => {
                    self.control_panel
                        .set_status(Status::Failed(format!("Error: {}", message)));
                    self.report_view.set_error(ReportError {
                        message,
                        user_error,
                    });
                    self.is_running = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.run_rx = Some(rx);
        }
    }

    /// Handle a download button: ask for a location and write the artifact.
    fn handle_save(&mut self, pick: fn(&TradeReport) -> &Download) {
        let Some(report) = &self.report_view.report else {
            self.control_panel
                .set_status(Status::Failed("Nothing to download".to_string()));
            return;
        };
        let download = pick(report);

        let extension = Path::new(download.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(download.mime, &[extension])
            .set_file_name(download.file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let status = match Exporter::save(download, &path) {
            Ok(()) => Status::Done(format!("Saved {}", path.display())),
            Err(e) => {
                tracing::error!("{:#}", e);
                Status::Failed(format!("Error: {:#}", e))
            }
        };
        self.control_panel.set_status(status);
    }
}

impl eframe::App for TradeChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_run_results();

        if self.is_running {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Upload => self.handle_upload(),
                        ControlPanelAction::SaveChart => {
                            self.handle_save(|report| &report.chart_download)
                        }
                        ControlPanelAction::SaveData => {
                            self.handle_save(|report| &report.data_download)
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report View
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(ctx, ui);
        });
    }
}
