//! Control Panel Widget
//! Left side panel: upload, downloads and run status.

use egui::{Color32, RichText};
use trade_chart::config::ColumnMapping;

/// Run status shown under the buttons.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Running(String),
    Done(String),
    Failed(String),
}

/// Left side control panel with file upload and download buttons.
pub struct ControlPanel {
    pub file_name: Option<String>,
    pub required_columns: Vec<String>,
    pub status: Status,
    pub downloads_enabled: bool,
}

impl ControlPanel {
    pub fn new(columns: &ColumnMapping) -> Self {
        Self {
            file_name: None,
            required_columns: columns.required().iter().map(|s| s.to_string()).collect(),
            status: Status::Idle,
            downloads_enabled: false,
        }
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let running = matches!(self.status, Status::Running(_));

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Trade Balance Chart Generator")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Upload Section =====
        ui.label(RichText::new("📁 Excel File").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new("Upload a TradeMap export (.xlsx / .xls) with the columns:")
                .size(11.0)
                .color(Color32::GRAY),
        );
        for name in &self.required_columns {
            ui.label(RichText::new(format!("• {}", name)).size(11.0));
        }
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let (text, color) = match &self.file_name {
                        Some(name) => (name.clone(), ui.visuals().text_color()),
                        None => ("No file selected".to_string(), Color32::GRAY),
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!running, |ui| {
                            if ui.button("📂 Upload").clicked() {
                                action = ControlPanelAction::Upload;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Downloads =====
        ui.label(RichText::new("💾 Downloads").size(14.0).strong());
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.downloads_enabled && !running, |ui| {
                let chart_button = egui::Button::new(RichText::new("Download chart as PNG").size(14.0))
                    .min_size(egui::vec2(220.0, 30.0));
                if ui.add(chart_button).clicked() {
                    action = ControlPanelAction::SaveChart;
                }

                ui.add_space(6.0);

                let data_button =
                    egui::Button::new(RichText::new("Download data for Excel (CSV)").size(14.0))
                        .min_size(egui::vec2(220.0, 30.0));
                if ui.add(data_button).clicked() {
                    action = ControlPanelAction::SaveData;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📋 Status").size(14.0).strong());
        ui.add_space(5.0);

        match &self.status {
            Status::Idle => {
                ui.label(RichText::new("Ready").size(11.0).color(Color32::GRAY));
            }
            Status::Running(text) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(text).size(11.0));
                });
            }
            Status::Done(text) => {
                ui.label(
                    RichText::new(text)
                        .size(11.0)
                        .color(Color32::from_rgb(40, 167, 69)),
                );
            }
            Status::Failed(text) => {
                ui.label(
                    RichText::new(text)
                        .size(11.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Upload,
    SaveChart,
    SaveData,
}
