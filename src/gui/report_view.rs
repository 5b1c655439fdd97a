//! Report View Widget
//! Central panel: data preview, rendered chart and summary sentence.

use egui::{Color32, RichText, ScrollArea, TextureHandle};
use trade_chart::data::{TradeRecord, COUNTRY, EXPORT_VALUE, IMPORT_VALUE, TRADE_BALANCE};
use trade_chart::TradeReport;

const PREVIEW_HEIGHT: f32 = 260.0;

/// Inline error shown instead of a report.
pub struct ReportError {
    pub message: String,
    /// Missing columns and similar input problems, as opposed to failures
    pub user_error: bool,
}

#[derive(Default)]
pub struct ReportView {
    pub report: Option<TradeReport>,
    rows: Vec<TradeRecord>,
    texture: Option<TextureHandle>,
    error: Option<ReportError>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.report = None;
        self.rows.clear();
        self.texture = None;
        self.error = None;
    }

    pub fn set_report(&mut self, report: TradeReport) {
        self.clear();
        match report.table.records() {
            Ok(rows) => self.rows = rows,
            Err(e) => tracing::error!("failed to read preview rows: {}", e),
        }
        self.report = Some(report);
    }

    pub fn set_error(&mut self, error: ReportError) {
        self.clear();
        self.error = Some(error);
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            Self::draw_error(ui, error);
            return;
        }

        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Upload an Excel file to begin").size(20.0));
            });
            return;
        };

        let texture = self.texture.get_or_insert_with(|| {
            let image = egui::ColorImage::from_rgb(
                [report.chart.width as usize, report.chart.height as usize],
                &report.chart.rgb,
            );
            ctx.load_texture("trade_chart", image, egui::TextureOptions::LINEAR)
        });

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new("Data Preview").size(18.0).strong());
                ui.add_space(6.0);
                Self::draw_preview(ui, &self.rows);

                ui.add_space(15.0);
                ui.label(RichText::new("Trade Balance Chart").size(18.0).strong());
                ui.add_space(6.0);
                ui.add(
                    egui::Image::from_texture(&*texture)
                        .max_width(ui.available_width())
                        .shrink_to_fit(),
                );

                ui.add_space(15.0);
                egui::Frame::none()
                    .fill(Color32::from_rgb(221, 235, 247))
                    .rounding(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(report.summary.message())
                                .size(14.0)
                                .color(Color32::from_rgb(31, 78, 121)),
                        );
                    });
            });
    }

    fn draw_preview(ui: &mut egui::Ui, rows: &[TradeRecord]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt("data_preview")
                    .max_height(PREVIEW_HEIGHT)
                    .show(ui, |ui| {
                        egui::Grid::new("data_preview_grid")
                            .striped(true)
                            .min_col_width(90.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for header in [COUNTRY, IMPORT_VALUE, TRADE_BALANCE, EXPORT_VALUE] {
                                    ui.label(RichText::new(header).strong().size(12.0));
                                }
                                ui.end_row();

                                for row in rows {
                                    ui.label(RichText::new(&row.country).size(12.0));
                                    for value in [row.import_value, row.trade_balance, row.export_value] {
                                        ui.label(RichText::new(Self::cell_text(value)).size(12.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    fn cell_text(value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    fn draw_error(ui: &mut egui::Ui, error: &ReportError) {
        let (fill, text) = if error.user_error {
            (Color32::from_rgb(255, 243, 205), Color32::from_rgb(133, 100, 4))
        } else {
            (Color32::from_rgb(248, 215, 218), Color32::from_rgb(114, 28, 36))
        };

        ui.add_space(10.0);
        egui::Frame::none()
            .fill(fill)
            .rounding(6.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&error.message).size(14.0).color(text));
            });
    }
}
