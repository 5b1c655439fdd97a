//! Static Chart Renderer
//! Draws the grouped export/import bar chart with plotters and encodes it as PNG.
//!
//! Layout:
//! 1. Title right-aligned above the plot
//! 2. Plot: green export bar left of each country tick, red import bar right of it
//! 3. Legend in the upper-left corner of the plot
//! 4. Country labels rotated 45°, right end at the tick; the bottom label
//!    area is sized from the longest label before drawing

use crate::charts::layout::{ChartData, Series};
use crate::config::ChartSettings;
use crate::stats::format_thousands;
use image::{ImageFormat, Rgb, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::FRAC_1_SQRT_2;
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 20;
const AXIS_DESC_SIZE: u32 = 17;
const TICK_SIZE: u32 = 14;

const MARGIN: u32 = 15;
const TITLE_AREA: u32 = 45;
const Y_LABEL_AREA: u32 = 95;
const TICK_LEN: i32 = 5;
/// Blank pixels around each label bitmap.
const LABEL_PAD: u32 = 2;

const MIN_CANVAS: u32 = 200;
const MAX_CANVAS: u32 = 8192;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Canvas {0}x{1} is outside the supported size")]
    Canvas(u32, u32),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Byte length of a packed RGB buffer.
fn rgb_len(width: u32, height: u32) -> Result<usize, RenderError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or(RenderError::Canvas(width, height))
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Rendered chart: raw RGB pixels for display plus the encoded PNG.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub png: Vec<u8>,
}

/// Category label waiting to be rotated onto the canvas.
struct PendingLabel {
    text: String,
    size: (u32, u32),
    anchor: (i32, i32),
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the chart at the configured canvas size.
    pub fn render(data: &ChartData, settings: &ChartSettings) -> Result<ChartImage, RenderError> {
        let (width, height) = (settings.width, settings.height);
        let in_range = |side: u32| (MIN_CANVAS..=MAX_CANVAS).contains(&side);
        if !in_range(width) || !in_range(height) {
            return Err(RenderError::Canvas(width, height));
        }

        let tick_style = Self::font(TICK_SIZE).color(&BLACK);
        let mut rgb = vec![255u8; rgb_len(width, height)?];
        let labels = Self::draw_plot(&mut rgb, data, settings, &tick_style)?;

        let mut canvas =
            RgbImage::from_raw(width, height, rgb).ok_or(RenderError::Canvas(width, height))?;
        for label in &labels {
            let bitmap = Self::render_label(&label.text, label.size, &tick_style)?;
            blit_rotated_45(&mut canvas, &bitmap, label.anchor);
        }

        let mut png = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        tracing::info!(
            "rendered chart {}x{} with {} categories ({} bytes PNG)",
            width,
            height,
            data.len(),
            png.len()
        );

        Ok(ChartImage {
            width,
            height,
            rgb: canvas.into_raw(),
            png,
        })
    }

    /// Draw everything except the rotated category labels, whose anchors are returned.
    fn draw_plot(
        buffer: &mut [u8],
        data: &ChartData,
        settings: &ChartSettings,
        tick_style: &TextStyle,
    ) -> Result<Vec<PendingLabel>, RenderError> {
        let (width, height) = (settings.width, settings.height);
        let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        // Tight layout: size the bottom area from the rotated label extents.
        let mut sizes = Vec::with_capacity(data.len());
        for text in &data.categories {
            sizes.push(root.estimate_text_size(text, tick_style).map_err(draw_err)?);
        }
        let desc_style = Self::font(AXIS_DESC_SIZE).color(&BLACK);
        let (_, desc_h) = root.estimate_text_size("Country", &desc_style).map_err(draw_err)?;
        let rotated_extent = sizes
            .iter()
            .map(|(w, h)| ((w + h + 2 * LABEL_PAD) as f64 * FRAC_1_SQRT_2).ceil() as u32)
            .max()
            .unwrap_or(0);
        let x_label_area = (rotated_extent + TICK_LEN as u32 + desc_h + 20).min(height / 2);

        let title_style = Self::font(TITLE_SIZE)
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Top));
        root.draw(&Text::new(
            settings.title(),
            ((width - MARGIN) as i32, 12),
            title_style,
        ))
        .map_err(draw_err)?;

        let (x_lo, x_hi) = data.category_range(settings.bar_width);
        let (y_lo, y_hi) = data.value_range();

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .margin_top(TITLE_AREA)
            .x_label_area_size(x_label_area)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
            .y_label_formatter(&|v| format_thousands(*v))
            .label_style((FONT, TICK_SIZE))
            .y_desc("Value (USD thousand)")
            .axis_desc_style((FONT, AXIS_DESC_SIZE))
            .draw()
            .map_err(draw_err)?;

        let bars = data.bars(settings.bar_width);
        for series in Series::ALL {
            let color = series.color();
            chart
                .draw_series(
                    bars.iter()
                        .filter(|bar| bar.series == series)
                        .map(|bar| Rectangle::new([(bar.x0, 0.0), (bar.x1, bar.value)], color.filled())),
                )
                .map_err(draw_err)?
                .label(series.label())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 18, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, TICK_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(draw_err)?;

        // Category ticks and label anchors
        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        let axis_y = y_px.end;
        let mut labels = Vec::with_capacity(data.len());
        for (idx, (text, size)) in data.categories.iter().zip(sizes).enumerate() {
            let (tick_x, _) = chart.backend_coord(&(idx as f64, y_lo));
            root.draw(&PathElement::new(
                vec![(tick_x, axis_y), (tick_x, axis_y + TICK_LEN)],
                BLACK,
            ))
            .map_err(draw_err)?;

            let half_h = (size.1 + 2 * LABEL_PAD) as f64 / 2.0 * FRAC_1_SQRT_2;
            labels.push(PendingLabel {
                text: text.clone(),
                size,
                anchor: (
                    (tick_x as f64 - half_h).round() as i32,
                    (axis_y as f64 + TICK_LEN as f64 + 2.0 + half_h).round() as i32,
                ),
            });
        }

        // x-axis description, right end at the axis centre
        let desc_x = (x_px.start + x_px.end) / 2;
        root.draw(&Text::new(
            "Country",
            (desc_x, height as i32 - MARGIN as i32),
            desc_style.pos(Pos::new(HPos::Right, VPos::Bottom)),
        ))
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(labels)
    }

    fn font(size: u32) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, size as f64, FontStyle::Normal)
    }

    /// Draw one label horizontally into its own bitmap.
    fn render_label(
        text: &str,
        size: (u32, u32),
        style: &TextStyle,
    ) -> Result<RgbImage, RenderError> {
        let (w, h) = (size.0 + 2 * LABEL_PAD, size.1 + 2 * LABEL_PAD);
        let mut buffer = vec![255u8; rgb_len(w, h)?];
        {
            let area = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            area.fill(&WHITE).map_err(draw_err)?;
            area.draw(&Text::new(
                text,
                (LABEL_PAD as i32, LABEL_PAD as i32),
                style.clone(),
            ))
            .map_err(draw_err)?;
            area.present().map_err(draw_err)?;
        }
        RgbImage::from_raw(w, h, buffer).ok_or(RenderError::Canvas(w, h))
    }
}

/// Composite `label` onto `canvas` rotated 45° counter-clockwise, with the
/// middle of the label's right edge at `anchor`. Dark pixels win.
pub fn blit_rotated_45(canvas: &mut RgbImage, label: &RgbImage, anchor: (i32, i32)) {
    let (lw, lh) = (label.width() as f64, label.height() as f64);
    let (c, s) = (FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    let (ax, ay) = (anchor.0 as f64, anchor.1 as f64);

    // Text runs along (c, -s); "down" in the label is (s, c).
    let to_canvas = |u: f64, v: f64| {
        (
            ax + (u - lw) * c + (v - lh / 2.0) * s,
            ay - (u - lw) * s + (v - lh / 2.0) * c,
        )
    };
    let corners = [
        to_canvas(0.0, 0.0),
        to_canvas(lw, 0.0),
        to_canvas(0.0, lh),
        to_canvas(lw, lh),
    ];
    let min_x = corners.iter().map(|p| p.0).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_x = corners.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;
    let min_y = corners.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_y = corners.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;

    let x_range = min_x.max(0)..max_x.min(canvas.width() as i64);
    let y_range = min_y.max(0)..max_y.min(canvas.height() as i64);

    for cy in y_range {
        for cx in x_range.clone() {
            let qx = cx as f64 + 0.5 - ax;
            let qy = cy as f64 + 0.5 - ay;
            let u = qx * c - qy * s + lw;
            let v = qx * s + qy * c + lh / 2.0;
            if u < 0.0 || v < 0.0 || u >= lw || v >= lh {
                continue;
            }

            let src = label.get_pixel(u as u32, v as u32);
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            *dst = Rgb([
                dst[0].min(src[0]),
                dst[1].min(src[1]),
                dst[2].min(src[2]),
            ]);
        }
    }
}
