//! Chart Layout Module
//! Series data, bar geometry and axis ranges for the grouped bar chart.

use crate::data::TradeTable;
use plotters::style::RGBColor;
use polars::prelude::PolarsResult;

/// `#008000`
pub const EXPORT_COLOR: RGBColor = RGBColor(0, 128, 0);
/// `#FF0000`
pub const IMPORT_COLOR: RGBColor = RGBColor(255, 0, 0);

/// Fraction of the data span added on each side of an axis.
const AXIS_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Exports,
    Imports,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Exports, Series::Imports];

    pub fn label(self) -> &'static str {
        match self {
            Series::Exports => "Exports (calculated)",
            Series::Imports => "Imports",
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            Series::Exports => EXPORT_COLOR,
            Series::Imports => IMPORT_COLOR,
        }
    }
}

/// One bar in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub series: Series,
    pub category: usize,
    pub x0: f64,
    pub x1: f64,
    pub value: f64,
}

/// Chart input: categories and both series, in table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub export_values: Vec<Option<f64>>,
    pub import_values: Vec<Option<f64>>,
}

impl ChartData {
    pub fn from_table(table: &TradeTable) -> PolarsResult<Self> {
        Ok(Self {
            categories: table.countries()?,
            export_values: table.export_values()?,
            import_values: table.import_values()?,
        })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn values(&self, series: Series) -> &[Option<f64>] {
        match series {
            Series::Exports => &self.export_values,
            Series::Imports => &self.import_values,
        }
    }

    /// Side-by-side bars: exports left of the category centre, imports right.
    /// Blank or non-finite values produce no bar.
    pub fn bars(&self, bar_width: f64) -> Vec<Bar> {
        let mut bars = Vec::with_capacity(self.len() * 2);

        for series in Series::ALL {
            let offset = match series {
                Series::Exports => -bar_width / 2.0,
                Series::Imports => bar_width / 2.0,
            };

            for (category, value) in self.values(series).iter().enumerate() {
                let Some(value) = value.filter(|v| v.is_finite()) else {
                    continue;
                };
                let center = category as f64 + offset;
                bars.push(Bar {
                    series,
                    category,
                    x0: center - bar_width / 2.0,
                    x1: center + bar_width / 2.0,
                    value,
                });
            }
        }

        bars
    }

    /// Category axis range covering all bars plus padding.
    pub fn category_range(&self, bar_width: f64) -> (f64, f64) {
        if self.is_empty() {
            return (-0.5, 0.5);
        }
        let lo = -bar_width;
        let hi = (self.len() - 1) as f64 + bar_width;
        let pad = (hi - lo) * AXIS_PADDING;
        (lo - pad, hi + pad)
    }

    /// Value axis range; always includes zero.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .export_values
            .iter()
            .chain(self.import_values.iter())
            .flatten()
            .filter(|v| v.is_finite())
            .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        if max - min <= f64::EPSILON {
            return (0.0, 1.0);
        }

        let pad = (max - min) * AXIS_PADDING;
        let lo = if min < 0.0 { min - pad } else { 0.0 };
        let hi = if max > 0.0 { max + pad } else { 0.0 };
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::Color;

    fn data() -> ChartData {
        ChartData {
            categories: vec!["A".to_string(), "B".to_string()],
            export_values: vec![Some(80.0), Some(55.0)],
            import_values: vec![Some(100.0), Some(50.0)],
        }
    }

    #[test]
    fn bars_do_not_overlap_and_keep_category_order() {
        let bars = data().bars(0.35);
        assert_eq!(bars.len(), 4);

        for category in 0..2 {
            let export = bars
                .iter()
                .find(|b| b.category == category && b.series == Series::Exports)
                .unwrap();
            let import = bars
                .iter()
                .find(|b| b.category == category && b.series == Series::Imports)
                .unwrap();

            let center = category as f64;
            assert!((export.x0 - (center - 0.35)).abs() < 1e-12);
            assert!((export.x1 - center).abs() < 1e-12);
            assert!((import.x0 - center).abs() < 1e-12);
            assert!((import.x1 - (center + 0.35)).abs() < 1e-12);
            assert!(export.x1 <= import.x0);
        }

        let export_values: Vec<f64> = bars
            .iter()
            .filter(|b| b.series == Series::Exports)
            .map(|b| b.value)
            .collect();
        assert_eq!(export_values, vec![80.0, 55.0]);
    }

    #[test]
    fn blank_values_have_no_bar() {
        let mut d = data();
        d.export_values[1] = None;
        d.import_values[0] = Some(f64::NAN);
        assert_eq!(d.bars(0.35).len(), 2);
    }

    #[test]
    fn value_range_includes_zero() {
        let (lo, hi) = data().value_range();
        assert_eq!(lo, 0.0);
        assert!((hi - 105.0).abs() < 1e-9);

        let negative = ChartData {
            categories: vec!["A".to_string()],
            export_values: vec![Some(-40.0)],
            import_values: vec![Some(60.0)],
        };
        let (lo, hi) = negative.value_range();
        assert!((lo - -45.0).abs() < 1e-9);
        assert!((hi - 65.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_ranges_fall_back() {
        let empty = ChartData::default();
        assert_eq!(empty.value_range(), (0.0, 1.0));
        assert_eq!(empty.category_range(0.35), (-0.5, 0.5));

        let (lo, hi) = data().category_range(0.35);
        assert!(lo < -0.35 && hi > 1.35);
    }

    #[test]
    fn series_styling() {
        assert_eq!(Series::Exports.color().rgb(), (0, 128, 0));
        assert_eq!(Series::Imports.color().rgb(), (255, 0, 0));
        assert_eq!(Series::Exports.label(), "Exports (calculated)");
        assert_eq!(Series::Imports.label(), "Imports");
    }
}
