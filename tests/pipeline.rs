#[path = "../src/test_support.rs"]
mod test_support;

use test_support::{trademap_bytes, xlsx_bytes, Cell, BALANCE, IMPORTED, IMPORTERS};
use pretty_assertions::assert_eq;
use trade_chart::config::{AppConfig, ColumnMapping};
use trade_chart::data::SchemaError;
use trade_chart::export::{CHART_FILE_NAME, CHART_MIME};
use trade_chart::{PipelineError, TradePipeline};

fn csv_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn two_country_scenario() {
    let bytes = trademap_bytes(&[("A", 100.0, -20.0), ("B", 50.0, 5.0)]);
    let analysis = TradePipeline::default().analyze(&bytes).unwrap();

    assert_eq!(
        analysis.table.export_values().unwrap(),
        vec![Some(80.0), Some(55.0)]
    );
    assert_eq!(analysis.summary.excess(), 20.0);
    assert_eq!(
        analysis.summary.message(),
        "The trade balance for this product was negative in 2024, and imports exceeded exports by $20 (USD thousand)."
    );
}

#[test]
fn summary_ignores_positive_balances() {
    let bytes = trademap_bytes(&[("A", 10.0, -5.0), ("B", 10.0, 10.0), ("C", 10.0, -3.0)]);
    let analysis = TradePipeline::default().analyze(&bytes).unwrap();
    assert_eq!(analysis.summary.excess(), 8.0);
}

#[test]
fn export_value_holds_for_every_row() {
    let rows: Vec<(String, f64, f64)> = (0..40)
        .map(|i| {
            let i = i as f64;
            (format!("Country {}", i), 1000.0 + i * 37.5, 250.0 - i * 19.25)
        })
        .collect();
    let borrowed: Vec<(&str, f64, f64)> = rows
        .iter()
        .map(|(c, a, b)| (c.as_str(), *a, *b))
        .collect();

    let analysis = TradePipeline::default().analyze(&trademap_bytes(&borrowed)).unwrap();

    let records = analysis.table.records().unwrap();
    assert_eq!(records.len(), rows.len());
    for (record, (_, imported, balance)) in records.iter().zip(&rows) {
        assert_eq!(record.import_value, Some(*imported));
        assert_eq!(record.trade_balance, Some(*balance));
        assert_eq!(record.export_value, Some(imported + balance));
    }
}

#[test]
fn row_order_is_preserved() {
    let bytes = trademap_bytes(&[
        ("Zimbabwe", 3.0, 1.0),
        ("Angola", 2.0, -1.0),
        ("Nepal", 1.0, 0.0),
    ]);
    let analysis = TradePipeline::default().analyze(&bytes).unwrap();

    let expected = vec!["Zimbabwe", "Angola", "Nepal"];
    assert_eq!(analysis.table.countries().unwrap(), expected);
    assert_eq!(analysis.chart_data.categories, expected);

    let lines = csv_lines(&analysis.data_download.bytes);
    let csv_countries: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(csv_countries, expected);
}

#[test]
fn csv_download_has_exactly_three_columns() {
    let bytes = trademap_bytes(&[("A", 100.0, -20.0), ("B", 50.0, 5.0)]);
    let analysis = TradePipeline::default().analyze(&bytes).unwrap();

    assert_eq!(analysis.data_download.file_name, "trade_balance_data.csv");
    assert_eq!(analysis.data_download.mime, "text/csv");

    let lines = csv_lines(&analysis.data_download.bytes);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Country,Export Value,Import Value");

    assert_eq!(lines[1], "A,80,100");
    assert_eq!(lines[2], "B,55,50");
}

#[test]
fn missing_any_required_column_is_rejected() {
    let all = [IMPORTERS, IMPORTED, BALANCE];

    for skip in 0..all.len() {
        let headers: Vec<&str> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, h)| *h)
            .collect();
        let bytes = xlsx_bytes(&headers, &[vec![Cell::Text("A"), Cell::Num(1.0)]]);

        let err = TradePipeline::default().analyze(&bytes).unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            format!("Excel file must contain columns: {}, {}, {}", IMPORTERS, IMPORTED, BALANCE)
        );
        match err {
            PipelineError::Schema(SchemaError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec![all[skip].to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

#[test]
fn empty_sheet_is_rejected_like_missing_columns() {
    let err = TradePipeline::default()
        .analyze(&xlsx_bytes(&[], &[]))
        .unwrap_err();

    assert!(err.is_user_error());
    assert_eq!(
        err.to_string(),
        format!("Excel file must contain columns: {}, {}, {}", IMPORTERS, IMPORTED, BALANCE)
    );
}

#[test]
fn reanalysis_is_idempotent() {
    let bytes = trademap_bytes(&[("A", 100.5, -20.25), ("B", 50.0, 5.0), ("C", 0.0, -7.0)]);
    let pipeline = TradePipeline::default();

    let first = pipeline.analyze(&bytes).unwrap();
    let second = pipeline.analyze(&bytes).unwrap();

    assert_eq!(first.data_download.bytes, second.data_download.bytes);
    assert_eq!(first.chart_data, second.chart_data);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn blank_cells_flow_through_as_missing_values() {
    let bytes = xlsx_bytes(
        &[IMPORTERS, IMPORTED, BALANCE],
        &[
            vec![Cell::Text("A"), Cell::Num(10.0), Cell::Blank],
            vec![Cell::Text("B"), Cell::Num(4.0), Cell::Num(-6.0)],
        ],
    );
    let analysis = TradePipeline::default().analyze(&bytes).unwrap();

    assert_eq!(analysis.chart_data.export_values, vec![None, Some(-2.0)]);
    assert_eq!(analysis.summary.excess(), 6.0);
    let lines = csv_lines(&analysis.data_download.bytes);
    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first[..2], ["A", ""]);
    assert_eq!(first[2].parse::<f64>().unwrap(), 10.0);
}

#[test]
fn custom_column_mapping_is_honoured() {
    let config = AppConfig {
        columns: ColumnMapping {
            country: "Exporters".to_string(),
            import_value: "Value imported in 2023 (USD thousand)".to_string(),
            trade_balance: "Trade balance in 2023 (USD thousand)".to_string(),
        },
        ..AppConfig::default()
    };
    let bytes = xlsx_bytes(
        &[
            "Exporters",
            "Value imported in 2023 (USD thousand)",
            "Trade balance in 2023 (USD thousand)",
        ],
        &[vec![Cell::Text("Peru"), Cell::Num(12.0), Cell::Num(-2.0)]],
    );

    let analysis = TradePipeline::new(config).analyze(&bytes).unwrap();
    assert_eq!(analysis.chart_data.export_values, vec![Some(10.0)]);

    // Default mapping rejects the same file
    assert!(TradePipeline::default().analyze(&bytes).is_err());
}

#[test]
fn corrupt_upload_is_a_fatal_error() {
    let err = TradePipeline::default()
        .handle_upload(b"PK\x03\x04 truncated")
        .unwrap_err();
    assert!(!err.is_user_error());
    assert!(matches!(err, PipelineError::Load(_)));
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn full_upload_produces_both_downloads() {
    let bytes = trademap_bytes(&[("A", 100.0, -20.0), ("B", 50.0, 5.0)]);
    let report = TradePipeline::default().handle_upload(&bytes).unwrap();

    assert_eq!(report.chart_download.file_name, CHART_FILE_NAME);
    assert_eq!(report.chart_download.mime, CHART_MIME);
    assert_eq!(&report.chart_download.bytes[..4], b"\x89PNG");
    assert_eq!((report.chart.width, report.chart.height), (1200, 700));
    assert_eq!(report.data_download.file_name, "trade_balance_data.csv");
}
