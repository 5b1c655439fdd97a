//! In-memory workbook fixtures, shared by unit and integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

pub const IMPORTERS: &str = "Importers";
pub const IMPORTED: &str = "Value imported in 2024 (USD thousand)";
pub const BALANCE: &str = "Trade balance in 2024 (USD thousand)";

#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Num(f64),
    Blank,
}

/// Build `.xlsx` bytes with one sheet: header row, then data rows.
pub fn xlsx_bytes(headers: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col as u16, *s).unwrap();
                }
                Cell::Num(v) => {
                    worksheet.write_number(row_num, col as u16, *v).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// TradeMap-shaped workbook: `(country, import value, trade balance)` rows,
/// plus a trailing column the pipeline ignores.
pub fn trademap_bytes(rows: &[(&str, f64, f64)]) -> Vec<u8> {
    let body: Vec<Vec<Cell<'_>>> = rows
        .iter()
        .map(|(country, import, balance)| {
            vec![
                Cell::Text(country),
                Cell::Num(*import),
                Cell::Num(*balance),
                Cell::Num(1.0),
            ]
        })
        .collect();

    xlsx_bytes(
        &[IMPORTERS, IMPORTED, BALANCE, "Quantity imported in 2024"],
        &body,
    )
}
