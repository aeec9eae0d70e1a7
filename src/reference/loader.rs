//! CSV-based reference data loader
//!
//! Loads the base pay matrix and DA history from CSV files in data/

use super::{CpcLabel, DaRate, DaRateTable, Level, PayMatrix};
use crate::error::ReferenceDataError;
use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Default path to reference data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Base pay matrix file name (columns: Level, Pay_Position, Basic_Pay)
pub const PAY_MATRIX_FILE: &str = "pay_matrix.csv";

/// DA history file name (columns: Date, Rate)
pub const DA_TABLE_FILE: &str = "da_table.csv";

/// Raw CSV row of the pay matrix
///
/// Blank or non-numeric position/pay cells come through as `None`; those rows
/// are dropped because the exported matrix pads shorter levels with empty cells.
#[derive(Debug, Deserialize)]
struct PayMatrixRow {
    #[serde(rename = "Level")]
    level: String,
    #[serde(rename = "Pay_Position", deserialize_with = "csv::invalid_option")]
    position: Option<u32>,
    #[serde(rename = "Basic_Pay", deserialize_with = "csv::invalid_option")]
    basic_pay: Option<f64>,
}

/// Raw CSV row of the DA table
#[derive(Debug, Deserialize)]
struct DaRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Parse `2024-07-01`, also accepting spreadsheet exports with a time part
fn parse_effective_date(value: &str) -> Result<NaiveDate, ReferenceDataError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|err| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.date())
                .map_err(|_| err)
        })
        .map_err(|source| ReferenceDataError::InvalidDate {
            value: value.to_string(),
            source,
        })
}

/// Load the base (7th CPC) pay matrix from any reader
pub fn pay_matrix_from_reader<R: Read>(reader: R) -> Result<PayMatrix, ReferenceDataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut cells = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PayMatrixRow = result?;
        match (row.position, row.basic_pay) {
            (Some(position), Some(basic_pay)) if !row.level.trim().is_empty() => {
                cells.push((Level::new(row.level), position, basic_pay));
            }
            _ => log::warn!("skipping incomplete pay matrix row: {:?}", row),
        }
    }

    PayMatrix::from_entries(CpcLabel::BASE, cells)
}

/// Load the base pay matrix from a CSV file
pub fn load_pay_matrix<P: AsRef<Path>>(path: P) -> Result<PayMatrix, ReferenceDataError> {
    let file = std::fs::File::open(path)?;
    pay_matrix_from_reader(file)
}

/// Load the DA history from any reader
pub fn da_table_from_reader<R: Read>(reader: R) -> Result<DaRateTable, ReferenceDataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rates = Vec::new();

    for result in csv_reader.deserialize() {
        let row: DaRow = result?;
        rates.push(DaRate {
            effective_date: parse_effective_date(&row.date)?,
            rate: row.rate,
        });
    }

    DaRateTable::new(rates)
}

/// Load the DA history from a CSV file
pub fn load_da_table<P: AsRef<Path>>(path: P) -> Result<DaRateTable, ReferenceDataError> {
    let file = std::fs::File::open(path)?;
    da_table_from_reader(file)
}
