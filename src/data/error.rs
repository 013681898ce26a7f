use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures for a loaded pair of tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("hourly table is empty")]
    EmptyHourly,

    #[error("hourly row {row} ({date}) has hour {hour}, expected 0..=23")]
    HourOutOfRange { row: usize, date: NaiveDate, hour: u8 },

    #[error("no '{stem}' table (.csv, .parquet or .json) in '{dir}'")]
    TableNotFound { stem: &'static str, dir: PathBuf },
}
