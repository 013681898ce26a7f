use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::error::DataError;

// ---------------------------------------------------------------------------
// WeatherSituation – the `weathersit` code column
// ---------------------------------------------------------------------------

/// Weather category recorded for an hour or day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSituation {
    Clear,
    Mist,
    LightSnow,
    HeavyRain,
    /// Code outside 1..=4, kept verbatim.
    Unknown(i64),
}

impl WeatherSituation {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => WeatherSituation::Clear,
            2 => WeatherSituation::Mist,
            3 => WeatherSituation::LightSnow,
            4 => WeatherSituation::HeavyRain,
            other => WeatherSituation::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear",
            WeatherSituation::Mist => "Mist",
            WeatherSituation::LightSnow => "Light Snow",
            WeatherSituation::HeavyRain => "Heavy Rain",
            WeatherSituation::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Season – the `season` code column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown(i64),
}

impl Season {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One row of the hourly table (`hour.csv`). Calendar columns other than
/// the date are not needed by any view and are skipped.
///
/// Weather columns (`temp`, `atemp`, `hum`, `windspeed`) are the dataset's
/// normalised values, kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourRecord {
    #[serde(deserialize_with = "deserialize_date")]
    pub dteday: NaiveDate,
    pub season: i64,
    pub hr: u8,
    pub weathersit: i64,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

impl HourRecord {
    pub fn weather(&self) -> WeatherSituation {
        WeatherSituation::from_code(self.weathersit)
    }

    pub fn season(&self) -> Season {
        Season::from_code(self.season)
    }
}

/// One row of the daily table (`day.csv`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayRecord {
    #[serde(default)]
    pub instant: u64,
    #[serde(deserialize_with = "deserialize_date")]
    pub dteday: NaiveDate,
    pub season: i64,
    pub yr: i64,
    pub mnth: i64,
    pub holiday: i64,
    pub weekday: i64,
    pub workingday: i64,
    pub weathersit: i64,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

impl DayRecord {
    pub const NUMERIC_COLUMNS: [&'static str; 15] = [
        "instant",
        "season",
        "yr",
        "mnth",
        "holiday",
        "weekday",
        "workingday",
        "weathersit",
        "temp",
        "atemp",
        "hum",
        "windspeed",
        "casual",
        "registered",
        "cnt",
    ];

    /// Numeric value of a column by its dataset name, for correlation.
    pub fn value(&self, column: &str) -> Option<f64> {
        let v = match column {
            "instant" => self.instant as f64,
            "season" => self.season as f64,
            "yr" => self.yr as f64,
            "mnth" => self.mnth as f64,
            "holiday" => self.holiday as f64,
            "weekday" => self.weekday as f64,
            "workingday" => self.workingday as f64,
            "weathersit" => self.weathersit as f64,
            "temp" => self.temp,
            "atemp" => self.atemp,
            "hum" => self.hum,
            "windspeed" => self.windspeed,
            "casual" => self.casual as f64,
            "registered" => self.registered as f64,
            "cnt" => self.cnt as f64,
            _ => return None,
        };
        Some(v)
    }
}

/// Accepts `2011-01-01` as well as a date-time whose date part is kept
/// (`2011-01-01T00:00:00`, `2011-01-01 00:00:00`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// `dteday` as it appears across input formats: text in CSV, text or epoch
/// milliseconds in JSON written by `df.to_json()`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    EpochMillis(i64),
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDate::deserialize(deserializer)? {
        RawDate::Text(s) => parse_date(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{s}'"))),
        RawDate::EpochMillis(ms) => DateTime::from_timestamp_millis(ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {ms} out of range"))),
    }
}

// ---------------------------------------------------------------------------
// BikeDataset – both tables, validated
// ---------------------------------------------------------------------------

/// The hourly and daily tables after validation.
#[derive(Debug, Clone)]
pub struct BikeDataset {
    pub hours: Vec<HourRecord>,
    pub days: Vec<DayRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl BikeDataset {
    pub fn new(hours: Vec<HourRecord>, days: Vec<DayRecord>) -> Result<Self, DataError> {
        if let Some((row, bad)) = hours.iter().enumerate().find(|(_, h)| h.hr > 23) {
            return Err(DataError::HourOutOfRange {
                row,
                date: bad.dteday,
                hour: bad.hr,
            });
        }

        let min_date = hours.iter().map(|h| h.dteday).min();
        let max_date = hours.iter().map(|h| h.dteday).max();
        let (Some(min_date), Some(max_date)) = (min_date, max_date) else {
            return Err(DataError::EmptyHourly);
        };

        Ok(BikeDataset {
            hours,
            days,
            min_date,
            max_date,
        })
    }

    /// First and last date present in the hourly table.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, self.max_date)
    }
}
