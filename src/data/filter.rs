use chrono::NaiveDate;

use super::model::{HourRecord, Season, WeatherSituation};

// ---------------------------------------------------------------------------
// Selection: one date and one hour of the hourly table
// ---------------------------------------------------------------------------

/// Weather reported for the selected hour.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub situation: WeatherSituation,
    pub season: Season,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
}

/// Totals for a date/hour selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalSnapshot {
    pub date: NaiveDate,
    pub hour: u8,
    pub total: u64,
    pub casual: u64,
    pub registered: u64,
    /// Taken from the first matching row.
    pub weather: WeatherReading,
}

/// Rows whose `dteday` is `date` and whose `hr` is `hour`.
pub fn select(hours: &[HourRecord], date: NaiveDate, hour: u8) -> Vec<&HourRecord> {
    hours
        .iter()
        .filter(|h| h.dteday == date && h.hr == hour)
        .collect()
}

/// Summarise a selection, or `None` when nothing matches.
pub fn snapshot(hours: &[HourRecord], date: NaiveDate, hour: u8) -> Option<RentalSnapshot> {
    let rows = select(hours, date, hour);
    let first = rows.first()?;

    let weather = WeatherReading {
        situation: first.weather(),
        season: first.season(),
        temp: first.temp,
        atemp: first.atemp,
        hum: first.hum,
        windspeed: first.windspeed,
    };

    Some(RentalSnapshot {
        date,
        hour,
        total: rows.iter().map(|h| u64::from(h.cnt)).sum(),
        casual: rows.iter().map(|h| u64::from(h.casual)).sum(),
        registered: rows.iter().map(|h| u64::from(h.registered)).sum(),
        weather,
    })
}

/// Keep a picked date inside the loaded range.
pub fn clamp_date(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    date.clamp(min, max)
}
