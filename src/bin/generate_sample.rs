//! Writes a synthetic `hour.csv` / `day.csv` pair in the bike sharing
//! dataset layout, so the dashboard can run without the original files.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to the current directory).

use std::f64::consts::PI;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HourRow {
    instant: u64,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u32,
    hr: u8,
    holiday: u8,
    weekday: u32,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
}

#[derive(Debug, Serialize)]
struct DayRow {
    instant: u64,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u32,
    holiday: u8,
    weekday: u32,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Meteorological season code: 1 spring, 2 summer, 3 fall, 4 winter.
fn season_of(date: NaiveDate) -> u8 {
    match (date.month(), date.day()) {
        (3, d) if d >= 21 => 1,
        (4..=5, _) | (6, 1..=20) => 1,
        (6, _) | (7..=8, _) | (9, 1..=22) => 2,
        (9, _) | (10..=11, _) | (12, 1..=20) => 3,
        _ => 4,
    }
}

/// Relative demand for an hour: commute peaks on working days, a midday
/// hump otherwise.
fn hour_profile(hr: u8, working: bool) -> f64 {
    let h = hr as f64;
    let bump = |centre: f64, width: f64| (-(h - centre).powi(2) / (2.0 * width * width)).exp();
    if working {
        0.05 + 1.0 * bump(8.0, 1.0) + 1.2 * bump(17.5, 1.3) + 0.3 * bump(12.5, 2.0)
    } else {
        0.05 + 0.9 * bump(14.0, 3.0)
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let holidays = [(1, 1), (7, 4), (11, 24), (12, 25)];

    let hour_path = out_dir.join("hour.csv");
    let day_path = out_dir.join("day.csv");
    let mut hour_writer = csv::Writer::from_path(&hour_path).context("creating hour.csv")?;
    let mut day_writer = csv::Writer::from_path(&day_path).context("creating day.csv")?;

    let mut instant = 0u64;
    let mut day_instant = 0u64;
    let mut weather = 1u8;

    for date in start.iter_days().take_while(|d| d.year() <= 2012) {
        day_instant += 1;
        let yr = (date.year() - 2011) as u8;
        let season = season_of(date);
        let weekday = date.weekday().num_days_from_sunday();
        let holiday = holidays.contains(&(date.month(), date.day())) as u8;
        let workingday = (weekday != 0 && weekday != 6 && holiday == 0) as u8;

        // annual temperature cycle, coldest mid-January
        let phase = 2.0 * PI * (date.ordinal() as f64 - 20.0) / 365.0;
        let base_temp = 0.5 - 0.28 * phase.cos();
        let growth = 1.0 + 0.6 * yr as f64;

        let mut day = DayRow {
            instant: day_instant,
            dteday: date.format("%Y-%m-%d").to_string(),
            season,
            yr,
            mnth: date.month(),
            holiday,
            weekday,
            workingday,
            weathersit: 1,
            temp: 0.0,
            atemp: 0.0,
            hum: 0.0,
            windspeed: 0.0,
            casual: 0,
            registered: 0,
            cnt: 0,
        };
        let mut worst_weather = 1u8;

        for hr in 0..24u8 {
            // weather drifts slowly between categories
            let roll = rng.next_f64();
            weather = match weather {
                1 if roll < 0.08 => 2,
                2 if roll < 0.15 => 1,
                2 if roll < 0.22 => 3,
                3 if roll < 0.35 => 2,
                3 if roll < 0.37 => 4,
                4 => 3,
                w => w,
            };
            worst_weather = worst_weather.max(weather);

            let diurnal = 0.06 * (2.0 * PI * (hr as f64 - 9.0) / 24.0).sin();
            let temp = (base_temp + diurnal + rng.gauss(0.0, 0.03)).clamp(0.02, 1.0);
            let atemp = (temp * 0.95 + rng.gauss(0.0, 0.02)).clamp(0.0, 1.0);
            let hum = (0.55 + 0.1 * weather as f64 + rng.gauss(0.0, 0.08)).clamp(0.0, 1.0);
            let windspeed = rng.gauss(0.19, 0.08).clamp(0.0, 0.85);

            let weather_factor = match weather {
                1 => 1.0,
                2 => 0.85,
                3 => 0.45,
                _ => 0.1,
            };
            let comfort = 0.3 + 1.2 * temp - 0.6 * (temp - 0.65).max(0.0);
            let demand = hour_profile(hr, workingday == 1) * weather_factor * comfort * growth;

            let casual_share = if workingday == 1 { 0.12 } else { 0.35 };
            let registered =
                (demand * 520.0 * (1.0 - casual_share) + rng.gauss(0.0, 6.0)).max(0.0) as u32;
            let casual = (demand * 520.0 * casual_share + rng.gauss(0.0, 3.0)).max(0.0) as u32;

            instant += 1;
            let row = HourRow {
                instant,
                dteday: day.dteday.clone(),
                season,
                yr,
                mnth: date.month(),
                hr,
                holiday,
                weekday,
                workingday,
                weathersit: weather,
                temp: round4(temp),
                atemp: round4(atemp),
                hum: round4(hum),
                windspeed: round4(windspeed),
                casual,
                registered,
                cnt: casual + registered,
            };
            hour_writer.serialize(&row)?;

            day.temp += temp / 24.0;
            day.atemp += atemp / 24.0;
            day.hum += hum / 24.0;
            day.windspeed += windspeed / 24.0;
            day.casual += casual;
            day.registered += registered;
        }

        day.weathersit = worst_weather.min(3);
        day.temp = round4(day.temp);
        day.atemp = round4(day.atemp);
        day.hum = round4(day.hum);
        day.windspeed = round4(day.windspeed);
        day.cnt = day.casual + day.registered;
        day_writer.serialize(&day)?;
    }

    hour_writer.flush()?;
    day_writer.flush()?;

    println!(
        "Wrote {instant} hourly rows to {} and {day_instant} daily rows to {}",
        hour_path.display(),
        day_path.display()
    );
    Ok(())
}
