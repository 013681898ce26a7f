use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{DayRecord, HourRecord};

/// Daily-table columns compared in the weather correlation heatmap.
pub const WEATHER_COLUMNS: [&str; 7] = [
    "season",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "cnt",
];

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyMean {
    pub hour: u8,
    pub mean_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub count: u32,
}

/// Mean `cnt` per hour of day, ascending by hour. Hours with no rows are
/// left out.
pub fn mean_count_by_hour(hours: &[HourRecord]) -> Vec<HourlyMean> {
    let mut groups: BTreeMap<u8, (u64, usize)> = BTreeMap::new();
    for h in hours {
        let e = groups.entry(h.hr).or_insert((0, 0));
        e.0 += u64::from(h.cnt);
        e.1 += 1;
    }
    groups
        .into_iter()
        .map(|(hour, (sum, n))| HourlyMean {
            hour,
            mean_count: sum as f64 / n as f64,
        })
        .collect()
}

/// Daily rentals ordered by date.
pub fn daily_series(days: &[DayRecord]) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = days
        .iter()
        .map(|d| DailyPoint {
            date: d.dteday,
            count: d.cnt,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()²` entries.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.len() + col]
    }
}

/// Pearson correlation of two equally long samples.
///
/// `NaN` when fewer than two observations or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlate the named columns of the daily table. Unknown column names are
/// skipped.
pub fn correlation_matrix(days: &[DayRecord], columns: &[&str]) -> CorrelationMatrix {
    let series: Vec<(String, Vec<f64>)> = columns
        .iter()
        .filter(|&&col| {
            let known = DayRecord::NUMERIC_COLUMNS.contains(&col);
            if !known {
                log::warn!("Skipping unknown column '{col}' in correlation");
            }
            known
        })
        .map(|&col| {
            let values = days.iter().filter_map(|d| d.value(col)).collect();
            (col.to_string(), values)
        })
        .collect();

    let n = series.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i].1, &series[j].1);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix {
        columns: series.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{date, day_row, hour_row};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn between(m: &CorrelationMatrix, a: &str, b: &str) -> f64 {
        let i = m.columns.iter().position(|c| c == a).unwrap();
        let j = m.columns.iter().position(|c| c == b).unwrap();
        m.get(i, j)
    }

    #[test]
    fn hourly_mean_groups_and_sorts() {
        let rows = vec![
            hour_row(date(2011, 1, 1), 5, 1, 1),
            hour_row(date(2011, 1, 1), 0, 3, 13),
            hour_row(date(2011, 1, 2), 0, 4, 13),
            hour_row(date(2011, 1, 2), 5, 2, 2),
        ];
        let means = mean_count_by_hour(&rows);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].hour, 0);
        assert!(approx(means[0].mean_count, 16.5));
        assert_eq!(means[1].hour, 5);
        assert!(approx(means[1].mean_count, 3.0));
    }

    #[test]
    fn daily_series_sorted_by_date() {
        let days = vec![
            day_row(date(2011, 1, 3), 1349, 0.2),
            day_row(date(2011, 1, 1), 985, 0.3),
            day_row(date(2011, 1, 2), 801, 0.4),
        ];
        let series = daily_series(&days);
        let counts: Vec<u32> = series.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![985, 801, 1349]);
    }

    #[test]
    fn pearson_known_values() {
        assert!(approx(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0));
        assert!(approx(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0));
        // hand-computed: r = 0.8
        let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]);
        assert!(approx(r, 0.8), "{r}");
    }

    #[test]
    fn pearson_degenerate_is_nan() {
        assert!(pearson(&[1.0], &[1.0]).is_nan());
        assert!(pearson(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let days = vec![
            day_row(date(2011, 1, 1), 985, 0.34),
            day_row(date(2011, 1, 2), 801, 0.36),
            day_row(date(2011, 1, 3), 1349, 0.19),
            day_row(date(2011, 1, 4), 1562, 0.20),
        ];
        let m = correlation_matrix(&days, &WEATHER_COLUMNS);
        assert_eq!(m.len(), WEATHER_COLUMNS.len());

        let cnt = m.columns.iter().position(|c| c == "cnt").unwrap();
        let temp = m.columns.iter().position(|c| c == "temp").unwrap();
        assert!(approx(m.get(cnt, cnt), 1.0));
        assert!(approx(m.get(cnt, temp), m.get(temp, cnt)));
        assert!(m.get(cnt, temp) < 0.0);

        // season and weathersit are constant in the fixture
        assert!(between(&m, "season", "cnt").is_nan());
        assert!(between(&m, "weathersit", "weathersit").is_nan());
    }

    #[test]
    fn correlation_skips_unknown_columns() {
        let days = vec![day_row(date(2011, 1, 1), 985, 0.34), day_row(date(2011, 1, 2), 801, 0.36)];
        let m = correlation_matrix(&days, &["temp", "dteday", "cnt"]);
        assert_eq!(m.columns, vec!["temp".to_string(), "cnt".to_string()]);
        assert!(approx(between(&m, "temp", "cnt"), -1.0));
    }

    #[test]
    fn correlation_of_empty_table_is_all_nan() {
        let m = correlation_matrix(&[], &WEATHER_COLUMNS);
        assert_eq!(m.len(), WEATHER_COLUMNS.len());
        assert!(m.get(0, 0).is_nan());
    }
}
