use std::path::Path;

use chrono::NaiveDate;

use crate::data::aggregate::{
    CorrelationMatrix, DailyPoint, HourlyMean, WEATHER_COLUMNS, correlation_matrix, daily_series,
    mean_count_by_hour,
};
use crate::data::filter::{RentalSnapshot, clamp_date, snapshot};
use crate::data::loader;
use crate::data::model::BikeDataset;

// ---------------------------------------------------------------------------
// Analysis mode (sidebar radio)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AnalysisMode {
    /// Date and hour selection with per-hour totals.
    #[default]
    Frequency,
    /// Fixed aggregate charts.
    Analysis,
}

impl AnalysisMode {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Frequency => "Bike Rental Frequency",
            AnalysisMode::Analysis => "Bike Rental Analysis",
        }
    }
}

// ---------------------------------------------------------------------------
// Cached aggregates for the analysis view
// ---------------------------------------------------------------------------

/// Results that only depend on the loaded dataset.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub hourly_means: Vec<HourlyMean>,
    pub daily: Vec<DailyPoint>,
    pub weather_correlation: CorrelationMatrix,
}

impl Aggregates {
    pub fn compute(dataset: &BikeDataset) -> Self {
        Self {
            hourly_means: mean_count_by_hour(&dataset.hours),
            daily: daily_series(&dataset.days),
            weather_correlation: correlation_matrix(&dataset.days, &WEATHER_COLUMNS),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<BikeDataset>,

    pub mode: AnalysisMode,

    /// Selected date; always within the dataset's date range once loaded.
    pub selected_date: Option<NaiveDate>,

    /// Selected hour, 0..=23.
    pub selected_hour: u8,

    /// Totals for the current selection (None when nothing matches).
    pub snapshot: Option<RentalSnapshot>,

    pub aggregates: Option<Aggregates>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_mode(mode: AnalysisMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset: select its first date at hour 0 and
    /// compute every cache.
    pub fn set_dataset(&mut self, dataset: BikeDataset) {
        let (min_date, _) = dataset.date_range();
        self.selected_date = Some(min_date);
        self.selected_hour = 0;
        self.aggregates = Some(Aggregates::compute(&dataset));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reselect();
    }

    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode != mode {
            log::debug!("Switching to {}", mode.label());
            self.mode = mode;
        }
    }

    /// Pick a date, clamped into the loaded range.
    pub fn set_date(&mut self, date: NaiveDate) {
        let date = match &self.dataset {
            Some(ds) => {
                let (min, max) = ds.date_range();
                clamp_date(date, min, max)
            }
            None => date,
        };
        if self.selected_date != Some(date) {
            self.selected_date = Some(date);
            self.reselect();
        }
    }

    /// Pick an hour, clamped to 0..=23.
    pub fn set_hour(&mut self, hour: u8) {
        let hour = hour.min(23);
        if self.selected_hour != hour {
            self.selected_hour = hour;
            self.reselect();
        }
    }

    /// Recompute `snapshot` after a selection change.
    pub fn reselect(&mut self) {
        self.snapshot = match (&self.dataset, self.selected_date) {
            (Some(ds), Some(date)) => snapshot(&ds.hours, date, self.selected_hour),
            _ => None,
        };
        if let Some(date) = self.selected_date {
            log::debug!(
                "Selected {date} {}:00 → {:?}",
                self.selected_hour,
                self.snapshot.as_ref().map(|s| s.total)
            );
        }
    }

    /// Load both tables and install them, or report the failure.
    pub fn load_from_paths(&mut self, hour_path: &Path, day_path: &Path) {
        match loader::load_dataset(hour_path, day_path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load `hour.*` / `day.*` from a directory.
    pub fn load_from_dir(&mut self, dir: &Path) {
        match loader::resolve_paths(dir) {
            Ok((hour, day)) => self.load_from_paths(&hour, &day),
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
