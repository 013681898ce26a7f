use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints};

use crate::color::generate_palette;
use crate::data::aggregate::{DailyPoint, HourlyMean};
use crate::data::filter::RentalSnapshot;

const USER_TYPES: [&str; 2] = ["Casual", "Registered"];

// ---------------------------------------------------------------------------
// Casual vs registered (frequency view)
// ---------------------------------------------------------------------------

/// Bar chart of casual and registered rentals for the selected hour.
pub fn user_type_chart(ui: &mut Ui, snap: &RentalSnapshot) {
    let colors = generate_palette(USER_TYPES.len());
    let bars: Vec<Bar> = [snap.casual, snap.registered]
        .iter()
        .zip(USER_TYPES)
        .zip(colors)
        .enumerate()
        .map(|(i, ((&value, name), color))| {
            Bar::new(i as f64, value as f64)
                .name(name)
                .fill(color)
                .width(0.6)
        })
        .collect();

    Plot::new("user_type_chart")
        .height(300.0)
        .x_axis_label("User Type")
        .y_axis_label("Number of Bikes Rented")
        .x_axis_formatter(|mark: GridMark, _range| user_type_label(mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Rentals"));
        });
}

/// Axis label for a user-type bar position.
pub fn user_type_label(value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    USER_TYPES
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Mean rentals per hour (analysis view)
// ---------------------------------------------------------------------------

pub fn hourly_mean_chart(ui: &mut Ui, means: &[HourlyMean]) {
    let bars: Vec<Bar> = means
        .iter()
        .map(|m| Bar::new(m.hour as f64, m.mean_count).width(0.8))
        .collect();

    Plot::new("hourly_mean_chart")
        .height(280.0)
        .x_axis_label("hr")
        .y_axis_label("cnt")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Mean rentals")
                    .color(Color32::from_rgb(31, 119, 180)),
            );
        });
}

// ---------------------------------------------------------------------------
// Daily rentals over time (analysis view)
// ---------------------------------------------------------------------------

pub fn daily_rentals_chart(ui: &mut Ui, daily: &[DailyPoint]) {
    let points: PlotPoints = daily
        .iter()
        .map(|p| [date_to_axis(p.date), p.count as f64])
        .collect();

    Plot::new("daily_rentals_chart")
        .height(320.0)
        .x_axis_label("Date")
        .y_axis_label("Total Number of Rentals")
        .x_axis_formatter(|mark: GridMark, _range| date_axis_label(mark.value))
        .label_formatter(|_name, point: &PlotPoint| {
            format!("{}\n{:.0} rentals", date_axis_label(point.x), point.y)
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("cnt").width(1.0));
        });
}

/// Days since 0001-01-01, used as the x coordinate of date plots.
pub fn date_to_axis(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn date_axis_label(value: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::date;

    #[test]
    fn user_type_axis_labels() {
        assert_eq!(user_type_label(0.0), "Casual");
        assert_eq!(user_type_label(1.0), "Registered");
        assert_eq!(user_type_label(0.5), "");
        assert_eq!(user_type_label(2.0), "");
        assert_eq!(user_type_label(-1.0), "");
    }

    #[test]
    fn date_axis_round_trip() {
        let d = date(2012, 10, 29);
        assert_eq!(date_axis_label(date_to_axis(d)), "2012-10-29");
        assert!(date_to_axis(date(2011, 1, 2)) - date_to_axis(date(2011, 1, 1)) == 1.0);
    }
}
