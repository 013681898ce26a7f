use eframe::egui::{self, RichText, ScrollArea, Ui};

use super::{heatmap, plot};
use crate::data::filter::RentalSnapshot;
use crate::state::{AnalysisMode, AppState};

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the view for the selected analysis mode.
pub fn central_view(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data folder to begin  (File → Open data folder…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.mode {
            AnalysisMode::Frequency => frequency_view(ui, state),
            AnalysisMode::Analysis => analysis_view(ui, state),
        });
}

fn title(ui: &mut Ui, text: &str) {
    ui.heading(RichText::new(text).size(26.0));
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(18.0).strong());
}

// ---------------------------------------------------------------------------
// Bike Rental Frequency
// ---------------------------------------------------------------------------

fn frequency_view(ui: &mut Ui, state: &mut AppState) {
    title(ui, "Bike Sharing Demand Dashboard");
    subheader(ui, "Frequency of Rental Based on Day and Hour");
    ui.add_space(8.0);

    let (Some(ds), Some(mut date)) = (&state.dataset, state.selected_date) else {
        return;
    };
    let (min, max) = ds.date_range();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a date");
        ui.add(egui_extras::DatePickerButton::new(&mut date).id_salt("selected_date"));
        ui.weak(format!("({min} – {max})"));
    });
    state.set_date(date);

    let mut hour = state.selected_hour;
    ui.add(egui::Slider::new(&mut hour, 0..=23).text("Select an hour"));
    state.set_hour(hour);

    ui.add_space(12.0);

    let Some(snap) = &state.snapshot else {
        ui.label("No data available for the selected date and hour.");
        return;
    };

    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], snap);
        weather_expander(&mut cols[1], snap);
    });

    ui.add_space(12.0);
    ui.label(
        RichText::new(format!(
            "Bike Rentals by User Type on {} at {}:00",
            snap.date, snap.hour
        ))
        .strong(),
    );
    plot::user_type_chart(ui, snap);
}

fn metric(ui: &mut Ui, snap: &RentalSnapshot) {
    ui.label(format!(
        "Total bikes rented on {} at {}:00 is",
        snap.date, snap.hour
    ));
    ui.label(RichText::new(snap.total.to_string()).size(36.0));
}

fn weather_expander(ui: &mut Ui, snap: &RentalSnapshot) {
    let w = &snap.weather;
    egui::CollapsingHeader::new(format!(
        "Weather Conditions on {} at {}:00",
        snap.date, snap.hour
    ))
    .id_salt("weather_conditions")
    .default_open(false)
    .show(ui, |ui: &mut Ui| {
        ui.label(format!("Weather Situation: {}", w.situation));
        ui.label(format!("Season: {}", w.season));
        ui.label(format!("Temperature: {}", w.temp));
        ui.label(format!("Feels Like: {}", w.atemp));
        ui.label(format!("Humidity: {}", w.hum));
        ui.label(format!("Wind Speed: {}", w.windspeed));
    });
}

// ---------------------------------------------------------------------------
// Bike Rental Analysis
// ---------------------------------------------------------------------------

fn analysis_view(ui: &mut Ui, state: &AppState) {
    let Some(agg) = &state.aggregates else {
        return;
    };

    title(ui, "Time Peak Analysis of Bike Rentals");
    subheader(ui, "Time Peak Analysis of Bike Rentals");
    ui.add_space(8.0);
    plot::hourly_mean_chart(ui, &agg.hourly_means);

    ui.add_space(16.0);
    ui.label(RichText::new("Daily Bike Rentals Over Time").strong());
    plot::daily_rentals_chart(ui, &agg.daily);

    ui.add_space(24.0);
    title(ui, "Weather Conditions of Bike Rentals");
    subheader(ui, "Correlation between Weather Conditions and Bike Rentals");
    ui.add_space(8.0);
    heatmap::correlation_heatmap(ui, &agg.weather_correlation);
}
