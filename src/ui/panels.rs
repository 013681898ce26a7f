use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AnalysisMode, AppState};

// ---------------------------------------------------------------------------
// Left side panel – analysis type
// ---------------------------------------------------------------------------

/// Render the left panel: mode selection and dataset summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Choose Analysis Type");
    ui.separator();

    let mut mode = state.mode;
    for candidate in [AnalysisMode::Frequency, AnalysisMode::Analysis] {
        ui.radio_value(&mut mode, candidate, candidate.label());
    }
    state.set_mode(mode);

    ui.add_space(12.0);
    ui.separator();

    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let (min, max) = ds.date_range();
    egui::Grid::new("dataset_summary")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Hourly rows");
            ui.label(ds.hours.len().to_string());
            ui.end_row();
            ui.label("Daily rows");
            ui.label(ds.days.len().to_string());
            ui.end_row();
            ui.label("From");
            ui.label(min.to_string());
            ui.end_row();
            ui.label("To");
            ui.label(max.to_string());
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let (min, max) = ds.date_range();
            ui.label(format!(
                "{} hourly / {} daily rows, {min} – {max}",
                ds.hours.len(),
                ds.days.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Ask for a directory holding `hour.*` and `day.*`, then load it.
pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open bike sharing data folder")
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Opening data folder {}", dir.display());
        state.load_from_dir(&dir);
    }
}
