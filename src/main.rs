mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::BikeDashboardApp;
use clap::Parser;
use eframe::egui;
use state::{AnalysisMode, AppState};

#[derive(Parser)]
#[command(name = "bike-dashboard")]
#[command(about = "Explore hourly and daily bike sharing rentals", long_about = None)]
struct Cli {
    /// Hourly table (.csv, .json or .parquet)
    #[arg(long, value_name = "PATH", default_value = "hour.csv")]
    hour: PathBuf,

    /// Daily table (.csv, .json or .parquet)
    #[arg(long, value_name = "PATH", default_value = "day.csv")]
    day: PathBuf,

    /// Directory holding hour.* and day.*; overrides --hour and --day
    #[arg(short = 'd', long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Analysis shown at start-up
    #[arg(short, long, value_enum, default_value_t = AnalysisMode::Frequency)]
    mode: AnalysisMode,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::with_mode(cli.mode);
    match &cli.data_dir {
        Some(dir) => state.load_from_dir(dir),
        None => state.load_from_paths(&cli.hour, &cli.day),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Demand Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikeDashboardApp::new(state)))),
    )
}
