pub mod heatmap;
pub mod panels;
pub mod plot;
pub mod views;
