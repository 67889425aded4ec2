pub mod chart;
pub mod price;
pub mod settings;
pub mod ui;
