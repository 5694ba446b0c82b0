pub mod analysis_panel;
pub mod main_panel;
pub mod status_bar;

pub use analysis_panel::render_analysis_window;
pub use main_panel::render_main_panel;
pub use status_bar::{render_bottom_status_bar, render_status_bar};
