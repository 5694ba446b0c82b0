use eframe::egui;

use crate::app::bench_app::BenchApp;

pub fn render_main_panel(app: &mut BenchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Hotkeys:");
            ui.colored_label(egui::Color32::from_rgb(0, 150, 0), "SPACE");
            ui.label("Save current window to CSV");
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(0, 150, 0), "Z");
            ui.label("Zero encoder");

            ui.separator();

            let toggle_text = if app.state.analysis.show_panel {
                "Hide analysis"
            } else {
                "Analyze captured data"
            };
            if ui.button(toggle_text).clicked() {
                app.state.analysis.show_panel = !app.state.analysis.show_panel;
            }
        });
        ui.add_space(10.0);

        let plot_config = app.config.get_config().plot.clone();
        app.state.plot.ui(ui, &plot_config);
    });
}
