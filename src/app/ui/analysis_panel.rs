use eframe::egui;

use crate::app::bench_app::BenchApp;
use crate::app::handlers::AnalysisHandler;
use crate::plotter;

pub fn render_analysis_window(app: &mut BenchApp, ctx: &egui::Context) {
    if app.state.analysis.show_panel {
        egui::Window::new("Captured Data Analysis")
            .collapsible(false)
            .resizable(true)
            .default_width(700.0)
            .show(ctx, |ui| {
                ui.label("Load a captured bench table and run the post-processing over it");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("CSV file:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.state.analysis.csv_path)
                            .desired_width(320.0)
                            .hint_text("captures/capture_20240101_120000.csv"),
                    );
                    if ui.button("Load").clicked() {
                        AnalysisHandler::load_series(app);
                    }
                });

                if !app.state.analysis.status.is_empty() {
                    ui.add_space(5.0);
                    ui.label(&app.state.analysis.status);
                }

                ui.add_space(10.0);

                render_processing_summary(app, ui);

                ui.add_space(10.0);

                let plot_config = app.config.get_config().plot.clone();
                if let Some(series) = &app.state.analysis.series {
                    egui::ScrollArea::vertical()
                        .max_height(400.0)
                        .show(ui, |ui| {
                            plotter::raw_data_ui(ui, series, &plot_config);
                        });
                }
            });
    }
}

fn render_processing_summary(app: &BenchApp, ui: &mut egui::Ui) {
    if app.state.analysis.series.is_none() {
        return;
    }

    let rig = app.config.get_config().rig;
    ui.label(format!(
        "Specimen diameter: {:.1} mm, rig rs/so/po: {:.0}/{:.0}/{:.0} mm",
        rig.specimen_diameter_mm,
        rig.support_radius_mm,
        rig.support_span_mm,
        rig.pivot_offset_mm
    ));
    ui.add_space(5.0);

    ui.horizontal(|ui| {
        match app.state.analysis.stress_left {
            Some(stress) => ui.label(format!("Peak stress left: {:.4} MPa", stress)),
            None => ui.label("Peak stress left: -"),
        };
        ui.separator();
        match app.state.analysis.stress_right {
            Some(stress) => ui.label(format!("Peak stress right: {:.4} MPa", stress)),
            None => ui.label("Peak stress right: -"),
        };
    });

    ui.horizontal(|ui| {
        match app.state.analysis.peak_strain {
            Some(strain) => ui.label(format!("Peak strain: {:.3} %", strain)),
            None => ui.label("Peak strain: -"),
        };
        ui.separator();
        match app.state.analysis.peak_angular_rate {
            Some(rate) => ui.label(format!("Peak angular rate: {:.2} deg/s", rate)),
            None => ui.label("Peak angular rate: -"),
        };
    });
}
