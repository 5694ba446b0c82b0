use eframe::egui;

use crate::app::bench_app::BenchApp;
use crate::types::BenchCommand;
use crate::utils::format_timestamp;

pub fn render_status_bar(app: &mut BenchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Bench:");

                let status_color = if app.state.link.is_connected {
                    egui::Color32::from_rgb(0, 150, 0)
                } else {
                    egui::Color32::from_rgb(150, 0, 0)
                };
                ui.colored_label(status_color, app.state.get_status_summary());

                ui.separator();

                ui.label("Port:");
                ui.add(
                    egui::TextEdit::singleline(&mut app.state.link.port_input)
                        .desired_width(140.0)
                        .hint_text("/dev/ttyACM0"),
                );

                if app.state.link.is_connected {
                    if ui.button("Disconnect").clicked() {
                        app.send_command(BenchCommand::Disconnect);
                    }
                    if ui.button("Zero encoder").clicked() {
                        app.send_command(BenchCommand::ZeroEncoder);
                    }
                } else if ui.button("Connect").clicked() {
                    let port = app.state.link.port_input.trim().to_string();
                    if port.is_empty() {
                        app.state.link.status_line = "No serial port given".to_string();
                    } else {
                        app.send_command(BenchCommand::Connect { port });
                    }
                }

                ui.separator();

                render_latest_reading(app, ui);
            });
            ui.add_space(5.0);
        });
}

fn render_latest_reading(app: &BenchApp, ui: &mut egui::Ui) {
    match &app.state.latest {
        Some(reading) => {
            ui.label(format!(
                "Force {:.0} / {:.0} gf",
                reading.force_left, reading.force_right
            ));
            ui.separator();
            ui.label(format!("Angle {:+.2} deg", reading.angle));
            ui.separator();
            ui.label(format!(
                "Pressure {:.0} / {:.0} kPa",
                reading.pressure_left, reading.pressure_right
            ));
            ui.separator();
            ui.label(format_timestamp(reading.timestamp));
        }
        None => {
            ui.label("waiting for data...");
        }
    }
}

pub fn render_bottom_status_bar(app: &mut BenchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_status_bar")
        .min_height(25.0)
        .show(ctx, |ui| {
            ui.add_space(3.0);
            ui.horizontal(|ui| {
                // left: last link status message
                if !app.state.link.status_line.is_empty() {
                    ui.colored_label(
                        egui::Color32::from_rgb(0, 100, 200),
                        &app.state.link.status_line,
                    );
                    ui.separator();
                }

                // right: capture status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !app.state.capture.save_status.is_empty() {
                        ui.colored_label(
                            egui::Color32::from_rgb(0, 150, 100),
                            &app.state.capture.save_status,
                        );
                    }
                });
            });
            ui.add_space(3.0);
        });
}
