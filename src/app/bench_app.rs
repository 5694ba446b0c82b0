use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::{egui, Frame};
use log::{error, info};

use super::state::AppState;
use crate::config::ConfigManager;
use crate::types::{BenchCommand, BenchReading, LinkStatus};

pub struct BenchApp {
    // unified state management
    pub state: AppState,

    // configuration management
    pub config: ConfigManager,
}

impl BenchApp {
    pub fn new(
        config: ConfigManager,
        sample_receiver: Receiver<BenchReading>,
        status_receiver: Receiver<LinkStatus>,
        command_sender: Sender<BenchCommand>,
    ) -> Self {
        let state = AppState::new(
            sample_receiver,
            status_receiver,
            command_sender,
            config.get_config(),
        );

        let mut app = BenchApp { state, config };

        let bench = app.config.get_config().bench.clone();
        if bench.auto_connect && !bench.port.is_empty() {
            info!("auto-connecting to {}", bench.port);
            app.send_command(BenchCommand::Connect { port: bench.port });
        }

        info!("application started, waiting for bench link...");

        app
    }

    /// Queue a command for the bench worker
    pub fn send_command(&mut self, command: BenchCommand) {
        match self.state.channels.command_sender.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                self.state.link.status_line = "Bench worker is busy".to_string();
                error!("command channel full, dropping {:?}", command);
            }
            Err(TrySendError::Disconnected(command)) => {
                self.state.link.status_line = "Bench worker is not running".to_string();
                error!("command channel disconnected, dropping {:?}", command);
            }
        }
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (save_pressed, zero_pressed) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::Z),
            )
        });

        if save_pressed {
            crate::app::handlers::AnalysisHandler::capture_window(self);
        }
        if zero_pressed {
            if self.state.link.is_connected {
                self.send_command(BenchCommand::ZeroEncoder);
            } else {
                self.state.link.status_line =
                    "Cannot zero encoder: bench is not connected".to_string();
            }
        }
    }
}

impl eframe::App for BenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(egui::Visuals::light());

        // render UI components
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_bottom_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);
        crate::app::ui::render_analysis_window(self, ctx);

        // drain worker channels into the state
        crate::app::handlers::AcquisitionHandler::handle(self);

        self.handle_keyboard_input(ctx);

        ctx.request_repaint_after(Duration::from_millis(120));
    }
}
