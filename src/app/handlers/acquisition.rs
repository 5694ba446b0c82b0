use crate::app::bench_app::BenchApp;
use crate::types::LinkStatus;

pub struct AcquisitionHandler;

impl AcquisitionHandler {
    /// Drain everything the bench worker produced since the last frame.
    pub fn handle(app: &mut BenchApp) {
        while let Ok(status) = app.state.channels.status_receiver.try_recv() {
            Self::apply_status(app, status);
        }

        while let Ok(reading) = app.state.channels.sample_receiver.try_recv() {
            app.state.plot.add_reading(&reading);
            app.state.latest = Some(reading);
        }
    }

    fn apply_status(app: &mut BenchApp, status: LinkStatus) {
        match status {
            LinkStatus::Connected { port } => {
                app.state.link.is_connected = true;
                app.state.link.status_line = format!("Connected to {}", port);
            }
            LinkStatus::Disconnected => {
                app.state.link.is_connected = false;
                app.state.link.status_line = "Disconnected".to_string();
                app.state.latest = None;
            }
            LinkStatus::Notice(message) => {
                app.state.link.status_line = message;
            }
            LinkStatus::Error(message) => {
                app.state.link.status_line = message;
            }
        }
    }
}
