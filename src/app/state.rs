use crossbeam_channel::{Receiver, Sender};

use crate::config::AppConfig;
use crate::plotter::BenchPlot;
use crate::types::{BenchCommand, BenchReading, CapturedSeries, LinkStatus};

/// Application state module
/// Groups the app state into focused structs instead of one flat bag

/// Serial link state as last reported by the bench worker
#[derive(Debug, Clone)]
pub struct LinkState {
    pub is_connected: bool,
    pub port_input: String,
    pub status_line: String,
}

impl Default for LinkState {
    fn default() -> Self {
        Self {
            is_connected: false,
            port_input: String::new(),
            status_line: String::new(),
        }
    }
}

/// Live-window capture state
#[derive(Debug, Clone)]
pub struct CaptureState {
    pub capture_dir: String,
    pub save_status: String,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self {
            capture_dir: "captures".to_string(),
            save_status: String::new(),
        }
    }
}

/// Captured-series analysis state
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    pub show_panel: bool,
    pub csv_path: String,
    pub status: String,
    pub series: Option<CapturedSeries>,
    pub stress_left: Option<f64>,
    pub stress_right: Option<f64>,
    pub peak_strain: Option<f64>,
    pub peak_angular_rate: Option<f64>,
}

/// Channels to and from the bench worker
#[derive(Debug)]
pub struct BenchChannels {
    pub sample_receiver: Receiver<BenchReading>,
    pub status_receiver: Receiver<LinkStatus>,
    pub command_sender: Sender<BenchCommand>,
}

/// Unified application state
#[derive(Debug)]
pub struct AppState {
    pub link: LinkState,
    pub capture: CaptureState,
    pub analysis: AnalysisState,
    pub channels: BenchChannels,
    pub latest: Option<BenchReading>,
    pub plot: BenchPlot,
}

impl AppState {
    pub fn new(
        sample_receiver: Receiver<BenchReading>,
        status_receiver: Receiver<LinkStatus>,
        command_sender: Sender<BenchCommand>,
        config: &AppConfig,
    ) -> Self {
        // one sample per poll interval
        let sample_rate = (1000 / config.bench.poll_interval_ms.max(1)) as usize;

        Self {
            link: LinkState {
                port_input: config.bench.port.clone(),
                ..LinkState::default()
            },
            capture: CaptureState {
                capture_dir: config.get_capture_directory().display().to_string(),
                ..CaptureState::default()
            },
            analysis: AnalysisState::default(),
            channels: BenchChannels {
                sample_receiver,
                status_receiver,
                command_sender,
            },
            latest: None,
            plot: BenchPlot::new(sample_rate.max(1), &config.plot),
        }
    }

    /// One-word summary for the status bar
    pub fn get_status_summary(&self) -> &'static str {
        if self.link.is_connected {
            "Connected"
        } else {
            "Disconnected"
        }
    }
}
