use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration module
/// Central place for all settings, with defaults and validation

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub bench: BenchConfig,
    pub rig: RigConfig,
    pub plot: PlotConfig,
    pub channels: ChannelConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
}

/// Bench serial link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Serial port of the bench controller, e.g. /dev/ttyACM0 or COM3
    pub port: String,
    pub baud_rate: u32,
    /// How long to wait for the controller's handshake line
    pub handshake_timeout_ms: u64,
    /// Per-read timeout the blocking reads re-arm on
    pub read_timeout_ms: u64,
    /// Settle period between acknowledging the handshake and first use
    pub settle_ms: u64,
    pub poll_interval_ms: u64,
    pub encoder_counts_per_rev: u32,
    pub auto_connect: bool,
}

/// Rig geometry and specimen configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigConfig {
    /// Distance between top actuator support and bench centreline [mm]
    pub support_radius_mm: f64,
    /// Vertical distance between top and bottom actuator supports [mm]
    pub support_span_mm: f64,
    /// Distance between bottom actuator support and rotation axis [mm]
    pub pivot_offset_mm: f64,
    /// Specimen diameter used for the stress cross section [mm]
    pub specimen_diameter_mm: f64,
}

/// Plot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    pub window_duration_seconds: f64,
    pub plot_height: f32,
    pub colors: PlotColors,
}

/// Plot color configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotColors {
    pub angle: [u8; 3],
    pub force_left: [u8; 3],
    pub force_right: [u8; 3],
    pub pressure_left: [u8; 3],
    pub pressure_right: [u8; 3],
}

/// Channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub sample_channel_capacity: usize,
    pub command_channel_capacity: usize,
    pub status_channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            bench: BenchConfig::default(),
            rig: RigConfig::default(),
            plot: PlotConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            title: "BenchHub - Antagonistic Test Bench".to_string(),
            resizable: true,
            vsync: true,
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 115_200,
            handshake_timeout_ms: 3000,
            read_timeout_ms: 100,
            settle_ms: 500,
            poll_interval_ms: 20,
            encoder_counts_per_rev: 4000,
            auto_connect: false,
        }
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            support_radius_mm: 40.0,
            support_span_mm: 120.0,
            pivot_offset_mm: 40.0,
            specimen_diameter_mm: 4.0,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window_duration_seconds: 5.0,
            plot_height: 100.0,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            angle: [0, 0, 255],
            force_left: [255, 0, 0],
            force_right: [255, 140, 0],
            pressure_left: [0, 150, 0],
            pressure_right: [128, 0, 128],
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            sample_channel_capacity: 5000,
            command_channel_capacity: 100,
            status_channel_capacity: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Window dimensions must be positive".to_string(),
            ));
        }

        if self.bench.baud_rate == 0 {
            return Err(ConfigError::ValidationError(
                "Baud rate must be positive".to_string(),
            ));
        }

        if self.bench.encoder_counts_per_rev == 0 {
            return Err(ConfigError::ValidationError(
                "Encoder counts per revolution must be positive".to_string(),
            ));
        }

        if self.bench.handshake_timeout_ms == 0 || self.bench.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Bench timeouts must be positive".to_string(),
            ));
        }

        if self.rig.support_radius_mm <= 0.0
            || self.rig.support_span_mm <= 0.0
            || self.rig.pivot_offset_mm <= 0.0
        {
            return Err(ConfigError::ValidationError(
                "Rig dimensions must be positive".to_string(),
            ));
        }

        if self.rig.specimen_diameter_mm <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Specimen diameter must be positive".to_string(),
            ));
        }

        if self.plot.window_duration_seconds <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Plot window duration must be positive".to_string(),
            ));
        }

        if self.channels.sample_channel_capacity == 0
            || self.channels.command_channel_capacity == 0
            || self.channels.status_channel_capacity == 0
        {
            return Err(ConfigError::ValidationError(
                "Channel capacities must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Directory live-window captures are written to
    pub fn get_capture_directory(&self) -> PathBuf {
        PathBuf::from("captures")
    }
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Configuration manager
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// Current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable configuration
    pub fn get_config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Save configuration back to its source file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.config_path {
            self.config.save_to_file(path)?;
        }
        Ok(())
    }

    /// Save configuration to the given file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.config.save_to_file(path)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_counts_per_rev_is_rejected() {
        let mut config = AppConfig::default();
        config.bench.encoder_counts_per_rev = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn non_positive_rig_dimension_is_rejected() {
        let mut config = AppConfig::default();
        config.rig.support_span_mm = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_defaults_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.bench.baud_rate, config.bench.baud_rate);
        assert_eq!(
            parsed.rig.specimen_diameter_mm,
            config.rig.specimen_diameter_mm
        );
    }
}
