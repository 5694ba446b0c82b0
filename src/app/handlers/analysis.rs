use chrono::Utc;
use log::{error, info};

use crate::app::bench_app::BenchApp;
use crate::processing::{
    angular_rate, engineering_stress_left, engineering_stress_right, linear_strain, RigGeometry,
};
use crate::types::CapturedSeries;

pub struct AnalysisHandler;

impl AnalysisHandler {
    /// Load the CSV named in the analysis panel and recompute the summaries.
    pub fn load_series(app: &mut BenchApp) {
        let path = app.state.analysis.csv_path.trim().to_string();
        if path.is_empty() {
            app.state.analysis.status = "No file given".to_string();
            return;
        }

        match CapturedSeries::from_csv_file(&path) {
            Ok(series) => {
                info!("loaded {} samples from {}", series.len(), path);
                Self::recompute(app, &series);
                app.state.analysis.status = format!("Loaded {} samples from {}", series.len(), path);
                app.state.analysis.series = Some(series);
            }
            Err(err) => {
                error!("failed to load {}: {}", path, err);
                app.state.analysis.series = None;
                app.state.analysis.status = format!("Load failed: {}", err);
            }
        }
    }

    fn recompute(app: &mut BenchApp, series: &CapturedSeries) {
        let rig_config = app.config.get_config().rig;
        let rig = RigGeometry {
            support_radius_mm: rig_config.support_radius_mm,
            support_span_mm: rig_config.support_span_mm,
            pivot_offset_mm: rig_config.pivot_offset_mm,
        };
        let diameter = rig_config.specimen_diameter_mm;

        app.state.analysis.stress_left = engineering_stress_left(series, diameter);
        app.state.analysis.stress_right = engineering_stress_right(series, diameter);

        let rates = angular_rate(series);
        app.state.analysis.peak_angular_rate = peak_magnitude(&rates);

        let (strain, _strain_rate) = linear_strain(series, &rig);
        app.state.analysis.peak_strain = peak_magnitude(&strain);
    }

    /// Write the current live window to a timestamped CSV capture.
    pub fn capture_window(app: &mut BenchApp) {
        if app.state.plot.is_empty() {
            app.state.capture.save_status = "No data to save".to_string();
            return;
        }
        let series = app.state.plot.snapshot();

        let capture_dir = app.state.capture.capture_dir.clone();
        if let Err(err) = std::fs::create_dir_all(&capture_dir) {
            app.state.capture.save_status = format!("Failed to create {}: {}", capture_dir, err);
            error!("failed to create capture directory: {}", err);
            return;
        }

        let filename = format!(
            "{}/capture_{}.csv",
            capture_dir,
            Utc::now().format("%Y%m%d_%H%M%S")
        );

        match series.write_csv_file(&filename) {
            Ok(()) => {
                app.state.capture.save_status =
                    format!("Saved {} samples to {}", series.len(), filename);
                info!("saved {} samples to {}", series.len(), filename);
            }
            Err(err) => {
                app.state.capture.save_status = format!("Save failed: {}", err);
                error!("failed to write {}: {}", filename, err);
            }
        }
    }
}

fn peak_magnitude(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .map(|value| value.abs())
        .fold(None, |acc, value| {
            Some(acc.map_or(value, |peak: f64| peak.max(value)))
        })
}
