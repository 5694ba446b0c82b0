use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use std::collections::VecDeque;

use crate::config::PlotConfig;
use crate::types::{BenchReading, CapturedSeries};

/// Format a number as a fixed-width y axis label
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// Scrolling live view of the bench channels.
///
/// Ring buffers sized for the configured window; the oldest reading draws
/// at the left edge, the newest at the right.
#[derive(Debug)]
pub struct BenchPlot {
    angle: VecDeque<f64>,
    force_left: VecDeque<f64>,
    force_right: VecDeque<f64>,
    pressure_left: VecDeque<f64>,
    pressure_right: VecDeque<f64>,
    timestamps: VecDeque<i64>,
    max_samples: usize,
    window_duration: f64,
}

impl BenchPlot {
    pub fn new(sample_rate: usize, config: &PlotConfig) -> Self {
        let window_seconds = config.window_duration_seconds;
        let max_samples = ((window_seconds * sample_rate as f64) as usize).max(2);

        Self {
            angle: VecDeque::with_capacity(max_samples),
            force_left: VecDeque::with_capacity(max_samples),
            force_right: VecDeque::with_capacity(max_samples),
            pressure_left: VecDeque::with_capacity(max_samples),
            pressure_right: VecDeque::with_capacity(max_samples),
            timestamps: VecDeque::with_capacity(max_samples),
            max_samples,
            window_duration: window_seconds,
        }
    }

    pub fn add_reading(&mut self, reading: &BenchReading) {
        self.angle.push_back(reading.angle);
        self.force_left.push_back(reading.force_left);
        self.force_right.push_back(reading.force_right);
        self.pressure_left.push_back(reading.pressure_left);
        self.pressure_right.push_back(reading.pressure_right);
        self.timestamps.push_back(reading.timestamp);

        // drop the oldest reading once the window is full - O(1)
        if self.angle.len() > self.max_samples {
            self.angle.pop_front();
            self.force_left.pop_front();
            self.force_right.pop_front();
            self.pressure_left.pop_front();
            self.pressure_right.pop_front();
            self.timestamps.pop_front();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Convert the current window into a captured series.
    ///
    /// Times are rebased to seconds from the first reading in the window,
    /// matching the Time [s] column of externally captured tables.
    pub fn snapshot(&self) -> CapturedSeries {
        let mut series = CapturedSeries::new();
        let first_timestamp = self.timestamps.front().copied().unwrap_or(0);

        for index in 0..self.timestamps.len() {
            series.push_row(
                (self.timestamps[index] - first_timestamp) as f64 / 1000.0,
                self.angle[index],
                self.force_left[index],
                self.force_right[index],
                self.pressure_left[index],
                self.pressure_right[index],
            );
        }

        series
    }

    pub fn ui(&self, ui: &mut egui::Ui, config: &PlotConfig) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading("Angle");
                self.plot_channel(ui, "Angle [deg]", &self.angle, rgb(config.colors.angle), config);

                ui.separator();

                ui.heading("Force");
                self.plot_channel_pair(
                    ui,
                    "Force [gf]",
                    &self.force_left,
                    &self.force_right,
                    rgb(config.colors.force_left),
                    rgb(config.colors.force_right),
                    config,
                );

                ui.separator();

                ui.heading("Pressure");
                self.plot_channel_pair(
                    ui,
                    "Pressure [kPa]",
                    &self.pressure_left,
                    &self.pressure_right,
                    rgb(config.colors.pressure_left),
                    rgb(config.colors.pressure_right),
                    config,
                );
            });
        });
    }

    fn plot_channel(
        &self,
        ui: &mut egui::Ui,
        title: &str,
        buffer: &VecDeque<f64>,
        color: Color32,
        config: &PlotConfig,
    ) {
        if buffer.is_empty() {
            return;
        }

        let (y_min, y_max) = padded_range(buffer.iter());
        let dt = self.window_duration / (self.max_samples as f64);

        Plot::new(title)
            .height(config.plot_height)
            .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
            .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                let points: Vec<[f64; 2]> = buffer
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [i as f64 * dt, y])
                    .collect();

                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, y_min],
                    [self.window_duration, y_max],
                ));

                plot_ui.line(Line::new(title, PlotPoints::from(points)).color(color).width(1.0));
            });
    }

    #[allow(clippy::too_many_arguments)]
    fn plot_channel_pair(
        &self,
        ui: &mut egui::Ui,
        title: &str,
        left: &VecDeque<f64>,
        right: &VecDeque<f64>,
        left_color: Color32,
        right_color: Color32,
        config: &PlotConfig,
    ) {
        if left.is_empty() && right.is_empty() {
            return;
        }

        let (y_min, y_max) = padded_range(left.iter().chain(right.iter()));
        let dt = self.window_duration / (self.max_samples as f64);

        Plot::new(title)
            .height(config.plot_height)
            .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
            .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, y_min],
                    [self.window_duration, y_max],
                ));

                let left_points: Vec<[f64; 2]> = left
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [i as f64 * dt, y])
                    .collect();
                let right_points: Vec<[f64; 2]> = right
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [i as f64 * dt, y])
                    .collect();

                plot_ui.line(
                    Line::new("Left", PlotPoints::from(left_points))
                        .color(left_color)
                        .width(1.0),
                );
                plot_ui.line(
                    Line::new("Right", PlotPoints::from(right_points))
                        .color(right_color)
                        .width(1.0),
                );
            });
    }
}

/// Render the three stacked raw-data charts for a captured series.
pub fn raw_data_ui(ui: &mut egui::Ui, series: &CapturedSeries, config: &PlotConfig) {
    if series.is_empty() {
        ui.label("No data loaded");
        return;
    }

    plot_series(
        ui,
        "Raw Angle [deg]",
        &series.time,
        &[("Angle", &series.angle, rgb(config.colors.angle))],
        config,
    );
    plot_series(
        ui,
        "Raw Force [gf]",
        &series.time,
        &[
            ("Left", &series.force_left, rgb(config.colors.force_left)),
            ("Right", &series.force_right, rgb(config.colors.force_right)),
        ],
        config,
    );
    plot_series(
        ui,
        "Raw Pressure [kPa]",
        &series.time,
        &[
            ("Left", &series.pressure_left, rgb(config.colors.pressure_left)),
            ("Right", &series.pressure_right, rgb(config.colors.pressure_right)),
        ],
        config,
    );
}

fn plot_series(
    ui: &mut egui::Ui,
    title: &str,
    time: &[f64],
    channels: &[(&str, &Vec<f64>, Color32)],
    config: &PlotConfig,
) {
    let (y_min, y_max) = padded_range(channels.iter().flat_map(|(_, values, _)| values.iter()));
    let x_min = time.first().copied().unwrap_or(0.0);
    let x_max = time.last().copied().unwrap_or(1.0).max(x_min + f64::EPSILON);

    ui.label(title);
    Plot::new(title)
        .height(config.plot_height)
        .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .allow_drag(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));

            for (name, values, color) in channels {
                let points: Vec<[f64; 2]> = time
                    .iter()
                    .zip(values.iter())
                    .map(|(&t, &y)| [t, y])
                    .collect();
                plot_ui.line(
                    Line::new(*name, PlotPoints::from(points))
                        .color(*color)
                        .width(1.0),
                );
            }
        });
}

/// Dynamic y range with 5% headroom on each side.
fn padded_range<'a, I: Iterator<Item = &'a f64>>(values: I) -> (f64, f64) {
    let (y_min, y_max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &val| {
        (min.min(val), max.max(val))
    });

    let range = (y_max - y_min).max(0.1);
    (y_min - range * 0.05, y_max + range * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::types::BenchReading;

    fn reading(timestamp: i64, angle: f64) -> BenchReading {
        BenchReading {
            force_left: 100.0,
            force_right: 110.0,
            angle,
            encoder_counts: 0,
            pressure_left: 55.0,
            pressure_right: 56.0,
            timestamp,
        }
    }

    #[test]
    fn window_holds_at_most_max_samples() {
        let config = PlotConfig {
            window_duration_seconds: 1.0,
            ..PlotConfig::default()
        };
        let mut plot = BenchPlot::new(10, &config);

        for i in 0..25 {
            plot.add_reading(&reading(i * 100, i as f64));
        }

        let snapshot = plot.snapshot();
        assert_eq!(snapshot.len(), 10);
        // the oldest readings were dropped
        assert_eq!(snapshot.angle.first().copied(), Some(15.0));
    }

    #[test]
    fn snapshot_rebases_time_to_window_start() {
        let config = PlotConfig::default();
        let mut plot = BenchPlot::new(100, &config);

        plot.add_reading(&reading(1_700_000_000_000, 0.0));
        plot.add_reading(&reading(1_700_000_000_050, 1.0));
        plot.add_reading(&reading(1_700_000_000_100, 2.0));

        let snapshot = plot.snapshot();
        assert_eq!(snapshot.time, vec![0.0, 0.05, 0.1]);
        assert_eq!(snapshot.force_left, vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn empty_plot_snapshots_empty_series() {
        let plot = BenchPlot::new(100, &PlotConfig::default());
        assert!(plot.is_empty());
        assert!(plot.snapshot().is_empty());
    }
}
