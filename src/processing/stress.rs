use std::f64::consts::PI;

use log::info;

use crate::types::CapturedSeries;

/// Standard gravity used to convert gram-force to newtons.
const STANDARD_GRAVITY: f64 = 9.81;

/// Peak engineering stress [MPa] on the left actuator, assuming a constant
/// circular cross section of the given diameter [mm].
///
/// `None` when the series is empty or the diameter is not positive.
pub fn engineering_stress_left(series: &CapturedSeries, diameter_mm: f64) -> Option<f64> {
    peak_stress(&series.force_left, diameter_mm, "left")
}

/// Peak engineering stress [MPa] on the right actuator.
pub fn engineering_stress_right(series: &CapturedSeries, diameter_mm: f64) -> Option<f64> {
    peak_stress(&series.force_right, diameter_mm, "right")
}

fn peak_stress(forces_gf: &[f64], diameter_mm: f64, side: &str) -> Option<f64> {
    if forces_gf.is_empty() || diameter_mm <= 0.0 {
        return None;
    }

    let area = PI * (diameter_mm / 2.0).powi(2);
    let peak_gf = forces_gf.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let peak_newtons = peak_gf / 1000.0 * STANDARD_GRAVITY;
    let stress = peak_newtons / area;

    info!("maximum force {} = {} N", side, peak_newtons);
    info!("maximum stress {} = {} MPa", side, stress);

    Some(stress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force_series(left: &[f64], right: &[f64]) -> CapturedSeries {
        let mut series = CapturedSeries::new();
        for (index, (&fl, &fr)) in left.iter().zip(right).enumerate() {
            series.push_row(index as f64 * 0.1, 0.0, fl, fr, 0.0, 0.0);
        }
        series
    }

    #[test]
    fn stress_matches_closed_form() {
        let series = force_series(&[100.0, 250.0, 180.0], &[90.0, 120.0, 300.0]);
        let diameter = 4.0;

        // area = pi * (d/2)^2, peak force converted gf -> N
        let area = PI * 4.0;
        let expected_left = (250.0 / 1000.0 * 9.81) / area;
        let expected_right = (300.0 / 1000.0 * 9.81) / area;

        let left = engineering_stress_left(&series, diameter).unwrap();
        let right = engineering_stress_right(&series, diameter).unwrap();
        assert!((left - expected_left).abs() < 1e-12);
        assert!((right - expected_right).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_stress() {
        let series = CapturedSeries::new();
        assert!(engineering_stress_left(&series, 4.0).is_none());
        assert!(engineering_stress_right(&series, 4.0).is_none());
    }

    #[test]
    fn non_positive_diameter_is_rejected() {
        let series = force_series(&[100.0], &[100.0]);
        assert!(engineering_stress_left(&series, 0.0).is_none());
        assert!(engineering_stress_right(&series, -1.0).is_none());
    }
}
