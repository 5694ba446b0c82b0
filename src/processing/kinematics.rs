use std::f64::consts::FRAC_PI_2;

use crate::types::CapturedSeries;

/// Rig dimensions of the antagonistic bench, all in millimetres.
#[derive(Debug, Clone, Copy)]
pub struct RigGeometry {
    /// Distance between the top actuator support and the bench centreline.
    pub support_radius_mm: f64,
    /// Vertical distance between the top and bottom actuator supports.
    pub support_span_mm: f64,
    /// Distance between the bottom actuator support and the rotation axis.
    pub pivot_offset_mm: f64,
}

/// Angular rate [deg/s] between consecutive samples.
///
/// One fewer element than the input; empty for fewer than two samples.
pub fn angular_rate(series: &CapturedSeries) -> Vec<f64> {
    finite_difference(&series.angle, &series.time)
}

/// Linear strain [%] of the actuator and its rate [%/s].
///
/// The rig maps the bench angle to actuator elongation through a fixed
/// trigonometric chain: the actuator runs from the top support R (radius
/// `rs` off the centreline, span `so` above the pivot plane) to the bottom
/// support P (offset `po` from the rotation axis O). Requires the encoder
/// to have been zeroed at the horizontal reference position.
pub fn linear_strain(series: &CapturedSeries, rig: &RigGeometry) -> (Vec<f64>, Vec<f64>) {
    let rs = rig.support_radius_mm;
    let so = rig.support_span_mm;
    let po = rig.pivot_offset_mm;

    let beta = (rs / so).atan();
    let ro = rs / beta.sin();

    let strain: Vec<f64> = series
        .angle
        .iter()
        .map(|&angle| {
            let theta = angle.to_radians();
            let alpha = FRAC_PI_2 - theta - beta;
            let pq = po * alpha.sin();
            let qo = po * alpha.cos();
            let rq = ro - qo;
            let rp = (rq * rq + pq * pq).sqrt();
            (rp - so) / so * 100.0
        })
        .collect();

    let strain_rate = finite_difference(&strain, &series.time);
    (strain, strain_rate)
}

/// Consecutive finite differences of `values` over `time`.
fn finite_difference(values: &[f64], time: &[f64]) -> Vec<f64> {
    let samples = values.len().min(time.len());
    (1..samples)
        .map(|index| (values[index] - values[index - 1]) / (time[index] - time[index - 1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference rig: strain is zero at 0 deg when the top support radius
    /// equals the bottom pivot offset.
    fn reference_rig() -> RigGeometry {
        RigGeometry {
            support_radius_mm: 40.0,
            support_span_mm: 120.0,
            pivot_offset_mm: 40.0,
        }
    }

    fn angle_series(times: &[f64], angles: &[f64]) -> CapturedSeries {
        let mut series = CapturedSeries::new();
        for (&time, &angle) in times.iter().zip(angles) {
            series.push_row(time, angle, 0.0, 0.0, 0.0, 0.0);
        }
        series
    }

    #[test]
    fn angular_rate_of_constant_slope() {
        // angle = 2 deg/s * t
        let times = [0.0, 0.5, 1.0, 1.5, 2.0];
        let angles: Vec<f64> = times.iter().map(|t| 2.0 * t).collect();
        let series = angle_series(&times, &angles);

        let rates = angular_rate(&series);
        assert_eq!(rates.len(), series.len() - 1);
        for rate in rates {
            assert!((rate - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn angular_rate_needs_two_samples() {
        assert!(angular_rate(&CapturedSeries::new()).is_empty());
        assert!(angular_rate(&angle_series(&[0.0], &[1.0])).is_empty());
    }

    #[test]
    fn strain_is_zero_at_reference_position() {
        let series = angle_series(&[0.0, 1.0], &[0.0, 0.0]);
        let (strain, strain_rate) = linear_strain(&series, &reference_rig());

        assert_eq!(strain.len(), 2);
        for value in &strain {
            assert!(value.abs() < 1e-9);
        }
        // constant angle, so no strain rate either
        assert_eq!(strain_rate.len(), 1);
        assert!(strain_rate[0].abs() < 1e-9);
    }

    #[test]
    fn strain_rate_has_length_rule() {
        let times = [0.0, 0.1, 0.2, 0.3];
        let angles = [0.0, 2.0, 4.5, 7.0];
        let series = angle_series(&times, &angles);

        let (strain, strain_rate) = linear_strain(&series, &reference_rig());
        assert_eq!(strain.len(), series.len());
        assert_eq!(strain_rate.len(), series.len() - 1);
    }

    #[test]
    fn rotation_sign_matches_actuator_length() {
        // Rotating toward the support side shortens the actuator and away
        // from it stretches it.
        let series = angle_series(&[0.0, 0.1, 0.2], &[0.0, 10.0, -10.0]);
        let (strain, _) = linear_strain(&series, &reference_rig());
        assert!(strain[1] < 0.0);
        assert!(strain[2] > 0.0);
    }
}
