/// One data frame from the bench controller, still in raw units.
///
/// Forces are gram-force, pressures kPa, the encoder position raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    pub force_left: i32,
    pub force_right: i32,
    pub encoder_counts: i32,
    pub pressure_left: i32,
    pub pressure_right: i32,
}

/// Latest sensor snapshot with the encoder zero offset applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchReading {
    /// Force on the left load cell [gf]
    pub force_left: f64,
    /// Force on the right load cell [gf]
    pub force_right: f64,
    /// Encoder angle relative to the zero offset [deg]
    pub angle: f64,
    /// Raw encoder position [counts]
    pub encoder_counts: i32,
    /// Pressure on the left PTAM [kPa]
    pub pressure_left: f64,
    /// Pressure on the right PTAM [kPa]
    pub pressure_right: f64,
    /// Unix millisecond timestamp stamped when the frame was parsed
    pub timestamp: i64,
}

impl BenchReading {
    pub fn from_frame(
        frame: &RawFrame,
        encoder_zero: i32,
        counts_per_rev: u32,
        timestamp: i64,
    ) -> Self {
        Self {
            force_left: f64::from(frame.force_left),
            force_right: f64::from(frame.force_right),
            angle: counts_to_degrees(frame.encoder_counts, encoder_zero, counts_per_rev),
            encoder_counts: frame.encoder_counts,
            pressure_left: f64::from(frame.pressure_left),
            pressure_right: f64::from(frame.pressure_right),
            timestamp,
        }
    }
}

/// Convert a raw encoder position to degrees relative to the zero offset.
pub fn counts_to_degrees(counts: i32, encoder_zero: i32, counts_per_rev: u32) -> f64 {
    f64::from(counts - encoder_zero) / f64::from(counts_per_rev) * 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS_PER_REV: u32 = 4000;

    #[test]
    fn counts_convert_to_degrees() {
        assert_eq!(counts_to_degrees(1000, 0, COUNTS_PER_REV), 90.0);
        assert_eq!(counts_to_degrees(4000, 0, COUNTS_PER_REV), 360.0);
        assert_eq!(counts_to_degrees(500, 1500, COUNTS_PER_REV), -90.0);
    }

    #[test]
    fn zeroed_counts_report_zero_degrees() {
        let frame = RawFrame {
            force_left: 120,
            force_right: 340,
            encoder_counts: 2731,
            pressure_left: 55,
            pressure_right: 61,
        };
        // offset equal to the instantaneous raw counts, as set by zeroing
        let reading = BenchReading::from_frame(&frame, 2731, COUNTS_PER_REV, 0);
        assert_eq!(reading.angle, 0.0);
        assert_eq!(reading.encoder_counts, 2731);
    }

    #[test]
    fn frame_fields_carry_over() {
        let frame = RawFrame {
            force_left: 1,
            force_right: 2,
            encoder_counts: 3,
            pressure_left: 4,
            pressure_right: 5,
        };
        let reading = BenchReading::from_frame(&frame, 0, COUNTS_PER_REV, 42);
        assert_eq!(reading.force_left, 1.0);
        assert_eq!(reading.force_right, 2.0);
        assert_eq!(reading.pressure_left, 4.0);
        assert_eq!(reading.pressure_right, 5.0);
        assert_eq!(reading.timestamp, 42);
    }
}
