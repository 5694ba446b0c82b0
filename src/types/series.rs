use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub const TIME_COLUMN: &str = "Time [s]";
pub const ANGLE_COLUMN: &str = "Angle [deg]";
pub const FORCE_LEFT_COLUMN: &str = "Force Left [gf]";
pub const FORCE_RIGHT_COLUMN: &str = "Force Right [gf]";
pub const PRESSURE_LEFT_COLUMN: &str = "Pressure Left [kPa]";
pub const PRESSURE_RIGHT_COLUMN: &str = "Pressure Right [kPa]";

/// Captured series error type
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing column {0:?}")]
    MissingColumn(&'static str),
    #[error("file has no header row")]
    Empty,
    #[error("row {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {line}: invalid number {cell:?}")]
    BadNumber { line: usize, cell: String },
}

/// A captured time-series table from the test bench.
///
/// Column-oriented so the processing functions can walk a single channel
/// without touching the others. All columns have equal length.
#[derive(Debug, Clone, Default)]
pub struct CapturedSeries {
    pub time: Vec<f64>,
    pub angle: Vec<f64>,
    pub force_left: Vec<f64>,
    pub force_right: Vec<f64>,
    pub pressure_left: Vec<f64>,
    pub pressure_right: Vec<f64>,
}

impl CapturedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn push_row(
        &mut self,
        time: f64,
        angle: f64,
        force_left: f64,
        force_right: f64,
        pressure_left: f64,
        pressure_right: f64,
    ) {
        self.time.push(time);
        self.angle.push(angle);
        self.force_left.push(force_left);
        self.force_right.push(force_right);
        self.pressure_left.push(pressure_left);
        self.pressure_right.push(pressure_right);
    }

    /// Load a captured series from a CSV file with the bench column schema.
    ///
    /// The header must name all six columns; column order is free.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, SeriesError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_reader<R: BufRead>(reader: R) -> Result<Self, SeriesError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(SeriesError::Empty),
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let layout = ColumnLayout::from_header(&columns)?;

        let mut series = Self::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            // header is line 1, first data row is line 2
            let line_no = index + 2;
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != columns.len() {
                return Err(SeriesError::RaggedRow {
                    line: line_no,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
            series.push_row(
                parse_cell(&cells, layout.time, line_no)?,
                parse_cell(&cells, layout.angle, line_no)?,
                parse_cell(&cells, layout.force_left, line_no)?,
                parse_cell(&cells, layout.force_right, line_no)?,
                parse_cell(&cells, layout.pressure_left, line_no)?,
                parse_cell(&cells, layout.pressure_right, line_no)?,
            );
        }

        Ok(series)
    }

    /// Write the series as CSV in the same schema `from_csv_file` reads.
    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SeriesError> {
        let mut file = File::create(path)?;

        writeln!(
            file,
            "{},{},{},{},{},{}",
            TIME_COLUMN,
            ANGLE_COLUMN,
            FORCE_LEFT_COLUMN,
            FORCE_RIGHT_COLUMN,
            PRESSURE_LEFT_COLUMN,
            PRESSURE_RIGHT_COLUMN
        )?;

        for index in 0..self.len() {
            writeln!(
                file,
                "{},{},{},{},{},{}",
                self.time[index],
                self.angle[index],
                self.force_left[index],
                self.force_right[index],
                self.pressure_left[index],
                self.pressure_right[index]
            )?;
        }

        Ok(())
    }
}

/// Column indices resolved from a CSV header.
struct ColumnLayout {
    time: usize,
    angle: usize,
    force_left: usize,
    force_right: usize,
    pressure_left: usize,
    pressure_right: usize,
}

impl ColumnLayout {
    fn from_header(columns: &[&str]) -> Result<Self, SeriesError> {
        let find = |name: &'static str| -> Result<usize, SeriesError> {
            columns
                .iter()
                .position(|column| *column == name)
                .ok_or(SeriesError::MissingColumn(name))
        };

        Ok(Self {
            time: find(TIME_COLUMN)?,
            angle: find(ANGLE_COLUMN)?,
            force_left: find(FORCE_LEFT_COLUMN)?,
            force_right: find(FORCE_RIGHT_COLUMN)?,
            pressure_left: find(PRESSURE_LEFT_COLUMN)?,
            pressure_right: find(PRESSURE_RIGHT_COLUMN)?,
        })
    }
}

fn parse_cell(cells: &[&str], index: usize, line_no: usize) -> Result<f64, SeriesError> {
    let cell = cells[index];
    cell.parse::<f64>().map_err(|_| SeriesError::BadNumber {
        line: line_no,
        cell: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_CSV: &str = "\
Time [s],Angle [deg],Force Left [gf],Force Right [gf],Pressure Left [kPa],Pressure Right [kPa]
0.0,0.0,100,110,55,56
0.1,1.5,120,130,60,62
0.2,3.0,150,170,65,68
";

    #[test]
    fn parses_schema_csv() {
        let series = CapturedSeries::from_reader(Cursor::new(SAMPLE_CSV)).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.time, vec![0.0, 0.1, 0.2]);
        assert_eq!(series.angle[1], 1.5);
        assert_eq!(series.force_right[2], 170.0);
        assert_eq!(series.pressure_left[0], 55.0);
    }

    #[test]
    fn column_order_is_free() {
        let csv = "\
Angle [deg],Time [s],Pressure Right [kPa],Pressure Left [kPa],Force Right [gf],Force Left [gf]
2.0,0.5,61,60,40,30
";
        let series = CapturedSeries::from_reader(Cursor::new(csv)).unwrap();
        assert_eq!(series.time, vec![0.5]);
        assert_eq!(series.angle, vec![2.0]);
        assert_eq!(series.force_left, vec![30.0]);
        assert_eq!(series.pressure_right, vec![61.0]);
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "Time [s],Angle [deg],Force Left [gf]\n0.0,0.0,10\n";
        let err = CapturedSeries::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn(_)));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let csv = format!("{}0.3,4.5,160\n", SAMPLE_CSV);
        let err = CapturedSeries::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, SeriesError::RaggedRow { line: 5, .. }));
    }

    #[test]
    fn bad_number_is_rejected() {
        let csv = "\
Time [s],Angle [deg],Force Left [gf],Force Right [gf],Pressure Left [kPa],Pressure Right [kPa]
0.0,zero,100,110,55,56
";
        let err = CapturedSeries::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, SeriesError::BadNumber { line: 2, .. }));
    }

    #[test]
    fn written_capture_parses_back() {
        let mut series = CapturedSeries::new();
        series.push_row(0.0, 0.0, 100.0, 110.0, 55.0, 56.0);
        series.push_row(0.05, 0.9, 105.0, 115.0, 57.0, 58.0);

        let dir = std::env::temp_dir().join("benchhub_series_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("capture.csv");
        series.write_csv_file(&path).unwrap();

        let loaded = CapturedSeries::from_csv_file(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.angle, series.angle);
        assert_eq!(loaded.time, series.time);

        std::fs::remove_file(&path).ok();
    }
}
