pub mod commands;
pub mod reading;
pub mod series;
pub mod status;

pub use commands::BenchCommand;
pub use reading::{counts_to_degrees, BenchReading, RawFrame};
pub use series::{CapturedSeries, SeriesError};
pub use status::LinkStatus;
