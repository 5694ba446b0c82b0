pub mod acquisition;
pub mod analysis;

pub use acquisition::AcquisitionHandler;
pub use analysis::AnalysisHandler;
