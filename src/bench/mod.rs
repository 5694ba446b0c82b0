pub mod error;
pub mod session;
pub mod worker;

pub use error::BenchError;
pub use session::BenchSession;
pub use worker::run_bench_worker;
