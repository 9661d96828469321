//! Producer/consumer benchmark harness
//!
//! - `orchestrator`: thread lifecycle and the termination protocol
//! - `workload`: the per-thread steps each variant supplies
//! - `variants`: container/discipline pairs (mutex, condvar, lock-free, SPSC)
//! - `sink`: console and CSV result reporting
//! - `sweep`: runs every variant over a grid of thread counts

pub mod orchestrator;
pub mod progress;
pub mod result;
pub mod sink;
pub mod sweep;
pub mod variants;
pub mod workload;

pub use orchestrator::Benchmark;
pub use progress::{poll_until_done, Progress};
pub use result::BenchmarkResult;
pub use sink::{ConsoleReport, ResultLog, ResultSink};
pub use sweep::run_sweep;
pub use variants::{Variant, VariantOptions};
pub use workload::Workload;
