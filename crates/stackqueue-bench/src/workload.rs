use std::ops::Range;

use crate::progress::Progress;

/// The per-thread steps a benchmark variant plugs into [`crate::Benchmark`].
///
/// One workload instance owns one container and is shared by reference with
/// every producer and consumer thread of a single run.
pub trait Workload: Send + Sync {
    /// Body of one producer thread: insert every item of `items`, calling
    /// [`Progress::record_produced`] after each insertion.
    fn produce(&self, progress: &Progress, items: Range<u64>);

    /// Body of one consumer thread: remove up to `quota` items, calling
    /// [`Progress::record_consumed`] after each removal.
    fn consume(&self, progress: &Progress, quota: usize);

    /// Called by the orchestrator right after the producers-done flag is
    /// raised. Blocking variants wake their sleeping consumers here so they
    /// can notice that no more items will arrive.
    fn producers_finished(&self) {}

    /// Items still held by the container. Only meaningful after every worker
    /// has been joined.
    fn remaining(&self) -> usize;
}
