use stackqueue_core::PollStrategy;
use stackqueue_structures::{Container, Locked};
use std::ops::Range;

use crate::progress::{poll_until_done, Progress};
use crate::workload::Workload;

/// Exclusive-lock discipline: producers `push`, consumers poll `pop` and
/// yield while the container is empty.
pub struct MutexWorkload<C> {
    container: Locked<C>,
    poll: PollStrategy,
}

impl<C: Container<Item = u64> + Default> MutexWorkload<C> {
    pub fn new(poll: PollStrategy) -> Self {
        Self {
            container: Locked::default(),
            poll,
        }
    }
}

impl<C> Workload for MutexWorkload<C>
where
    C: Container<Item = u64> + Send,
{
    fn produce(&self, progress: &Progress, items: Range<u64>) {
        for item in items {
            self.container.push(item);
            progress.record_produced();
        }
    }

    fn consume(&self, progress: &Progress, quota: usize) {
        poll_until_done(progress, quota, self.poll, || self.container.pop().is_some());
    }

    fn remaining(&self) -> usize {
        self.container.len()
    }
}

/// Blocking discipline: producers `push_notify`, each consumer performs
/// exactly `quota` blocking pops.
///
/// Once the producers-done flag is up, an empty container stays empty, so a
/// consumer that finds it so gives up on the rest of its quota. That only
/// happens when a producer stopped short.
pub struct CondvarWorkload<C> {
    container: Locked<C>,
}

impl<C: Container<Item = u64> + Default> CondvarWorkload<C> {
    pub fn new() -> Self {
        Self {
            container: Locked::default(),
        }
    }
}

impl<C: Container<Item = u64> + Default> Default for CondvarWorkload<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Workload for CondvarWorkload<C>
where
    C: Container<Item = u64> + Send,
{
    fn produce(&self, progress: &Progress, items: Range<u64>) {
        for item in items {
            self.container.push_notify(item);
            progress.record_produced();
        }
    }

    fn consume(&self, progress: &Progress, quota: usize) {
        for _ in 0..quota {
            if self
                .container
                .pop_wait_while(|| !progress.producers_done())
                .is_none()
            {
                break;
            }
            progress.record_consumed();
        }
    }

    fn producers_finished(&self) {
        self.container.wake_all();
    }

    fn remaining(&self) -> usize {
        self.container.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackqueue_structures::{TwoStackQueue, VecStack};

    #[test]
    fn mutex_workload_single_thread_round_trip() {
        let w: MutexWorkload<VecStack<u64>> = MutexWorkload::new(PollStrategy::Yield);
        let progress = Progress::new();
        w.produce(&progress, 0..10);
        assert_eq!(w.remaining(), 10);
        w.consume(&progress, 4);
        assert_eq!(progress.consumed(), 4);
        assert_eq!(w.remaining(), 6);
    }

    #[test]
    fn condvar_workload_consumes_exact_quota() {
        let w: CondvarWorkload<TwoStackQueue<VecStack<u64>>> = CondvarWorkload::new();
        let progress = Progress::new();
        w.produce(&progress, 100..105);
        w.consume(&progress, 5);
        assert_eq!(progress.produced(), 5);
        assert_eq!(progress.consumed(), 5);
        assert_eq!(w.remaining(), 0);
    }

    #[test]
    fn condvar_consumer_leaves_when_production_falls_short() {
        let w: CondvarWorkload<VecStack<u64>> = CondvarWorkload::new();
        let progress = Progress::new();
        w.produce(&progress, 0..3);
        progress.mark_producers_done();
        w.producers_finished();
        // quota of 5 but only 3 items will ever exist
        w.consume(&progress, 5);
        assert_eq!(progress.consumed(), 3);
    }
}
