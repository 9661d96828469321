use crossbeam_utils::Backoff;
use stackqueue_core::PollStrategy;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Counters shared by every thread of one run. Built fresh per run and
/// borrowed by the workers; never global.
#[derive(Debug, Default)]
pub struct Progress {
    produced: AtomicUsize,
    consumed: AtomicUsize,
    producers_done: AtomicBool,
    worker_failed: AtomicBool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_produced(&self) {
        self.produced.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_consumed(&self) {
        self.consumed.fetch_add(1, Ordering::Relaxed);
    }

    /// Called by the orchestrator once every producer thread has been joined.
    pub fn mark_producers_done(&self) {
        self.producers_done.store(true, Ordering::Release);
    }

    pub fn producers_done(&self) -> bool {
        self.producers_done.load(Ordering::Acquire)
    }

    pub fn produced(&self) -> usize {
        self.produced.load(Ordering::Relaxed)
    }

    pub fn consumed(&self) -> usize {
        self.consumed.load(Ordering::Relaxed)
    }

    /// Stop condition for non-blocking consumers: own quota met, or producers
    /// are finished and everything they produced has been consumed.
    ///
    /// The acquire load of the done flag pairs with the release store made
    /// after the producer joins, so the relaxed `produced` read that follows
    /// sees the final count.
    pub fn should_stop(&self, taken: usize, quota: usize) -> bool {
        taken >= quota || self.drained()
    }

    /// Producers are finished and everything they produced has been consumed.
    /// Also true when a producer panicked before reaching its quota.
    pub fn drained(&self) -> bool {
        self.producers_done() && self.consumed() >= self.produced()
    }

    /// Raised by a worker that is unwinding, so peers stuck on a condition
    /// only that worker could satisfy stop waiting.
    pub fn mark_worker_failed(&self) {
        self.worker_failed.store(true, Ordering::Release);
    }

    pub fn worker_failed(&self) -> bool {
        self.worker_failed.load(Ordering::Acquire)
    }
}

/// Drive a non-blocking consumer. `try_take` attempts one removal and reports
/// whether it got an item. Returns how many items this consumer took.
///
/// An empty container is not waited on: the thread yields (or snoozes with
/// bounded backoff) and polls again.
pub fn poll_until_done(
    progress: &Progress,
    quota: usize,
    strategy: PollStrategy,
    mut try_take: impl FnMut() -> bool,
) -> usize {
    let backoff = Backoff::new();
    let mut taken = 0usize;
    while !progress.should_stop(taken, quota) {
        if try_take() {
            progress.record_consumed();
            taken += 1;
            backoff.reset();
            continue;
        }
        idle(strategy, &backoff);
    }
    taken
}

#[inline]
pub(crate) fn idle(strategy: PollStrategy, backoff: &Backoff) {
    match strategy {
        PollStrategy::Yield => thread::yield_now(),
        PollStrategy::Backoff => backoff.snooze(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_quota() {
        let progress = Progress::new();
        assert!(!progress.should_stop(0, 1));
        assert!(progress.should_stop(1, 1));
    }

    #[test]
    fn stops_when_producers_done_and_drained() {
        let progress = Progress::new();
        progress.record_produced();
        progress.record_produced();
        progress.record_consumed();
        assert!(!progress.should_stop(0, 10));

        progress.mark_producers_done();
        assert!(!progress.should_stop(0, 10), "one item still outstanding");

        progress.record_consumed();
        assert!(progress.should_stop(0, 10));
    }

    #[test]
    fn drained_covers_short_production() {
        let progress = Progress::new();
        // a producer that died early: fewer items than any quota
        progress.record_produced();
        progress.record_consumed();
        assert!(!progress.drained());
        progress.mark_producers_done();
        assert!(progress.drained());
    }

    #[test]
    fn poll_takes_available_items_up_to_quota() {
        let progress = Progress::new();
        let mut items = vec![1, 2, 3, 4, 5];
        for _ in &items {
            progress.record_produced();
        }
        let taken = poll_until_done(&progress, 3, PollStrategy::Yield, || items.pop().is_some());
        assert_eq!(taken, 3);
        assert_eq!(progress.consumed(), 3);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn poll_returns_once_run_is_drained() {
        let progress = Progress::new();
        progress.mark_producers_done();
        // nothing was produced, so an empty container ends the loop immediately
        let taken = poll_until_done(&progress, 5, PollStrategy::Backoff, || false);
        assert_eq!(taken, 0);
    }
}
