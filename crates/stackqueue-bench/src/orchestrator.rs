use stackqueue_core::{Result, RunConfig, StackQueueError, WorkerRole};
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Instant;
use tracing::{debug, info};

use crate::progress::Progress;
use crate::result::BenchmarkResult;
use crate::workload::Workload;

/// One producer/consumer experiment: P producer threads and C consumer
/// threads run a [`Workload`] against a freshly built container.
///
/// Termination protocol: consumers only see the producers-done flag after
/// every producer thread has been joined, so "done and nothing left" is a
/// real end of work rather than a race.
pub struct Benchmark {
    name: String,
    config: RunConfig,
    workload: Box<dyn Workload>,
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Benchmark {
    /// Validates the shape up front so a bad configuration never spawns a thread.
    pub fn new(
        name: impl Into<String>,
        config: RunConfig,
        workload: Box<dyn Workload>,
    ) -> Result<Self> {
        let name = name.into();
        config.validate()?;
        if name.is_empty() || name.contains(',') || name.contains('\n') {
            return Err(StackQueueError::InvalidConfig(format!(
                "benchmark name '{name}' must be non-empty and free of commas and newlines"
            )));
        }
        Ok(Self {
            name,
            config,
            workload,
        })
    }

    /// Spawn all producers then all consumers, join the producers, raise the
    /// done flag, join the consumers, and report the wall-clock time.
    pub fn run(self) -> Result<BenchmarkResult> {
        let producer_quotas = self.config.producer_quotas();
        let consumer_quotas = self.config.consumer_quotas();
        let progress = Progress::new();
        let workload: &dyn Workload = self.workload.as_ref();

        debug!(
            benchmark = %self.name,
            producers = self.config.producers,
            consumers = self.config.consumers,
            total_items = self.config.total_items,
            "starting run"
        );

        let start = Instant::now();
        thread::scope(|scope| -> Result<()> {
            let mut next_item = 0u64;
            let producers = producer_quotas
                .iter()
                .enumerate()
                .map(|(index, &quota)| {
                    let items = next_item..next_item + quota as u64;
                    next_item = items.end;
                    let progress = &progress;
                    self.spawn_worker(scope, progress, WorkerRole::Producer, index, move || {
                        workload.produce(progress, items)
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            // On a spawn error the scope still joins whatever was started;
            // consumer quotas never exceed what the producers push, so those
            // threads finish on their own.
            let consumers = consumer_quotas
                .iter()
                .enumerate()
                .map(|(index, &quota)| {
                    let progress = &progress;
                    self.spawn_worker(scope, progress, WorkerRole::Consumer, index, move || {
                        workload.consume(progress, quota)
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let mut failure = join_all(WorkerRole::Producer, producers);
            progress.mark_producers_done();
            workload.producers_finished();
            debug!(benchmark = %self.name, produced = progress.produced(), "producers done");
            if let Some(err) = join_all(WorkerRole::Consumer, consumers) {
                failure.get_or_insert(err);
            }
            failure.map_or(Ok(()), Err)
        })?;
        let duration = start.elapsed();

        let result = BenchmarkResult {
            name: self.name,
            producers: self.config.producers,
            consumers: self.config.consumers,
            total_items: self.config.total_items,
            duration,
            produced: progress.produced(),
            consumed: progress.consumed(),
            remaining: self.workload.remaining(),
        };
        info!(
            benchmark = %result.name,
            duration_ms = result.duration_ms() as u64,
            produced = result.produced,
            consumed = result.consumed,
            remaining = result.remaining,
            items_per_second = result.items_per_second() as u64,
            "run finished"
        );
        Ok(result)
    }

    fn spawn_worker<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        progress: &'scope Progress,
        role: WorkerRole,
        index: usize,
        body: F,
    ) -> Result<ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope,
    {
        thread::Builder::new()
            .name(format!("{}-{}-{}", self.name, role, index))
            .spawn_scoped(scope, move || {
                let _signal = UnwindSignal(progress);
                body()
            })
            .map_err(StackQueueError::Spawn)
    }
}

/// Flags the run as failed when the owning worker unwinds.
struct UnwindSignal<'a>(&'a Progress);

impl Drop for UnwindSignal<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.mark_worker_failed();
        }
    }
}

/// Join every handle, remembering the first one that panicked.
fn join_all(role: WorkerRole, handles: Vec<ScopedJoinHandle<'_, ()>>) -> Option<StackQueueError> {
    let mut failure = None;
    for (index, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            failure.get_or_insert(StackQueueError::WorkerPanicked { role, index });
        }
    }
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls without holding any items.
    #[derive(Default)]
    struct CountingWorkload {
        produce_calls: AtomicUsize,
        consume_calls: AtomicUsize,
    }

    impl Workload for CountingWorkload {
        fn produce(&self, progress: &Progress, items: Range<u64>) {
            self.produce_calls.fetch_add(1, Ordering::Relaxed);
            for _ in items {
                progress.record_produced();
            }
        }

        fn consume(&self, progress: &Progress, quota: usize) {
            self.consume_calls.fetch_add(1, Ordering::Relaxed);
            for _ in 0..quota {
                progress.record_consumed();
            }
        }

        fn remaining(&self) -> usize {
            0
        }
    }

    struct PanickingProducer;

    impl Workload for PanickingProducer {
        fn produce(&self, _progress: &Progress, _items: Range<u64>) {
            panic!("producer failure");
        }

        fn consume(&self, _progress: &Progress, _quota: usize) {}

        fn remaining(&self) -> usize {
            0
        }
    }

    #[test]
    fn zero_producers_rejected_before_spawn() {
        let err = Benchmark::new(
            "counting",
            RunConfig::new(0, 1, 10),
            Box::<CountingWorkload>::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StackQueueError::InvalidConfig(_)));
    }

    #[test]
    fn comma_in_name_rejected() {
        let err = Benchmark::new(
            "a,b",
            RunConfig::new(1, 1, 10),
            Box::<CountingWorkload>::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StackQueueError::InvalidConfig(_)));
    }

    #[test]
    fn one_thread_per_producer_and_consumer() {
        let bench = Benchmark::new(
            "counting",
            RunConfig::new(3, 5, 31),
            Box::<CountingWorkload>::default(),
        )
        .unwrap();
        let result = bench.run().unwrap();
        assert_eq!(result.produced, 31);
        assert_eq!(result.consumed, 31);
        assert_eq!(result.producers, 3);
        assert_eq!(result.consumers, 5);
    }

    #[test]
    fn producer_panic_is_reported() {
        let bench = Benchmark::new("panicky", RunConfig::new(2, 1, 4), Box::new(PanickingProducer))
            .unwrap();
        let err = bench.run().unwrap_err();
        assert!(matches!(
            err,
            StackQueueError::WorkerPanicked {
                role: WorkerRole::Producer,
                index: 0
            }
        ));
    }
}
