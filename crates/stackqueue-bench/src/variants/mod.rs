//! Benchmark variants: one container/discipline pair each.
//!
//! Every variant differs only in the container it wraps and in whether its
//! consumers block or poll; thread lifecycle lives in [`crate::Benchmark`].

pub mod lock_free;
pub mod locked;

pub use lock_free::{LockFreeWorkload, SpscWorkload};
pub use locked::{CondvarWorkload, MutexWorkload};

use stackqueue_core::{PollStrategy, Result, RunConfig, StackQueueError};
use stackqueue_structures::{ListStack, TwoStackQueue, VecStack};

use crate::orchestrator::Benchmark;
use crate::workload::Workload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    StackMutex,
    StackCv,
    ListStackMutex,
    ListStackCv,
    QueueMutex,
    QueueCv,
    LockFreeQueue,
    SpscQueue,
}

/// Knobs shared by every variant of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantOptions {
    pub poll: PollStrategy,
    pub spsc_capacity: usize,
}

impl Default for VariantOptions {
    fn default() -> Self {
        Self {
            poll: PollStrategy::Yield,
            spsc_capacity: 1024,
        }
    }
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::StackMutex,
        Variant::StackCv,
        Variant::ListStackMutex,
        Variant::ListStackCv,
        Variant::QueueMutex,
        Variant::QueueCv,
        Variant::LockFreeQueue,
        Variant::SpscQueue,
    ];

    /// Name used on the console and in the result log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StackMutex => "stack_mutex",
            Self::StackCv => "stack_cv",
            Self::ListStackMutex => "list_stack_mutex",
            Self::ListStackCv => "list_stack_cv",
            Self::QueueMutex => "queue_mutex",
            Self::QueueCv => "queue_cv",
            Self::LockFreeQueue => "lock_free_queue",
            Self::SpscQueue => "spsc_queue",
        }
    }

    /// Consumers block instead of polling.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::StackCv | Self::ListStackCv | Self::QueueCv)
    }

    pub fn supports(&self, producers: usize, consumers: usize) -> bool {
        match self {
            Self::SpscQueue => producers == 1 && consumers == 1,
            _ => true,
        }
    }

    /// Build a ready-to-run benchmark around a fresh container.
    pub fn build(self, config: RunConfig, options: &VariantOptions) -> Result<Benchmark> {
        if !self.supports(config.producers, config.consumers) {
            return Err(StackQueueError::InvalidConfig(format!(
                "{} needs exactly one producer and one consumer, got {}/{}",
                self.name(),
                config.producers,
                config.consumers
            )));
        }
        Benchmark::new(self.name(), config, self.workload(options)?)
    }

    fn workload(self, options: &VariantOptions) -> Result<Box<dyn Workload>> {
        let poll = options.poll;
        Ok(match self {
            Self::StackMutex => Box::new(MutexWorkload::<VecStack<u64>>::new(poll)),
            Self::StackCv => Box::new(CondvarWorkload::<VecStack<u64>>::new()),
            Self::ListStackMutex => Box::new(MutexWorkload::<ListStack<u64>>::new(poll)),
            Self::ListStackCv => Box::new(CondvarWorkload::<ListStack<u64>>::new()),
            Self::QueueMutex => {
                Box::new(MutexWorkload::<TwoStackQueue<VecStack<u64>>>::new(poll))
            }
            Self::QueueCv => Box::new(CondvarWorkload::<TwoStackQueue<VecStack<u64>>>::new()),
            Self::LockFreeQueue => Box::new(LockFreeWorkload::new(poll)),
            Self::SpscQueue => Box::new(SpscWorkload::new(options.spsc_capacity, poll)?),
        })
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Variant {
    type Err = StackQueueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| StackQueueError::InvalidConfig(format!("unknown variant '{s}'")))
    }
}
