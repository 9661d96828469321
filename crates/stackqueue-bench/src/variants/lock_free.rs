use crossbeam_utils::Backoff;
use parking_lot::Mutex;
use stackqueue_concurrent::{Consumer, LockFreeMpmcQueue, Producer, WaitFreeSpscQueue};
use stackqueue_core::{PollStrategy, Result, StackQueueError};
use std::ops::Range;

use crate::progress::{idle, poll_until_done, Progress};
use crate::workload::Workload;

/// Lock-free MPMC queue driven exactly like the mutex variants.
pub struct LockFreeWorkload {
    queue: LockFreeMpmcQueue<u64>,
    poll: PollStrategy,
}

impl LockFreeWorkload {
    pub fn new(poll: PollStrategy) -> Self {
        Self {
            queue: LockFreeMpmcQueue::new(),
            poll,
        }
    }
}

impl Workload for LockFreeWorkload {
    fn produce(&self, progress: &Progress, items: Range<u64>) {
        for item in items {
            self.queue.enqueue(item);
            progress.record_produced();
        }
    }

    fn consume(&self, progress: &Progress, quota: usize) {
        poll_until_done(progress, quota, self.poll, || {
            self.queue.try_dequeue().is_some()
        });
    }

    fn remaining(&self) -> usize {
        self.queue.len()
    }
}

/// Wait-free SPSC ring. Only valid with one producer and one consumer; each
/// handle sits behind a mutex that its single thread takes once per run.
pub struct SpscWorkload {
    producer: Mutex<Producer<u64>>,
    consumer: Mutex<Consumer<u64>>,
    poll: PollStrategy,
}

impl std::fmt::Debug for SpscWorkload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpscWorkload")
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

impl SpscWorkload {
    pub fn new(capacity: usize, poll: PollStrategy) -> Result<Self> {
        let (producer, consumer) = WaitFreeSpscQueue::with_capacity(capacity)
            .map_err(|e| StackQueueError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            producer: Mutex::new(producer),
            consumer: Mutex::new(consumer),
            poll,
        })
    }
}

impl Workload for SpscWorkload {
    fn produce(&self, progress: &Progress, items: Range<u64>) {
        let producer = self.producer.lock();
        let backoff = Backoff::new();
        for item in items {
            // bounded ring: wait for the consumer to free a slot
            let mut pending = item;
            while let Err(back) = producer.try_push(pending) {
                if progress.worker_failed() {
                    // the consumer is gone, the ring will never drain
                    return;
                }
                pending = back;
                idle(self.poll, &backoff);
            }
            backoff.reset();
            progress.record_produced();
        }
    }

    fn consume(&self, progress: &Progress, quota: usize) {
        let consumer = self.consumer.lock();
        poll_until_done(progress, quota, self.poll, || consumer.try_pop().is_some());
    }

    fn remaining(&self) -> usize {
        self.consumer.lock().len()
    }
}
