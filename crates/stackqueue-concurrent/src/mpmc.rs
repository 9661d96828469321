use crossbeam_queue::SegQueue;
use std::sync::Arc;

/// Lock-free unbounded MPMC queue based on crossbeam's SegQueue.
/// Cloning hands out another handle to the same queue.
pub struct LockFreeMpmcQueue<T> {
    inner: Arc<SegQueue<T>>,
}

impl<T> Clone for LockFreeMpmcQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for LockFreeMpmcQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LockFreeMpmcQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SegQueue::new()),
        }
    }

    #[inline]
    pub fn enqueue(&self, value: T) {
        self.inner.push(value);
    }

    #[inline]
    pub fn try_dequeue(&self) -> Option<T> {
        self.inner.pop()
    }

    /// Snapshot length; may be stale by the time the caller looks at it.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
