use core::cell::{Cell, UnsafeCell};
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};
use crossbeam_utils::CachePadded;
use std::sync::Arc;
use thiserror::Error;

/// Largest ring the queue will allocate, in slots.
pub const MAX_CAPACITY: usize = 1 << 24;

/// Requested ring size outside `2..=MAX_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("SPSC capacity {0} is outside 2..={max}", max = MAX_CAPACITY)]
pub struct CapacityError(pub usize);

/// Wait-free SPSC bounded ring buffer queue.
///
/// - One dedicated producer, one dedicated consumer
/// - Uses Acquire/Release ordering to ensure correctness
/// - Capacity must be a power of two for fast modulo
/// - One slot stays open to tell full from empty
pub struct WaitFreeSpscQueue<T> {
    mask: usize,
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    buf: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// Safety: Producer and consumer operate on disjoint indices; T must be Send
unsafe impl<T: Send> Send for WaitFreeSpscQueue<T> {}
unsafe impl<T: Send> Sync for WaitFreeSpscQueue<T> {}

impl<T> WaitFreeSpscQueue<T> {
    /// Create a new queue with the given capacity. Capacity is rounded up to the next power of two.
    pub fn with_capacity(cap: usize) -> Result<(Producer<T>, Consumer<T>), CapacityError> {
        if !(2..=MAX_CAPACITY).contains(&cap) {
            return Err(CapacityError(cap));
        }
        let capacity = cap.next_power_of_two();
        let buf = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let shared = Arc::new(WaitFreeSpscQueue {
            mask: capacity - 1,
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            buf,
        });
        Ok((
            Producer {
                queue: shared.clone(),
                _not_sync: PhantomData,
            },
            Consumer {
                queue: shared,
                _not_sync: PhantomData,
            },
        ))
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.mask + 1
    }

    #[inline]
    fn slot(&self, idx: usize) -> &UnsafeCell<MaybeUninit<T>> {
        &self.buf[idx & self.mask]
    }

    fn len(&self) -> usize {
        let tail = self.tail.load(Ordering::Acquire);
        let head = self.head.load(Ordering::Acquire);
        tail.wrapping_sub(head)
    }
}

impl<T> Drop for WaitFreeSpscQueue<T> {
    fn drop(&mut self) {
        // Both handles are gone; drop whatever was never consumed.
        let tail = *self.tail.get_mut();
        let mut head = *self.head.get_mut();
        while head != tail {
            unsafe { (*self.buf[head & self.mask].get()).assume_init_drop() };
            head = head.wrapping_add(1);
        }
    }
}

/// Producer side of the SPSC queue. `Send` but not `Sync`, so at most one
/// thread can push at a time.
pub struct Producer<T> {
    queue: Arc<WaitFreeSpscQueue<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

/// Consumer side of the SPSC queue. `Send` but not `Sync`.
pub struct Consumer<T> {
    queue: Arc<WaitFreeSpscQueue<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Producer<T> {
    /// Push `value`, handing it back if the ring is full.
    #[inline]
    pub fn try_push(&self, value: T) -> Result<(), T> {
        let q = &*self.queue;
        let tail = q.tail.load(Ordering::Relaxed);
        let head = q.head.load(Ordering::Acquire);
        if tail.wrapping_sub(head) == q.capacity() - 1 {
            return Err(value);
        }
        unsafe { (*q.slot(tail).get()).write(value) };
        q.tail.store(tail.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Consumer<T> {
    #[inline]
    pub fn try_pop(&self) -> Option<T> {
        let q = &*self.queue;
        let head = q.head.load(Ordering::Relaxed);
        let tail = q.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }
        let val = unsafe { (*q.slot(head).get()).assume_init_read() };
        q.head.store(head.wrapping_add(1), Ordering::Release);
        Some(val)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
