//! Lock-free and wait-free queues used as baselines by the StackQueue benchmarks
//!
//! - `mpmc`: Lock-free unbounded multi-producer multi-consumer queue (wrapper)
//! - `spsc`: Wait-free bounded single-producer single-consumer queue

pub mod mpmc;
pub mod spsc;

pub use mpmc::LockFreeMpmcQueue;
pub use spsc::{CapacityError, Consumer, Producer, WaitFreeSpscQueue, MAX_CAPACITY};
