//! Stack and queue containers for the StackQueue benchmarks
//!
//! - `VecStack` / `ListStack`: unsynchronized LIFO storage
//! - `TwoStackQueue`: FIFO built from two LIFO stacks with amortized O(1) dequeue
//! - `Locked`: mutex and condvar disciplines over any of the above

pub mod container;
pub mod list_stack;
pub mod locked;
pub mod two_stack_queue;
pub mod vec_stack;

pub use container::{Container, Lifo};
pub use list_stack::ListStack;
pub use locked::Locked;
pub use two_stack_queue::TwoStackQueue;
pub use vec_stack::VecStack;

pub type ConcurrentStack<T> = Locked<VecStack<T>>;
pub type ConcurrentListStack<T> = Locked<ListStack<T>>;
pub type ConcurrentQueue<T> = Locked<TwoStackQueue<VecStack<T>>>;
