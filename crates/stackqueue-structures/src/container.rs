/// Single-threaded storage with one insertion and one removal point.
///
/// Implementors own their items exclusively and are only mutated through
/// `put`/`take`. An empty container yields `None`, never a panic.
pub trait Container {
    type Item;

    fn put(&mut self, item: Self::Item);

    fn take(&mut self) -> Option<Self::Item>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker for containers whose `take` returns the most recent `put`.
///
/// The two-stack queue relies on this to turn a transfer into a reversal.
pub trait Lifo: Container {}
