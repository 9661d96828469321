use crate::container::{Container, Lifo};

/// FIFO queue assembled from two LIFO stacks.
///
/// Items enter on the `input` side and leave from the `output` side. When the
/// output side runs dry the whole input side is moved across, which reverses
/// it into FIFO order. Every item crosses at most once, so a sequence of N
/// operations does O(N) work in total.
///
/// Invariant: `output` (top first) followed by `input` (bottom first) is the
/// dequeue order of everything currently held.
#[derive(Debug, Clone)]
pub struct TwoStackQueue<S> {
    input: S,
    output: S,
    transferred: usize,
}

impl<S: Lifo + Default> Default for TwoStackQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Lifo + Default> TwoStackQueue<S> {
    pub fn new() -> Self {
        Self {
            input: S::default(),
            output: S::default(),
            transferred: 0,
        }
    }
}

impl<S: Lifo> TwoStackQueue<S> {
    pub fn enqueue(&mut self, value: S::Item) {
        self.input.put(value);
    }

    pub fn dequeue(&mut self) -> Option<S::Item> {
        if self.output.is_empty() {
            self.transfer();
        }
        self.output.take()
    }

    pub fn len(&self) -> usize {
        self.input.len() + self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.output.is_empty()
    }

    /// Items moved from the input side to the output side so far.
    pub fn transferred(&self) -> usize {
        self.transferred
    }

    // Only called with an empty output side.
    fn transfer(&mut self) {
        debug_assert!(self.output.is_empty());
        while let Some(item) = self.input.take() {
            self.output.put(item);
            self.transferred += 1;
        }
    }
}

impl<S: Lifo> Container for TwoStackQueue<S> {
    type Item = S::Item;

    fn put(&mut self, item: S::Item) {
        self.enqueue(item);
    }

    fn take(&mut self) -> Option<S::Item> {
        self.dequeue()
    }

    fn len(&self) -> usize {
        TwoStackQueue::len(self)
    }

    fn is_empty(&self) -> bool {
        TwoStackQueue::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_stack::ListStack;
    use crate::vec_stack::VecStack;

    #[test]
    fn fifo_order_with_transfer() {
        let mut q: TwoStackQueue<VecStack<char>> = TwoStackQueue::new();
        q.enqueue('a');
        q.enqueue('b');
        q.enqueue('c');
        assert_eq!(q.transferred(), 0);
        assert_eq!(q.dequeue(), Some('a'));
        assert_eq!(q.transferred(), 3);
        assert_eq!(q.dequeue(), Some('b'));
        assert_eq!(q.dequeue(), Some('c'));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn empty_dequeue_is_none() {
        let mut q: TwoStackQueue<ListStack<u8>> = TwoStackQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.transferred(), 0);
    }

    #[test]
    fn no_transfer_while_output_has_items() {
        let mut q: TwoStackQueue<VecStack<u32>> = TwoStackQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.transferred(), 2);

        // 2 is still on the output side; 3 and 4 must wait on the input side
        q.enqueue(3);
        q.enqueue(4);
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.transferred(), 2);
        assert_eq!(q.len(), 2);

        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.transferred(), 4);
        assert_eq!(q.dequeue(), Some(4));
    }

    #[test]
    fn interleaved_operations_move_each_item_once() {
        let mut q: TwoStackQueue<VecStack<usize>> = TwoStackQueue::new();
        let mut expected = 0usize;
        let mut enqueued = 0usize;
        for round in 0..50 {
            for _ in 0..(round % 7) + 1 {
                q.enqueue(enqueued);
                enqueued += 1;
            }
            for _ in 0..(round % 5) {
                if let Some(v) = q.dequeue() {
                    assert_eq!(v, expected);
                    expected += 1;
                }
            }
            assert!(q.transferred() <= enqueued);
        }
        while let Some(v) = q.dequeue() {
            assert_eq!(v, expected);
            expected += 1;
        }
        assert_eq!(expected, enqueued);
        assert_eq!(q.transferred(), enqueued);
    }
}
