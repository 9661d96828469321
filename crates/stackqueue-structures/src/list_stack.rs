use std::collections::LinkedList;

use crate::container::{Container, Lifo};

/// Stack backed by a doubly linked list: one allocation per item, no
/// reallocation on growth. Benchmarked against [`crate::VecStack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStack<T> {
    data: LinkedList<T>,
}

impl<T> Default for ListStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListStack<T> {
    pub fn new() -> Self {
        Self {
            data: LinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.data.push_back(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.data.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.back()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Container for ListStack<T> {
    type Item = T;

    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Lifo for ListStack<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut s = ListStack::new();
        for v in ["a", "b", "c"] {
            s.push(v);
        }
        assert_eq!(s.peek(), Some(&"c"));
        assert_eq!(s.pop(), Some("c"));
        assert_eq!(s.pop(), Some("b"));
        assert_eq!(s.pop(), Some("a"));
        assert_eq!(s.pop(), None);
        assert!(s.is_empty());
    }
}
