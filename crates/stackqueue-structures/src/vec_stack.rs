use crate::container::{Container, Lifo};

/// Stack backed by a contiguous `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecStack<T> {
    data: Vec<T>,
}

impl<T> Default for VecStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VecStack<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Container for VecStack<T> {
    type Item = T;

    #[inline]
    fn put(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn take(&mut self) -> Option<T> {
        self.pop()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Lifo for VecStack<T> {}
