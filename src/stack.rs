//! Fixed-capacity last-in first-out stack.

use alloc::vec::Vec;
use core::iter::Rev;
use core::slice;

/// A last-in first-out stack over a fixed-size buffer.
///
/// The capacity is chosen at construction and never changes. Pushing onto a
/// full stack hands the rejected value back instead of growing.
///
/// # Examples
///
/// ```
/// use clump_hash::Stack;
///
/// let mut stack = Stack::with_capacity(2);
/// assert_eq!(stack.push(1), Ok(()));
/// assert_eq!(stack.push(2), Ok(()));
/// assert_eq!(stack.push(3), Err(3));
/// assert_eq!(stack.pop(), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct Stack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Stack<T> {
    /// Creates an empty stack that holds at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of values currently on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the stack holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` when the stack holds `capacity` values.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Maximum number of values the stack can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes a value onto the top of the stack.
    ///
    /// Returns `Err(value)` when the stack is already full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.items.push(value);
        Ok(())
    }

    /// Removes and returns the top value, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the top value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Removes every value. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the stored values from the top of the stack down.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter().rev(),
        }
    }
}

/// Immutable top-down iterator over a [`Stack`].
pub struct Iter<'a, T> {
    inner: Rev<slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
