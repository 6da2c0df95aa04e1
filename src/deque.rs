//! Fixed-capacity double-ended queue over a ring buffer.

use alloc::boxed::Box;
use core::iter::repeat_with;
use core::slice;

/// A double-ended queue over a fixed-size ring buffer.
///
/// Values can be pushed and popped at both ends; the two positions wrap
/// around the buffer, so cells freed at either end are reused immediately.
/// Pushing into a full deque hands the rejected value back.
///
/// # Examples
///
/// ```
/// use clump_hash::Deque;
///
/// let mut deque = Deque::with_capacity(3);
/// deque.push_back(2).unwrap();
/// deque.push_back(3).unwrap();
/// deque.push_front(1).unwrap();
/// assert!(deque.is_full());
/// assert_eq!(deque.pop_front(), Some(1));
/// assert_eq!(deque.pop_back(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct Deque<T> {
    slots: Box<[Option<T>]>,
    front: Option<usize>,
    // Position of the rear value; meaningful only while `front` is set.
    rear: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque that holds at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: repeat_with(|| None).take(capacity).collect(),
            front: None,
            rear: 0,
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        match self.front {
            None => 0,
            Some(front) if self.rear < front => self.slots.len() - (front - self.rear) + 1,
            Some(front) => self.rear - front + 1,
        }
    }

    /// Returns `true` when the deque holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    /// Returns `true` when every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.slots.is_empty() || self.front == Some((self.rear + 1) % self.slots.len())
    }

    /// Maximum number of values the deque can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Adds a value at the back.
    ///
    /// Returns `Err(value)` when the deque is full.
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        match self.front {
            None => {
                self.front = Some(0);
                self.rear = 0;
            }
            Some(_) => self.rear = (self.rear + 1) % self.slots.len(),
        }
        self.slots[self.rear] = Some(value);
        Ok(())
    }

    /// Adds a value at the front.
    ///
    /// Returns `Err(value)` when the deque is full.
    pub fn push_front(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let front = match self.front {
            None => {
                self.rear = 0;
                0
            }
            Some(0) => self.slots.len() - 1,
            Some(front) => front - 1,
        };
        self.front = Some(front);
        self.slots[front] = Some(value);
        Ok(())
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let front = self.front?;
        let value = self.slots[front].take();
        if front == self.rear {
            self.front = None;
            self.rear = 0;
        } else {
            self.front = Some((front + 1) % self.slots.len());
        }
        value
    }

    /// Removes and returns the back value, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let front = self.front?;
        let value = self.slots[self.rear].take();
        if front == self.rear {
            self.front = None;
            self.rear = 0;
        } else {
            self.rear = match self.rear {
                0 => self.slots.len() - 1,
                rear => rear - 1,
            };
        }
        value
    }

    /// Returns the front value without removing it.
    pub fn front(&self) -> Option<&T> {
        self.slots[self.front?].as_ref()
    }

    /// Returns the back value without removing it.
    pub fn back(&self) -> Option<&T> {
        self.front?;
        self.slots[self.rear].as_ref()
    }

    /// Iterates over the stored values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        match self.front {
            Some(front) if self.rear < front => Iter {
                first: self.slots[front..].iter(),
                second: self.slots[..=self.rear].iter(),
            },
            Some(front) => Iter {
                first: self.slots[front..=self.rear].iter(),
                second: Default::default(),
            },
            None => Iter {
                first: Default::default(),
                second: Default::default(),
            },
        }
    }
}

/// Front-to-back iterator over a [`Deque`].
pub struct Iter<'a, T> {
    first: slice::Iter<'a, Option<T>>,
    second: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.first.next() {
            Some(slot) => slot.as_ref(),
            None => self.second.next().and_then(Option::as_ref),
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
