//! Fixed-capacity queues: a linear queue and a circular (ring) queue.
//!
//! Both hold at most `capacity` values and hand a rejected value back from
//! [`Queue::enqueue`] / [`CircularQueue::enqueue`] when full. They differ in
//! how storage is reused: [`CircularQueue`] wraps around and reuses dequeued
//! cells immediately, while [`Queue`] spends its cells left to right and only
//! reclaims them once the queue drains completely.

use alloc::boxed::Box;
use core::iter::repeat_with;
use core::slice;

/// A first-in first-out queue over a fixed-size linear buffer.
///
/// Cells are consumed left to right and are not reused while values remain:
/// once the write position reaches the end of the buffer the queue reports
/// itself full, and stays full, until every remaining value has been
/// dequeued. [`CircularQueue`] is the variant without that limitation.
///
/// # Examples
///
/// ```
/// use clump_hash::Queue;
///
/// let mut queue = Queue::with_capacity(2);
/// queue.enqueue("a").unwrap();
/// queue.enqueue("b").unwrap();
/// assert!(queue.is_full());
/// assert_eq!(queue.dequeue(), Some("a"));
/// // The freed cell is spent; the queue is still full.
/// assert!(queue.is_full());
/// assert_eq!(queue.enqueue("c"), Err("c"));
/// ```
#[derive(Clone, Debug)]
pub struct Queue<T> {
    slots: Box<[Option<T>]>,
    front: Option<usize>,
    rear: Option<usize>,
}

impl<T> Queue<T> {
    /// Creates an empty queue that holds at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: repeat_with(|| None).take(capacity).collect(),
            front: None,
            rear: None,
        }
    }

    /// Number of values currently queued.
    pub fn len(&self) -> usize {
        match (self.front, self.rear) {
            // The front index can sit one past the rear when every remaining
            // cell has been consumed but the buffer end was never reached.
            (Some(front), Some(rear)) => (rear + 1).saturating_sub(front),
            _ => 0,
        }
    }

    /// Returns `true` when no values are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when no further value can be enqueued.
    ///
    /// This reflects the write position, not the live count: a partially
    /// drained queue whose writes reached the end of the buffer is still
    /// full.
    pub fn is_full(&self) -> bool {
        self.rear
            .map_or(self.slots.is_empty(), |rear| rear + 1 == self.slots.len())
    }

    /// Maximum number of values the queue can hold between resets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Adds a value at the rear of the queue.
    ///
    /// Returns `Err(value)` when the queue is full.
    pub fn enqueue(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let rear = match self.rear {
            None => {
                self.front = Some(0);
                0
            }
            Some(rear) => rear + 1,
        };
        self.rear = Some(rear);
        self.slots[rear] = Some(value);
        Ok(())
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        let front = self.front?;
        let value = self.slots[front].take()?;
        // Consuming the last cell of the buffer resets the queue; any other
        // dequeue just marches the front forward over spent cells.
        if front + 1 == self.slots.len() {
            self.front = None;
            self.rear = None;
        } else {
            self.front = Some(front + 1);
        }
        Some(value)
    }

    /// Returns the front value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.slots[self.front?].as_ref()
    }

    /// Iterates over the queued values from front to rear.
    pub fn iter(&self) -> Iter<'_, T> {
        let live = match (self.front, self.rear) {
            (Some(front), Some(rear)) if front <= rear => &self.slots[front..=rear],
            _ => &self.slots[..0],
        };
        Iter {
            first: live.iter(),
            second: Default::default(),
        }
    }
}

/// A first-in first-out queue over a fixed-size ring buffer.
///
/// Unlike [`Queue`], dequeued cells are immediately reusable: the front and
/// rear positions wrap around the buffer.
///
/// # Examples
///
/// ```
/// use clump_hash::CircularQueue;
///
/// let mut queue = CircularQueue::with_capacity(2);
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
/// assert_eq!(queue.dequeue(), Some(1));
/// // The freed cell wraps around and is reused.
/// queue.enqueue(3).unwrap();
/// assert_eq!(queue.dequeue(), Some(2));
/// assert_eq!(queue.dequeue(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct CircularQueue<T> {
    slots: Box<[Option<T>]>,
    front: Option<usize>,
    // Position of the most recent write; starts one short of the buffer end
    // so the first advance wraps to cell zero.
    rear: usize,
}

impl<T> CircularQueue<T> {
    /// Creates an empty queue that holds at most `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: repeat_with(|| None).take(capacity).collect(),
            front: None,
            rear: capacity.saturating_sub(1),
        }
    }

    /// Number of values currently queued.
    pub fn len(&self) -> usize {
        match self.front {
            None => 0,
            Some(front) if self.rear < front => self.slots.len() - (front - self.rear) + 1,
            Some(front) => self.rear - front + 1,
        }
    }

    /// Returns `true` when no values are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    /// Returns `true` when every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.slots.is_empty() || self.front == Some((self.rear + 1) % self.slots.len())
    }

    /// Maximum number of values the queue can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Adds a value at the rear of the queue.
    ///
    /// Returns `Err(value)` when the queue is full.
    pub fn enqueue(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.rear = (self.rear + 1) % self.slots.len();
        if self.front.is_none() {
            self.front = Some(0);
        }
        self.slots[self.rear] = Some(value);
        Ok(())
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        let front = self.front?;
        let value = self.slots[front].take();
        if front == self.rear {
            self.front = None;
            self.rear = self.slots.len() - 1;
        } else {
            self.front = Some((front + 1) % self.slots.len());
        }
        value
    }

    /// Returns the front value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.slots[self.front?].as_ref()
    }

    /// Iterates over the queued values from front to rear.
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

/// Front-to-rear iterator over a [`Queue`] or [`CircularQueue`].
pub struct Iter<'a, T> {
    first: slice::Iter<'a, Option<T>>,
    second: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Live cells are always populated, so a `None` slot never shows up
        // inside the ranges the constructors hand us.
        match self.first.next() {
            Some(slot) => slot.as_ref(),
            None => self.second.next().and_then(Option::as_ref),
        }
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
