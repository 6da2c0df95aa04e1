//! Singly-linked list with positional access.

use alloc::boxed::Box;
use core::fmt;
use core::fmt::Debug;
use core::ops::Index;
use core::ops::IndexMut;

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A singly-linked list of owned nodes with positional access.
///
/// Every node owns the next one, so traversal always starts at the head;
/// positional operations cost a walk of `index` links. Out-of-range
/// positions are reported through the return value rather than panicking,
/// except for the `list[index]` syntax which panics like a slice.
///
/// # Examples
///
/// ```
/// use clump_hash::SinglyLinkedList;
///
/// let mut list = SinglyLinkedList::new();
/// list.push_back(1);
/// list.push_back(3);
/// list.insert(1, 2).unwrap();
/// assert_eq!(list.len(), 3);
/// assert_eq!(list[1], 2);
/// assert_eq!(list.pop_front(), Some(1));
/// ```
pub struct SinglyLinkedList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of values in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the list holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value at the front of the list.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Adds a value at the back of the list by walking to the end.
    pub fn push_back(&mut self, value: T) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let node = self.head.take()?;
        self.head = node.next;
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the back value, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.remove(self.len.checked_sub(1)?)
    }

    /// Returns the value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).map(|node| &node.value)
    }

    /// Returns the value at `index` mutably, or `None` when out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.link_at_mut(index)?
            .as_deref_mut()
            .map(|node| &mut node.value)
    }

    /// Inserts a value before position `index`, shifting later values back.
    ///
    /// `index == len` appends. Returns `Err(value)` when `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), T> {
        if index > self.len {
            return Err(value);
        }
        match self.link_at_mut(index) {
            Some(link) => {
                let next = link.take();
                *link = Some(Box::new(Node { value, next }));
            }
            None => return Err(value),
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value at `index`, or `None` when out of
    /// range. The rest of the list stays linked.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let value = {
            let link = self.link_at_mut(index)?;
            let node = link.take()?;
            *link = node.next;
            node.value
        };
        self.len -= 1;
        Some(value)
    }

    /// Removes every value from the list.
    pub fn clear(&mut self) {
        // Unlink one node at a time; dropping the chain in one go would
        // recurse once per node.
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.head.as_deref(),
        }
    }

    fn node_at(&self, index: usize) -> Option<&Node<T>> {
        let mut cursor = self.head.as_deref();
        for _ in 0..index {
            cursor = cursor?.next.as_deref();
        }
        cursor
    }

    /// Walks to the link (the `Option` slot) holding node `index`; the link
    /// one past the last node exists and is `None`.
    fn link_at_mut(&mut self, index: usize) -> Option<&mut Option<Box<Node<T>>>> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => return None,
            }
        }
        Some(link)
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for SinglyLinkedList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics when `index` is out of range.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index out of range: the length is {} but the index is {index}",
                self.len
            ),
        }
    }
}

impl<T> IndexMut<usize> for SinglyLinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of range: the length is {len} but the index is {index}"),
        }
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut link = &mut list.head;
        for value in iter {
            let node = Box::new(Node { value, next: None });
            link = &mut link.insert(node).next;
            list.len += 1;
        }
        list
    }
}

/// Front-to-back iterator over a [`SinglyLinkedList`].
pub struct Iter<'a, T> {
    cursor: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
