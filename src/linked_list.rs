//! Doubly-linked list with owned nodes.

use alloc::boxed::Box;
use core::fmt;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::ptr::NonNull;

struct Node<T> {
    value: T,
    next: Option<NonNull<Node<T>>>,
    prev: Option<NonNull<Node<T>>>,
}

/// A doubly-linked list with constant-time access to both ends.
///
/// Nodes are heap-allocated and exclusively owned by the list; the raw links
/// between them are an implementation detail and never escape. The chain
/// invariants are: `head` and `tail` are both `None` exactly when `len == 0`,
/// the head node has no `prev`, the tail node has no `next`, and every
/// `next`/`prev` pair mirrors each other.
///
/// # Examples
///
/// ```
/// use clump_hash::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.pop_back(), Some(3));
/// ```
pub struct LinkedList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the list exclusively owns its nodes, so sending it just moves
// ownership of every stored value with it.
unsafe impl<T: Send> Send for LinkedList<T> {}

// SAFETY: shared access to the list only hands out shared references to the
// stored values.
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
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
        let node = NonNull::from(Box::leak(Box::new(Node {
            value,
            next: self.head,
            prev: None,
        })));
        match self.head {
            // SAFETY: the old head is a live node owned by the list, and no
            // references into it exist while `self` is borrowed mutably.
            Some(head) => unsafe { (*head.as_ptr()).prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Adds a value at the back of the list.
    pub fn push_back(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node {
            value,
            next: None,
            prev: self.tail,
        })));
        match self.tail {
            // SAFETY: the old tail is a live node owned by the list.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: every node was allocated by `Box::new` in a push and the
        // list is its only owner, so reclaiming it as a `Box` is sound.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        match self.head {
            // SAFETY: the new head is a live list-owned node.
            Some(new_head) => unsafe { (*new_head.as_ptr()).prev = None },
            None => self.tail = None,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the back value, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        // SAFETY: as in `pop_front`, the list is the sole owner of the node.
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        self.tail = node.prev;
        match self.tail {
            // SAFETY: the new tail is a live list-owned node.
            Some(new_tail) => unsafe { (*new_tail.as_ptr()).next = None },
            None => self.head = None,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Returns the front value, or `None` when empty.
    pub fn front(&self) -> Option<&T> {
        // SAFETY: `head` is a live list-owned node; the shared borrow of the
        // list keeps writers out for the lifetime of the reference.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the front value mutably, or `None` when empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the exclusive borrow of the list gives exclusive access to
        // its nodes.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns the back value, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        // SAFETY: as in `front`.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the back value mutably, or `None` when empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `front_mut`.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Removes the first value equal to `value`.
    ///
    /// Returns `true` when a value was removed.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // SAFETY: the cursor only ever holds live list-owned nodes, and
            // no references into the list are held across the walk.
            unsafe {
                if (*node.as_ptr()).value == *value {
                    self.unlink(node);
                    return true;
                }
                cursor = (*node.as_ptr()).next;
            }
        }
        false
    }

    /// Returns `true` when some stored value equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|stored| stored == value)
    }

    /// Removes every value from the list.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Iterates over the values front to back; the iterator is double-ended,
    /// so `rev()` walks back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Unlinks `node` from the chain and frees it.
    ///
    /// # Safety
    ///
    /// `node` must be a node currently owned by this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) {
        // SAFETY: the caller guarantees the node is live and list-owned.
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        match node.prev {
            // SAFETY: neighbors of a list-owned node are list-owned too;
            // patching their links keeps the chain consistent.
            Some(prev) => unsafe { (*prev.as_ptr()).next = node.next },
            None => self.head = node.next,
        }
        match node.next {
            // SAFETY: as above.
            Some(next) => unsafe { (*next.as_ptr()).prev = node.prev },
            None => self.tail = node.prev,
        }
        self.len -= 1;
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Double-ended iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            // SAFETY: `len > 0` means the front cursor still points at a
            // live node of the borrowed list.
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            // SAFETY: `len > 0` means the back cursor still points at a
            // live node of the borrowed list.
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
