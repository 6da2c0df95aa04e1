//! Binary search tree with duplicate counting.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::fmt::Debug;

struct Node<T> {
    value: T,
    // Number of times this value was inserted; always at least 1.
    count: usize,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

/// An unbalanced binary search tree that counts duplicate insertions.
///
/// Equal values share one node with a multiplicity count, so the tree is a
/// multiset: [`len`] and the in-order [`iter`] both see every inserted copy,
/// while the node structure only grows for distinct values. [`remove`] drops
/// one copy at a time; the node is spliced out, two-child nodes by hoisting
/// the in-order successor, once its last copy goes.
///
/// Lookups and updates cost `O(height)`; nothing rebalances the tree, so
/// ordered insertions degenerate into a chain. [`AvlTree`] is the
/// self-balancing variant.
///
/// [`len`]: BinarySearchTree::len
/// [`iter`]: BinarySearchTree::iter
/// [`remove`]: BinarySearchTree::remove
/// [`AvlTree`]: crate::avl::AvlTree
///
/// # Examples
///
/// ```
/// use clump_hash::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// for value in [5, 3, 8, 3] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.len(), 4);
/// assert_eq!(tree.count_of(&3), 2);
///
/// let sorted: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(sorted, [3, 3, 5, 8]);
/// ```
pub struct BinarySearchTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: Ord> BinarySearchTree<T> {
    /// Adds one copy of `value`.
    pub fn insert(&mut self, value: T) {
        self.len += 1;
        let mut link = &mut self.root;
        loop {
            match link {
                None => {
                    *link = Some(Box::new(Node {
                        value,
                        count: 1,
                        left: None,
                        right: None,
                    }));
                    return;
                }
                Some(node) => match value.cmp(&node.value) {
                    Ordering::Less => link = &mut node.left,
                    Ordering::Greater => link = &mut node.right,
                    Ordering::Equal => {
                        node.count += 1;
                        return;
                    }
                },
            }
        }
    }

    /// Removes one copy of `value`.
    ///
    /// Returns `true` when a copy was removed; the node itself only goes
    /// away with the last copy.
    pub fn remove(&mut self, value: &T) -> bool {
        let mut link = &mut self.root;
        loop {
            // Decide the direction through a shared peek first; a mutable
            // binding shared between the descent arms and the Equal arm
            // (which also needs `link`) trips the borrow checker.
            let ordering = match link.as_deref() {
                None => return false,
                Some(node) => value.cmp(&node.value),
            };
            match ordering {
                Ordering::Less => link = &mut link.as_mut().unwrap().left,
                Ordering::Greater => link = &mut link.as_mut().unwrap().right,
                Ordering::Equal => {
                    let node = link.as_mut().unwrap();
                    node.count -= 1;
                    let emptied = node.count == 0;
                    if emptied {
                        Self::remove_node(link);
                    }
                    self.len -= 1;
                    return true;
                }
            }
        }
    }

    /// Returns `true` when at least one copy of `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.node_of(value).is_some()
    }

    /// Number of stored copies of `value`; zero when absent.
    pub fn count_of(&self, value: &T) -> usize {
        self.node_of(value).map_or(0, |node| node.count)
    }

    /// Returns the smallest stored value.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns the largest stored value.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    fn node_of(&self, value: &T) -> Option<&Node<T>> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match value.cmp(&node.value) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Splices the node behind `link` out of the tree. A two-child node is
    /// replaced by its in-order successor, which keeps the search order
    /// intact for both subtrees.
    fn remove_node(link: &mut Option<Box<Node<T>>>) {
        if let Some(mut node) = link.take() {
            match (node.left.take(), node.right.take()) {
                (None, None) => {}
                (Some(child), None) | (None, Some(child)) => *link = Some(child),
                (Some(left), Some(right)) => {
                    let mut right = Some(right);
                    if let Some((value, count)) = Self::detach_min(&mut right) {
                        *link = Some(Box::new(Node {
                            value,
                            count,
                            left: Some(left),
                            right,
                        }));
                    }
                }
            }
        }
    }

    /// Splices out the minimum node of the subtree behind `link`, returning
    /// its value and count.
    fn detach_min(link: &mut Option<Box<Node<T>>>) -> Option<(T, usize)> {
        let mut link = link;
        loop {
            // Peek through a shared borrow; a mutable guard binding would
            // still be live in the splice arm, which also needs `link`.
            let descend = match link.as_deref() {
                None => return None,
                Some(node) => node.left.is_some(),
            };
            if descend {
                link = &mut link.as_mut().unwrap().left;
            } else {
                let node = link.take()?;
                *link = node.right;
                return Some((node.value, node.count));
            }
        }
    }
}

impl<T> BinarySearchTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of stored values, counting duplicate copies.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value at the root, or `None` when the tree is empty.
    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.value)
    }

    /// Height of the tree: zero when empty, one for a lone root.
    pub fn height(&self) -> usize {
        fn depth<T>(node: Option<&Node<T>>) -> usize {
            node.map_or(0, |node| {
                1 + depth(node.left.as_deref()).max(depth(node.right.as_deref()))
            })
        }
        depth(self.root.as_deref())
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        // Ordered insertions degenerate into a chain, so tear the tree down
        // iteratively rather than recursing through the boxes.
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Iterates the stored values in ascending order, yielding each value
    /// once per stored copy.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            pending: None,
        };
        iter.descend_left(self.root.as_deref());
        iter
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Ascending iterator over a [`BinarySearchTree`], repeating duplicates.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    // Copies of the current value still owed to the caller.
    pending: Option<(&'a T, usize)>,
}

impl<'a, T> Iter<'a, T> {
    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((value, remaining)) = &mut self.pending {
            if *remaining > 0 {
                *remaining -= 1;
                return Some(*value);
            }
        }
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.pending = Some((&node.value, node.count - 1));
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
