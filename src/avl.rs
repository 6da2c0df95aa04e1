//! Height-balanced binary search tree.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::fmt::Debug;

struct Node<T> {
    value: T,
    // Number of times this value was inserted; always at least 1.
    count: usize,
    // Height of the subtree rooted here; a leaf has height 1.
    height: u32,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

/// A self-balancing binary search tree that counts duplicate insertions.
///
/// The surface matches [`BinarySearchTree`]: equal values share one node
/// with a multiplicity count, [`len`] and the in-order [`iter`] see every
/// inserted copy, and [`remove`] drops one copy at a time. The difference
/// is that every insertion and removal rotates nodes as needed to keep the
/// left and right subtree heights of every node within one of each other,
/// so lookups stay `O(log n)` no matter the insertion order.
///
/// [`BinarySearchTree`]: crate::bst::BinarySearchTree
/// [`len`]: AvlTree::len
/// [`iter`]: AvlTree::iter
/// [`remove`]: AvlTree::remove
///
/// # Examples
///
/// ```
/// use clump_hash::AvlTree;
///
/// // Ordered insertions would build a chain in a plain search tree.
/// let tree: AvlTree<i32> = (1..=7).collect();
/// assert_eq!(tree.height(), 3);
///
/// let sorted: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7]);
/// ```
pub struct AvlTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: Ord> AvlTree<T> {
    /// Adds one copy of `value`, rebalancing along the insertion path.
    pub fn insert(&mut self, value: T) {
        self.len += 1;
        let root = self.root.take();
        self.root = Some(Self::insert_at(root, value));
    }

    /// Removes one copy of `value`, rebalancing along the removal path.
    ///
    /// Returns `true` when a copy was removed; the node itself only goes
    /// away with the last copy.
    pub fn remove(&mut self, value: &T) -> bool {
        let root = self.root.take();
        let (root, removed) = Self::remove_at(root, value);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
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

    fn insert_at(link: Option<Box<Node<T>>>, value: T) -> Box<Node<T>> {
        let Some(mut node) = link else {
            return Box::new(Node {
                value,
                count: 1,
                height: 1,
                left: None,
                right: None,
            });
        };
        match value.cmp(&node.value) {
            Ordering::Less => node.left = Some(Self::insert_at(node.left.take(), value)),
            Ordering::Greater => node.right = Some(Self::insert_at(node.right.take(), value)),
            Ordering::Equal => {
                // Bumping the count changes no heights.
                node.count += 1;
                return node;
            }
        }
        Self::rebalance(node)
    }

    fn remove_at(link: Option<Box<Node<T>>>, value: &T) -> (Option<Box<Node<T>>>, bool) {
        let Some(mut node) = link else {
            return (None, false);
        };
        let removed = match value.cmp(&node.value) {
            Ordering::Less => {
                let (left, removed) = Self::remove_at(node.left.take(), value);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_at(node.right.take(), value);
                node.right = right;
                removed
            }
            Ordering::Equal => {
                if node.count > 1 {
                    node.count -= 1;
                    return (Some(node), true);
                }
                return (Self::splice(node), true);
            }
        };
        if removed {
            (Some(Self::rebalance(node)), true)
        } else {
            (Some(node), false)
        }
    }

    /// Removes `node` from the tree. A two-child node keeps its allocation
    /// and takes over the value of its in-order successor instead, which
    /// keeps the search order intact for both subtrees.
    fn splice(mut node: Box<Node<T>>) -> Option<Box<Node<T>>> {
        match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (value, count, right) = Self::detach_min(right);
                node.value = value;
                node.count = count;
                node.left = Some(left);
                node.right = right;
                Some(Self::rebalance(node))
            }
        }
    }

    /// Splices out the minimum node of the subtree rooted at `node`,
    /// returning its value, its count, and the rebalanced remainder.
    fn detach_min(mut node: Box<Node<T>>) -> (T, usize, Option<Box<Node<T>>>) {
        match node.left.take() {
            None => (node.value, node.count, node.right.take()),
            Some(left) => {
                let (value, count, left) = Self::detach_min(left);
                node.left = left;
                (value, count, Some(Self::rebalance(node)))
            }
        }
    }
}

impl<T> AvlTree<T> {
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
        Self::height_of(&self.root) as usize
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        // Balancing bounds the height logarithmically, so the recursive
        // drop of the boxed chain stays shallow.
        self.root = None;
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

    fn height_of(link: &Option<Box<Node<T>>>) -> u32 {
        link.as_deref().map_or(0, |node| node.height)
    }

    /// Left height minus right height; positive means left-heavy.
    fn balance_of(node: &Node<T>) -> i32 {
        Self::height_of(&node.left) as i32 - Self::height_of(&node.right) as i32
    }

    fn update_height(node: &mut Node<T>) {
        node.height = 1 + Self::height_of(&node.left).max(Self::height_of(&node.right));
    }

    /// Restores the height invariant at `node` after one child changed by
    /// at most one level, rotating when the skew reaches two.
    fn rebalance(mut node: Box<Node<T>>) -> Box<Node<T>> {
        Self::update_height(&mut node);
        let balance = Self::balance_of(&node);
        if balance > 1 {
            // A right-heavy left child needs a double rotation.
            if let Some(left) = node.left.take() {
                node.left = Some(if Self::balance_of(&left) < 0 {
                    Self::rotate_left(left)
                } else {
                    left
                });
            }
            return Self::rotate_right(node);
        }
        if balance < -1 {
            if let Some(right) = node.right.take() {
                node.right = Some(if Self::balance_of(&right) > 0 {
                    Self::rotate_right(right)
                } else {
                    right
                });
            }
            return Self::rotate_left(node);
        }
        node
    }

    /// Lifts the left child over `node`.
    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        node.left = pivot.right.take();
        Self::update_height(&mut node);
        pivot.right = Some(node);
        Self::update_height(&mut pivot);
        pivot
    }

    /// Lifts the right child over `node`.
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        node.right = pivot.left.take();
        Self::update_height(&mut node);
        pivot.left = Some(node);
        Self::update_height(&mut pivot);
        pivot
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Ascending iterator over an [`AvlTree`], repeating duplicates.
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

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
