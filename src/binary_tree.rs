//! Level-order-filled binary tree with the four classic traversals.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

/// A binary tree filled in level order.
///
/// [`insert`] places each value in the first vacant child slot found by a
/// breadth-first scan, left child before right, so the tree always stays
/// complete: every level is full except possibly the last, which fills left
/// to right. There is no removal; the tree only grows until [`clear`].
///
/// Iteration is lazy. The default [`IntoIterator`] walk is in-order;
/// [`pre_order`], [`post_order`], and [`level_order`] expose the other
/// traversals.
///
/// [`insert`]: BinaryTree::insert
/// [`clear`]: BinaryTree::clear
/// [`pre_order`]: BinaryTree::pre_order
/// [`post_order`]: BinaryTree::post_order
/// [`level_order`]: BinaryTree::level_order
///
/// # Examples
///
/// ```
/// use clump_hash::BinaryTree;
///
/// let mut tree = BinaryTree::new();
/// for value in 0..6 {
///     tree.insert(value);
/// }
/// let levels: Vec<i32> = tree.level_order().copied().collect();
/// assert_eq!(levels, [0, 1, 2, 3, 4, 5]);
/// let in_order: Vec<i32> = tree.in_order().copied().collect();
/// assert_eq!(in_order, [3, 1, 4, 0, 5, 2]);
/// ```
pub struct BinaryTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of values in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the root value, or `None` when the tree is empty.
    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.value)
    }

    /// Adds a value in the first vacant child slot found by a level-order
    /// scan.
    pub fn insert(&mut self, value: T) {
        let slot = self.first_vacancy();
        *slot = Some(Box::new(Node {
            value,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    /// Returns `true` when some stored value equals `value`.
    ///
    /// Scans in level order; `O(len)`, since the tree is not ordered by
    /// value.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.level_order().any(|stored| stored == value)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Iterates in-order: left subtree, node, right subtree.
    pub fn in_order(&self) -> InOrder<'_, T> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.descend_left(self.root.as_deref());
        iter
    }

    /// Iterates pre-order: node, left subtree, right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }

    /// Iterates post-order: left subtree, right subtree, node.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder {
            stack: self.root.as_deref().map(|node| (node, false)).into_iter().collect(),
        }
    }

    /// Iterates in level order: each depth fully, left to right, before the
    /// next.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder {
            frontier: self.root.as_deref().into_iter().collect(),
        }
    }

    /// Breadth-first search for the first missing child slot, left before
    /// right, shallower levels first.
    fn first_vacancy(&mut self) -> &mut Option<Box<Node<T>>> {
        if self.root.is_none() {
            return &mut self.root;
        }
        let mut frontier: VecDeque<&mut Node<T>> = VecDeque::new();
        frontier.extend(self.root.as_deref_mut());
        while let Some(node) = frontier.pop_front() {
            let Node { left, right, .. } = node;
            match left {
                None => return left,
                Some(child) => frontier.push_back(child),
            }
            match right {
                None => return right,
                Some(child) => frontier.push_back(child),
            }
        }
        // Every dequeued node had two children and queued both, so the scan
        // can only end through one of the returns above.
        unreachable!("a finite tree always exposes a vacancy")
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy in-order traversal of a [`BinaryTree`].
pub struct InOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.value)
    }
}

/// Lazy pre-order traversal of a [`BinaryTree`].
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right below left so the left subtree pops first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.value)
    }
}

/// Lazy post-order traversal of a [`BinaryTree`].
pub struct PostOrder<'a, T> {
    // The flag marks nodes whose subtrees are already queued.
    stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(&node.value);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

/// Lazy level-order traversal of a [`BinaryTree`].
pub struct LevelOrder<'a, T> {
    frontier: VecDeque<&'a Node<T>>,
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.frontier.pop_front()?;
        self.frontier.extend(node.left.as_deref());
        self.frontier.extend(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a BinaryTree<T> {
    type IntoIter = InOrder<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: i32) -> BinaryTree<i32> {
        let mut tree = BinaryTree::new();
        for value in 0..n {
            tree.insert(value);
        }
        tree
    }

    #[test]
    fn test_fresh_tree_is_empty() {
        let mut tree: BinaryTree<i32> = BinaryTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);

        // Every traversal of an empty tree halts immediately.
        assert_eq!(tree.in_order().next(), None);
        assert_eq!(tree.pre_order().next(), None);
        assert_eq!(tree.post_order().next(), None);
        assert_eq!(tree.level_order().next(), None);

        tree.clear();
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_insert_keeps_first_value_at_root() {
        let mut tree = BinaryTree::new();
        tree.insert(2);
        tree.insert(1);
        tree.insert(3);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(&2));

        tree.insert(0);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root(), Some(&2));
    }

    #[test]
    fn test_level_order_matches_insertion_order() {
        let tree = filled(10);
        let seen: Vec<i32> = tree.level_order().copied().collect();
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_in_order_walks_left_node_right() {
        let tree = filled(10);
        let seen: Vec<i32> = tree.in_order().copied().collect();
        assert_eq!(seen, [7, 3, 8, 1, 9, 4, 0, 5, 2, 6]);
    }

    #[test]
    fn test_pre_order_walks_node_left_right() {
        let tree = filled(10);
        let seen: Vec<i32> = tree.pre_order().copied().collect();
        assert_eq!(seen, [0, 1, 3, 7, 8, 4, 9, 2, 5, 6]);
    }

    #[test]
    fn test_post_order_walks_left_right_node() {
        let tree = filled(10);
        let seen: Vec<i32> = tree.post_order().copied().collect();
        assert_eq!(seen, [7, 8, 3, 9, 4, 1, 5, 6, 2, 0]);
    }

    #[test]
    fn test_default_iteration_is_in_order() {
        let tree = filled(10);
        let seen: Vec<i32> = (&tree).into_iter().copied().collect();
        assert_eq!(seen, [7, 3, 8, 1, 9, 4, 0, 5, 2, 6]);
    }

    #[test]
    fn test_contains_scans_every_value() {
        let tree = filled(10);
        for value in 0..10 {
            assert!(tree.contains(&value));
        }
        for value in 10..20 {
            assert!(!tree.contains(&value));
        }
    }

    #[test]
    fn test_clear_resets_tree() {
        let mut tree = filled(10);
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.root(), Some(&0));

        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.in_order().next(), None);

        // The cleared tree fills again from the root.
        tree.insert(42);
        assert_eq!(tree.root(), Some(&42));
        assert_eq!(tree.len(), 1);
    }
}
