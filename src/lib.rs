#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Self-balancing binary search tree with duplicate counting.
pub mod avl;

/// Level-order-filled binary tree with the four classic traversals.
pub mod binary_tree;

/// Binary search tree with duplicate counting.
pub mod bst;

/// Fixed-capacity double-ended queue over a ring buffer.
pub mod deque;

/// Error and result types shared by the failing operations in this crate.
pub mod error;

pub mod hash_table;

/// A hash set implementation over the chained hash table.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

/// Doubly-linked list with owned nodes.
pub mod linked_list;

/// Fixed-capacity queues: a linear queue and a circular (ring) queue.
pub mod queue;

/// Singly-linked list with positional access.
pub mod singly_list;

/// Comparison sorts over mutable slices.
pub mod sort;

/// Fixed-capacity last-in first-out stack.
pub mod stack;

pub use avl::AvlTree;
pub use binary_tree::BinaryTree;
pub use bst::BinarySearchTree;
pub use deque::Deque;
pub use error::Error;
pub use error::Result;
pub use hash_set::HashSet;
pub use hash_table::Entry;
pub use hash_table::HashTable;
pub use linked_list::LinkedList;
pub use queue::CircularQueue;
pub use queue::Queue;
pub use singly_list::SinglyLinkedList;
pub use stack::Stack;
