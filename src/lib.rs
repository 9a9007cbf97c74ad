//! A Binary Search Tree (BST) over unique values, built balanced from its
//! input and rebalanced only on demand.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching such a tree takes `O(height)` (where `height` is the longest
//! path from the root `Node` to a leaf `Node`), so keeping the height near
//! `lg N` matters. This crate keeps the tree shallow in two places: [`build`]
//! constructs the tree by repeatedly picking the median of the sorted, unique
//! input as a subtree root, and [`rebalance`] flattens a degraded tree back
//! into sorted order and rebuilds it the same way. In between, inserts and
//! removes are plain BST mutations that never restructure, so the caller
//! controls when rebalancing work happens.
//!
//! The sorting and queueing the tree relies on are ordinary modules here:
//! [`sort`] is the comparator-based merge sort behind construction and
//! [`queue`] the FIFO ring buffer driving breadth-first traversal.
//!
//! [`build`]: tree::Tree::build
//! [`rebalance`]: tree::Tree::rebalance

#![deny(missing_docs)]

pub mod queue;
pub mod sort;
pub mod tree;
