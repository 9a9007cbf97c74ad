//! A Binary Search Tree over unique values that is built balanced and
//! rebalanced on demand.
//!
//! [`Tree::build`] sorts and dedupes its input and then constructs the tree by
//! median split, so a freshly built tree always satisfies the balance
//! invariant. Plain [`insert`]s and [`remove`]s keep the ordering invariant
//! but are allowed to degrade the shape; callers decide when to pay for a
//! [`rebalance`].
//!
//! [`insert`]: Tree::insert
//! [`remove`]: Tree::remove
//! [`rebalance`]: Tree::rebalance
//!
//! # Examples
//!
//! ```
//! use bstree::tree::Tree;
//!
//! let mut tree = Tree::build(vec![1, 7, 4, 23, 8, 9, 4, 3]);
//!
//! // Duplicates are dropped and the values come back out sorted.
//! let mut values = Vec::new();
//! tree.in_order(|v| values.push(*v)).unwrap();
//! assert_eq!(values, [1, 3, 4, 7, 8, 9, 23]);
//!
//! // Median-split construction always yields a balanced shape.
//! assert!(tree.is_balanced());
//!
//! // Mutations may unbalance the tree; rebalancing is explicit.
//! for v in 100..110 {
//!     tree.insert(v);
//! }
//! tree.rebalance().unwrap();
//! assert!(tree.is_balanced());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ptr;

use crate::queue::Queue;
use crate::sort;

/// An owned link to a subtree. `None` is the empty subtree.
type Link<T> = Option<Box<Node<T>>>;

/// The tree's storage unit: a value and two owned optional subtrees. There is
/// no parent pointer and no shared ownership, so the node graph is a strict
/// tree by construction.
#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// A Binary Search Tree holding a set of unique values.
///
/// The tree owns its entire node graph; dropping the tree drops every node.
/// Values act as their own keys and must have a total order.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders the tree sideways: the right subtree is printed above its parent
/// and the left subtree below, joined with box-drawing connectors.
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.as_deref() {
            None => writeln!(f, "(empty tree)"),
            Some(root) => render(root, f, "", true),
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a balanced tree from an arbitrary collection of values.
    ///
    /// The input is sorted ascending (via [`sort::merge_sort_by`]) and
    /// deduplicated, then split recursively at the midpoint: the middle
    /// element becomes the subtree root, everything before it the left
    /// subtree, everything after it the right subtree. For even-length
    /// ranges the left half keeps the extra element, so the resulting shape
    /// is deterministic. Immediately after `build`, [`is_balanced`] holds.
    ///
    /// [`is_balanced`]: Tree::is_balanced
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::tree::Tree;
    ///
    /// let tree = Tree::build(vec![3, 1, 2, 3, 1]);
    ///
    /// let mut values = Vec::new();
    /// tree.in_order(|v| values.push(*v)).unwrap();
    /// assert_eq!(values, [1, 2, 3]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut sorted = sort::merge_sort_by(values.into_iter().collect(), T::cmp);
        sorted.dedup();
        let len = sorted.len();
        Self {
            root: build_balanced(sorted),
            len,
        }
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, self.root.is_none());
        self.len == 0
    }

    /// Looks up a value, distinguishing the three possible outcomes: the
    /// tree is empty, the value is absent, or the value was found. On a hit
    /// the returned [`NodeRef`] can be fed to [`depth`] or queried for its
    /// subtree [`height`].
    ///
    /// [`depth`]: Tree::depth
    /// [`height`]: NodeRef::height
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::tree::{Find, Tree};
    ///
    /// let tree = Tree::build(vec![2, 1, 3]);
    ///
    /// assert_eq!(tree.find(&2).found().map(|n| *n.value()), Some(2));
    /// assert!(matches!(tree.find(&42), Find::NotFound));
    /// assert!(matches!(Tree::<i32>::new().find(&2), Find::EmptyTree));
    /// ```
    pub fn find(&self, value: &T) -> Find<'_, T>
    where
        T: Ord,
    {
        match self.root.as_deref() {
            None => Find::EmptyTree,
            Some(root) => match find_node(root, value) {
                Some(node) => Find::Found(NodeRef(node)),
                None => Find::NotFound,
            },
        }
    }

    /// Inserts a value. Inserting a value already present is a silent no-op;
    /// the tree never holds duplicates. Insertion attaches a leaf at the
    /// first empty side found by descent and never restructures, so a long
    /// run of inserts can unbalance the tree (see [`rebalance`]).
    ///
    /// [`rebalance`]: Tree::rebalance
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        match self.root {
            Some(ref mut root) => {
                if insert_node(root, value) {
                    self.len += 1;
                }
            }
            None => {
                self.root = Some(Box::new(Node::leaf(value)));
                self.len += 1;
            }
        }
    }

    /// Removes a value. Removing an absent value is a silent no-op.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes over the value of its in-order successor (the
    /// minimum of its right subtree), which is unlinked from the right
    /// subtree in the same pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::tree::Tree;
    ///
    /// let mut tree = Tree::build(vec![1, 2, 3, 4, 5]);
    /// tree.remove(&3);
    /// tree.remove(&42); // absent: nothing happens
    ///
    /// let mut values = Vec::new();
    /// tree.in_order(|v| values.push(*v)).unwrap();
    /// assert_eq!(values, [1, 2, 4, 5]);
    /// ```
    pub fn remove(&mut self, value: &T)
    where
        T: Ord,
    {
        let (root, removed) = remove_node(self.root.take(), value);
        self.root = root;
        if removed {
            self.len -= 1;
        }
    }

    /// The node holding the smallest value, or `None` on an empty tree.
    pub fn min(&self) -> Option<NodeRef<'_, T>> {
        self.root.as_deref().map(|root| NodeRef(min_node(root)))
    }

    /// The node holding the largest value, or `None` on an empty tree.
    pub fn max(&self) -> Option<NodeRef<'_, T>> {
        self.root.as_deref().map(|root| NodeRef(max_node(root)))
    }

    /// Visits every value in pre-order: node, left subtree, right subtree.
    ///
    /// Reports [`EmptyTree`] when there is nothing to traverse.
    pub fn pre_order<F>(&self, mut visit: F) -> Result<(), EmptyTree>
    where
        F: FnMut(&T),
    {
        let root = self.root.as_deref().ok_or(EmptyTree)?;
        walk_pre_order(root, &mut visit);
        Ok(())
    }

    /// Visits every value in-order: left subtree, node, right subtree. By
    /// the ordering invariant this yields the values in strictly ascending
    /// order.
    ///
    /// Reports [`EmptyTree`] when there is nothing to traverse.
    pub fn in_order<F>(&self, mut visit: F) -> Result<(), EmptyTree>
    where
        F: FnMut(&T),
    {
        let root = self.root.as_deref().ok_or(EmptyTree)?;
        walk_in_order(root, &mut visit);
        Ok(())
    }

    /// Visits every value in post-order: left subtree, right subtree, node.
    ///
    /// Reports [`EmptyTree`] when there is nothing to traverse.
    pub fn post_order<F>(&self, mut visit: F) -> Result<(), EmptyTree>
    where
        F: FnMut(&T),
    {
        let root = self.root.as_deref().ok_or(EmptyTree)?;
        walk_post_order(root, &mut visit);
        Ok(())
    }

    /// Visits every value breadth-first: by depth, left to right within each
    /// level, driven by a FIFO [`Queue`].
    ///
    /// Reports [`EmptyTree`] when there is nothing to traverse.
    pub fn level_order<F>(&self, mut visit: F) -> Result<(), EmptyTree>
    where
        F: FnMut(&T),
    {
        let root = self.root.as_deref().ok_or(EmptyTree)?;
        let mut queue = Queue::new();
        queue.enqueue(root);
        while let Some(node) = queue.dequeue() {
            visit(&node.value);
            if let Some(left) = node.left.as_deref() {
                queue.enqueue(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.enqueue(right);
            }
        }
        Ok(())
    }

    /// The height of the tree: the longest path from the root down to a
    /// leaf, in edges. A tree holding a single value has height `0`.
    ///
    /// Reports [`EmptyTree`] when there is no root; the height of an
    /// arbitrary node is available through [`NodeRef::height`].
    pub fn height(&self) -> Result<isize, EmptyTree> {
        let root = self.root.as_deref().ok_or(EmptyTree)?;
        Ok(link_height(Some(root)))
    }

    /// The distance in edges from the root to the given node, located by
    /// identity rather than by value: a [`NodeRef`] borrowed from a
    /// different tree yields `Ok(None)` even when an equal value is present
    /// here. The root itself is at depth `0`.
    ///
    /// Reports [`EmptyTree`] when there is no root.
    pub fn depth(&self, node: NodeRef<'_, T>) -> Result<Option<usize>, EmptyTree>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref().ok_or(EmptyTree)?;
        let mut level = 0;
        loop {
            if ptr::eq(current, node.0) {
                return Ok(Some(level));
            }
            // Values are unique, so the target's value pins down the only
            // path it could live on. Reaching an equal value that is not the
            // same node means the handle belongs to another tree.
            let next = match node.0.value.cmp(&current.value) {
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
                Ordering::Equal => None,
            };
            match next {
                Some(child) => {
                    current = child;
                    level += 1;
                }
                None => return Ok(None),
            }
        }
    }

    /// Returns `true` if, for every node, the heights of its two subtrees
    /// differ by at most one. An empty tree is balanced.
    ///
    /// The check runs bottom-up, computing each subtree's height and balance
    /// flag in a single pass and bailing out as soon as any subtree fails,
    /// so the whole query is `O(n)` in the worst case.
    pub fn is_balanced(&self) -> bool {
        check_balance(self.root.as_deref()).balanced
    }

    /// Rebuilds the tree into a balanced shape.
    ///
    /// The tree is drained in-order (by the ordering and uniqueness
    /// invariants the drained values are already sorted and unique) and the
    /// median-split builder of [`build`] runs over them, replacing the root.
    /// The in-order value sequence is preserved exactly.
    ///
    /// Reports [`EmptyTree`] when there is nothing to rebalance.
    ///
    /// [`build`]: Tree::build
    pub fn rebalance(&mut self) -> Result<(), EmptyTree> {
        let root = self.root.take().ok_or(EmptyTree)?;
        let mut values = Vec::with_capacity(self.len);
        drain_in_order(root, &mut values);
        self.root = build_balanced(values);
        Ok(())
    }
}

/// A borrowed handle to a node inside a [`Tree`], returned by lookups.
///
/// Comparison is by node identity, not by value: two `NodeRef`s are equal
/// only when they point at the very same node.
pub struct NodeRef<'a, T>(&'a Node<T>);

// Manual `Clone`/`Copy` so the impls don't pick up a spurious `T: Clone`
// bound; the handle is just a reference.
impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}
impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("value", self.value()).finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The value stored at this node.
    pub fn value(&self) -> &'a T {
        &self.0.value
    }

    /// The height of the subtree rooted at this node, in edges. A leaf has
    /// height `0`.
    pub fn height(&self) -> isize {
        link_height(Some(self.0))
    }
}

/// The outcome of a [`Tree::find`]: lookups distinguish an empty tree from a
/// miss from a hit instead of collapsing them into one sentinel.
#[derive(Debug, PartialEq, Eq)]
pub enum Find<'a, T> {
    /// The tree has no root; nothing could be searched.
    EmptyTree,
    /// The tree is non-empty but does not hold the value. A normal outcome,
    /// not an error.
    NotFound,
    /// The value is present at the referenced node.
    Found(NodeRef<'a, T>),
}

impl<'a, T> Clone for Find<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Find<'a, T> {}

impl<'a, T> Find<'a, T> {
    /// The found node, if any.
    pub fn found(self) -> Option<NodeRef<'a, T>> {
        match self {
            Find::Found(node) => Some(node),
            Find::EmptyTree | Find::NotFound => None,
        }
    }

    /// Returns `true` on a hit.
    pub fn is_found(&self) -> bool {
        matches!(self, Find::Found(_))
    }
}

/// Reported when an operation requiring a root runs on an empty tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTree;

impl fmt::Display for EmptyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tree is empty")
    }
}

impl std::error::Error for EmptyTree {}

/// Builds a balanced subtree from sorted, deduplicated values: the midpoint
/// becomes the root, the lower range the left subtree, the upper range the
/// right. `mid = n / 2`, so the left half keeps the extra element when the
/// range length is even.
fn build_balanced<T>(mut values: Vec<T>) -> Link<T> {
    match values.len() {
        0 => None,
        1 => Some(Box::new(Node::leaf(values.pop().expect("length is 1")))),
        n => {
            let mid = n / 2;
            let mut upper = values.split_off(mid);
            let right = upper.split_off(1);
            let value = upper.pop().expect("split kept the midpoint");
            Some(Box::new(Node {
                value,
                left: build_balanced(values),
                right: build_balanced(right),
            }))
        }
    }
}

fn find_node<'a, T: Ord>(node: &'a Node<T>, value: &T) -> Option<&'a Node<T>> {
    match value.cmp(&node.value) {
        Ordering::Less => node.left.as_deref().and_then(|left| find_node(left, value)),
        Ordering::Greater => node
            .right
            .as_deref()
            .and_then(|right| find_node(right, value)),
        Ordering::Equal => Some(node),
    }
}

/// Returns `true` if a new leaf was attached, `false` on a duplicate.
fn insert_node<T: Ord>(node: &mut Node<T>, value: T) -> bool {
    match value.cmp(&node.value) {
        Ordering::Equal => false,
        Ordering::Less => match node.left {
            Some(ref mut left) => insert_node(left, value),
            None => {
                node.left = Some(Box::new(Node::leaf(value)));
                true
            }
        },
        Ordering::Greater => match node.right {
            Some(ref mut right) => insert_node(right, value),
            None => {
                node.right = Some(Box::new(Node::leaf(value)));
                true
            }
        },
    }
}

/// Removes `value` from the subtree and returns the new subtree root plus
/// whether anything was removed. Each caller re-links the returned root into
/// its parent edge, which is how replacement propagates upward.
fn remove_node<T: Ord>(link: Link<T>, value: &T) -> (Link<T>, bool) {
    let mut node = match link {
        None => return (None, false),
        Some(node) => node,
    };
    match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = remove_node(node.left.take(), value);
            node.left = left;
            (Some(node), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove_node(node.right.take(), value);
            node.right = right;
            (Some(node), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            // With at most one child the node is spliced out entirely.
            (None, right) => (right, true),
            (left, None) => (left, true),
            // With two children the node takes over its in-order successor's
            // value; `take_min` unlinks the successor (which has no left
            // child, so it is replaced by its own right subtree).
            (left, Some(right)) => {
                let (right, successor) = take_min(right);
                node.value = successor;
                node.left = left;
                node.right = right;
                (Some(node), true)
            }
        },
    }
}

/// Unlinks the minimum node of the subtree, returning the remaining subtree
/// and the minimum value.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(node), min)
        }
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
    }
}

fn min_node<T>(node: &Node<T>) -> &Node<T> {
    match node.left.as_deref() {
        Some(left) => min_node(left),
        None => node,
    }
}

fn max_node<T>(node: &Node<T>) -> &Node<T> {
    match node.right.as_deref() {
        Some(right) => max_node(right),
        None => node,
    }
}

fn walk_pre_order<T, F: FnMut(&T)>(node: &Node<T>, visit: &mut F) {
    visit(&node.value);
    if let Some(left) = node.left.as_deref() {
        walk_pre_order(left, visit);
    }
    if let Some(right) = node.right.as_deref() {
        walk_pre_order(right, visit);
    }
}

fn walk_in_order<T, F: FnMut(&T)>(node: &Node<T>, visit: &mut F) {
    if let Some(left) = node.left.as_deref() {
        walk_in_order(left, visit);
    }
    visit(&node.value);
    if let Some(right) = node.right.as_deref() {
        walk_in_order(right, visit);
    }
}

fn walk_post_order<T, F: FnMut(&T)>(node: &Node<T>, visit: &mut F) {
    if let Some(left) = node.left.as_deref() {
        walk_post_order(left, visit);
    }
    if let Some(right) = node.right.as_deref() {
        walk_post_order(right, visit);
    }
    visit(&node.value);
}

/// Moves every value of the subtree into `out`, in-order.
fn drain_in_order<T>(node: Box<Node<T>>, out: &mut Vec<T>) {
    let Node { value, left, right } = *node;
    if let Some(left) = left {
        drain_in_order(left, out);
    }
    out.push(value);
    if let Some(right) = right {
        drain_in_order(right, out);
    }
}

/// Height of an owned link in edges; the empty subtree has height `-1`, so a
/// leaf node comes out at `0`.
fn link_height<T>(link: Option<&Node<T>>) -> isize {
    match link {
        None => -1,
        Some(node) => {
            1 + link_height(node.left.as_deref()).max(link_height(node.right.as_deref()))
        }
    }
}

struct Balance {
    height: isize,
    balanced: bool,
}

/// Bottom-up balance check: each subtree reports its height together with a
/// balance flag, and an unbalanced subtree propagates straight up without
/// visiting the rest of the tree. The height riding along with a `false`
/// flag is stale, which is fine since the flag alone decides the outcome.
fn check_balance<T>(link: Option<&Node<T>>) -> Balance {
    let node = match link {
        None => {
            return Balance {
                height: -1,
                balanced: true,
            }
        }
        Some(node) => node,
    };
    let left = check_balance(node.left.as_deref());
    if !left.balanced {
        return left;
    }
    let right = check_balance(node.right.as_deref());
    if !right.balanced {
        return right;
    }
    Balance {
        height: 1 + left.height.max(right.height),
        balanced: (left.height - right.height).abs() <= 1,
    }
}

fn render<T: fmt::Display>(
    node: &Node<T>,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    if let Some(right) = node.right.as_deref() {
        let pipe = if is_left { "│   " } else { "    " };
        render(right, f, &format!("{}{}", prefix, pipe), false)?;
    }
    let connector = if is_left { "└── " } else { "┌── " };
    writeln!(f, "{}{}{}", prefix, connector, node.value)?;
    if let Some(left) = node.left.as_deref() {
        let pipe = if is_left { "    " } else { "│   " };
        render(left, f, &format!("{}{}", prefix, pipe), true)?;
    }
    Ok(())
}
