//! An ordered set backed by an unbalanced BST with one exclusive owner per
//! node. Each parent-to-child edge is a `Box`, so dropping a subtree frees it
//! and no node can be reached from two places.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Inserting an already-present value changes nothing.
//! tree.insert(1);
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a node returns its value.
//! let removed = tree.remove(&1);
//!
//! assert_eq!(removed, Some(1));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

/// An ordered set of values stored in a Binary Search Tree. This can be used
/// for inserting, finding, and removing values, and for iterating over the
/// stored values in ascending order.
///
/// The tree does no rebalancing: its height depends on insertion order and
/// degrades to `O(N)` for sorted input.
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

/// An edge in the tree. Every node is owned by exactly one of these, either
/// in its parent or in the tree's root slot.
type Link<T> = Option<Box<Node<T>>>;

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        // `clear` tears down iteratively, so dropping a degenerate
        // list-shaped tree can't overflow the stack.
        self.clear();
    }
}

impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> OrderedTree<T> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts the given value into the tree. Inserting a value that is
    /// already present leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let inserted = match self.root {
            Some(ref mut root) => root.insert(value),
            None => {
                self.root = Some(Node::new_boxed(value));
                true
            }
        };
        if inserted {
            self.len += 1;
        }
    }

    /// Potentially finds the given value in this tree. If no node holds the
    /// value, `None` is returned. The returned reference aliases the stored
    /// value, not a copy of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, target: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.root.as_deref().and_then(|n| n.find(target))
    }

    /// Whether the given value is present in the tree.
    pub fn contains(&self, target: &T) -> bool
    where
        T: Ord,
    {
        self.find(target).is_some()
    }

    /// Removes the node holding the given value from the tree and returns
    /// its value. If the tree does not contain the value, nothing happens
    /// and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, target: &T) -> Option<T>
    where
        T: Ord,
    {
        let removed = match self.root.take() {
            Some(root) => {
                let (new_root, removed) = root.remove(target);
                self.root = new_root;
                removed
            }
            None => None,
        };
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Removes every value from the tree. Clearing an empty tree is a no-op.
    pub fn clear(&mut self) {
        // Detach both children before a node's `Box` is dropped so teardown
        // never recurses, whatever shape the tree is in.
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// An iterator over the values in the tree, in ascending order. Each
    /// call starts a fresh traversal from the smallest value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = [2, 3, 1].iter().copied().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_edge(self.root.as_deref());
        iter
    }

    /// How many values are stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> std::iter::FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        // `OrderedTree` has a `Drop` impl so the root can't be moved out by
        // destructuring. Taking it leaves an empty tree for `drop` to see.
        iter.push_left_edge(self.root.take());
        iter
    }
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Clone for Node<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
        })
    }

    fn find(&self, target: &T) -> Option<&T>
    where
        T: Ord,
    {
        match target.cmp(&self.value) {
            Ordering::Less => self.left.as_deref().and_then(|n| n.find(target)),
            Ordering::Equal => Some(&self.value),
            Ordering::Greater => self.right.as_deref().and_then(|n| n.find(target)),
        }
    }

    /// Returns whether a node was inserted. Equal values stop the descent
    /// without touching the tree.
    fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => match self.left {
                Some(ref mut left) => left.insert(value),
                None => {
                    self.left = Some(Node::new_boxed(value));
                    true
                }
            },
            Ordering::Equal => false,
            Ordering::Greater => match self.right {
                Some(ref mut right) => right.insert(value),
                None => {
                    self.right = Some(Node::new_boxed(value));
                    true
                }
            },
        }
    }

    /// Removes the node holding `target` from this subtree. Takes the
    /// subtree root by value and hands back the (possibly new) root, so each
    /// caller reattaches the rewritten subtree to its own slot, along with
    /// the removed value if `target` was found.
    fn remove(mut self: Box<Self>, target: &T) -> (Link<T>, Option<T>)
    where
        T: Ord,
    {
        match target.cmp(&self.value) {
            Ordering::Less => {
                let removed = match self.left.take() {
                    Some(left) => {
                        let (new_left, removed) = left.remove(target);
                        self.left = new_left;
                        removed
                    }
                    None => None,
                };
                (Some(self), removed)
            }
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                // A leaf disappears; a node with one child is replaced by it.
                (None, None) => (None, Some(self.value)),
                (None, Some(right)) => (Some(right), Some(self.value)),
                (Some(left), None) => (Some(left), Some(self.value)),

                // With two children we promote this node's in-order
                // successor: the smallest node in the right subtree. Its
                // value is greater than everything on the left and smaller
                // than everything else on the right, so putting it here
                // keeps the BST ordering intact.
                (Some(left), Some(right)) => {
                    let (new_right, successor) = right.take_min();
                    let removed = mem::replace(&mut self.value, successor);
                    self.left = Some(left);
                    self.right = new_right;
                    (Some(self), Some(removed))
                }
            },
            Ordering::Greater => {
                let removed = match self.right.take() {
                    Some(right) => {
                        let (new_right, removed) = right.remove(target);
                        self.right = new_right;
                        removed
                    }
                    None => None,
                };
                (Some(self), removed)
            }
        }
    }

    /// Unlinks the smallest node in this subtree by recursing to the left
    /// until there is no left child, and returns the rewritten subtree root
    /// along with the unlinked value. The minimum has no left child, so its
    /// right child (if any) takes its place.
    fn take_min(mut self: Box<Self>) -> (Link<T>, T) {
        match self.left.take() {
            Some(left) => {
                let (new_left, min) = left.take_min();
                self.left = new_left;
                (Some(self), min)
            }
            None => (self.right.take(), self.value),
        }
    }
}

/// A borrowing in-order iterator over an [`OrderedTree`], created by
/// [`OrderedTree::iter`]. Yields values in ascending order.
pub struct Iter<'a, T> {
    /// Nodes whose value (and right subtree) have not been yielded yet,
    /// deepest unvisited left-edge node on top.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_edge(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_left_edge(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An owning in-order iterator over an [`OrderedTree`], created by its
/// [`IntoIterator`] impl. Yields values in ascending order, consuming the
/// tree.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left_edge(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_edge(right);
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// The tree from the walkthroughs below:
    ///
    /// ```text
    ///       5
    ///      / \
    ///     3   8
    ///    / \ / \
    ///   1  4 7  9
    /// ```
    fn sample_tree() -> OrderedTree<i32> {
        [5, 3, 8, 1, 4, 7, 9].iter().copied().collect()
    }

    fn in_order(tree: &OrderedTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn insert_and_find() {
        let mut tree = OrderedTree::new();
        assert_eq!(tree.find(&1), None);

        tree.insert(1);

        assert_eq!(tree.find(&1), Some(&1));
        assert!(tree.contains(&1));
    }

    #[test]
    fn find_missing_value() {
        let tree = sample_tree();

        assert_eq!(tree.find(&6), None);
        assert!(!tree.contains(&6));
    }

    #[test]
    fn in_order_is_ascending_regardless_of_insertion_order() {
        let tree = sample_tree();

        assert_eq!(in_order(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn duplicate_insert_is_a_noop() {
        let mut tree = sample_tree();

        tree.insert(3);
        tree.insert(5);

        assert_eq!(tree.len(), 7);
        assert_eq!(in_order(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn remove_node_with_two_children_promotes_successor() {
        let mut tree = sample_tree();

        assert_eq!(tree.remove(&5), Some(5));

        assert_eq!(in_order(&tree), vec![1, 3, 4, 7, 8, 9]);
        // The in-order successor of 5, the smallest value in its right
        // subtree, takes its place at the root.
        assert_eq!(tree.root.as_ref().unwrap().value, 7);
    }

    #[test]
    fn remove_leaves() {
        let mut tree = sample_tree();
        tree.remove(&5);

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.remove(&9), Some(9));

        assert_eq!(in_order(&tree), vec![3, 4, 7, 8]);
    }

    #[test]
    fn remove_node_with_only_left_child() {
        let mut tree: OrderedTree<i32> = [5, 3, 1].iter().copied().collect();

        assert_eq!(tree.remove(&3), Some(3));

        assert_eq!(in_order(&tree), vec![1, 5]);
        assert_eq!(tree.find(&1), Some(&1));
    }

    #[test]
    fn remove_node_with_only_right_child() {
        let mut tree: OrderedTree<i32> = [5, 7, 9].iter().copied().collect();

        assert_eq!(tree.remove(&7), Some(7));

        assert_eq!(in_order(&tree), vec![5, 9]);
        assert_eq!(tree.find(&9), Some(&9));
    }

    #[test]
    fn remove_root_of_single_node_tree() {
        let mut tree = OrderedTree::new();
        tree.insert(5);

        assert_eq!(tree.remove(&5), Some(5));

        assert!(tree.is_empty());
        assert_eq!(tree.find(&5), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut tree = sample_tree();

        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(tree.remove(&4), None);

        assert_eq!(in_order(&tree), vec![1, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn remove_from_empty_tree() {
        let mut tree: OrderedTree<i32> = OrderedTree::new();

        assert_eq!(tree.remove(&1), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn removed_value_is_no_longer_found() {
        let mut tree = sample_tree();

        for target in [8, 3, 5, 1] {
            assert_eq!(tree.remove(&target), Some(target));
            assert_eq!(tree.find(&target), None);
        }

        assert_eq!(in_order(&tree), vec![4, 7, 9]);
    }

    #[test]
    fn clear_empties_the_tree() {
        let mut tree = sample_tree();

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().next(), None);

        // Clearing an already-empty tree is a no-op.
        tree.clear();
        assert!(tree.is_empty());
    }

    #[test]
    fn len_tracks_inserts_and_removes() {
        let mut tree = OrderedTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());

        tree.insert(1);
        tree.insert(2);
        tree.insert(2);
        assert_eq!(tree.len(), 2);

        tree.remove(&1);
        tree.remove(&1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn iteration_is_restartable() {
        let tree = sample_tree();

        let first: Vec<_> = tree.iter().copied().collect();
        let second: Vec<_> = tree.iter().copied().collect();

        assert_eq!(first, second);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn iterator_reports_exact_length() {
        let tree = sample_tree();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 7);
        iter.next();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.size_hint(), (6, Some(6)));
    }

    #[test]
    fn into_iter_consumes_in_ascending_order() {
        let tree = sample_tree();

        let values: Vec<_> = tree.into_iter().collect();

        assert_eq!(values, vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = sample_tree();
        let snapshot = tree.clone();

        tree.remove(&5);
        tree.insert(6);

        assert_eq!(in_order(&snapshot), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(in_order(&tree), vec![1, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn debug_renders_as_a_set() {
        let tree: OrderedTree<i32> = [2, 1, 3].iter().copied().collect();

        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }

    #[test]
    fn list_shaped_tree_tears_down_without_recursing() {
        // Ascending inserts degenerate into a linked list. Dropping it goes
        // through the iterative `clear`, node by node.
        let mut tree = OrderedTree::new();
        for x in 0..5_000 {
            tree.insert(x);
        }

        assert_eq!(tree.len(), 5_000);
        drop(tree);
    }
}
