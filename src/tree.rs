use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::RankOutOfRange;
use crate::raw::{Handle, RawIter, RawTree};

/// Opaque handle to a node of an [`OrderStatisticTree`].
///
/// A `NodeId` stays valid until its node is removed. Passing a removed (stale) `NodeId`
/// back to the tree panics, unless its slot has since been reused by a later insert, in
/// which case it silently refers to the new node. Using a `NodeId` with a tree other
/// than the one that returned it is a logic error with unspecified (but memory-safe)
/// results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(Handle);

impl NodeId {
    #[inline]
    fn from_handle(handle: Handle) -> Option<Self> {
        handle.non_nil().map(Self)
    }
}

/// A red-black tree augmented with subtree sizes, addressed through [`NodeId`]s.
///
/// Unlike [`OSRBTreeMap`](crate::OSRBTreeMap), this tree keeps duplicate keys: an equal
/// key is always placed after the existing ones, so insertion order is preserved among
/// equals. Every node knows the size of its subtree, which makes [`select`], [`rank`]
/// and [`find_ith_successor`] O(log n).
///
/// Ranks are **one-based**: the smallest key has rank 1 and the largest has rank
/// [`len`].
///
/// # Examples
///
/// ```
/// use rb_ostree::OrderStatisticTree;
///
/// let mut tree = OrderStatisticTree::new();
/// for key in [11, 22, 33, 44, 55, 66, 77, 88] {
///     tree.insert(key, ());
/// }
///
/// let root = tree.root().unwrap();
/// let seventh = tree.select(root, 7);
/// assert_eq!(tree.key(seventh), &77);
/// assert_eq!(tree.rank(seventh), 7);
///
/// let next = tree.find_ith_successor(seventh, 1);
/// assert_eq!(tree.key(next), &88);
/// ```
///
/// [`select`]: OrderStatisticTree::select
/// [`rank`]: OrderStatisticTree::rank
/// [`find_ith_successor`]: OrderStatisticTree::find_ith_successor
/// [`len`]: OrderStatisticTree::len
pub struct OrderStatisticTree<K, V> {
    raw: RawTree<K, V>,
}

impl<K, V> OrderStatisticTree<K, V> {
    /// Makes a new, empty tree. Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawTree::new() }
    }

    /// Makes an empty tree with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Number of nodes the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every node. All outstanding `NodeId`s become stale.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns `true` if `node` refers to a live node of this tree.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.raw.contains(node.0)
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        NodeId::from_handle(self.raw.root())
    }

    /// The node with the smallest key (the first of any equal keys).
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        NodeId::from_handle(self.raw.first())
    }

    /// The node with the largest key (the last of any equal keys).
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        NodeId::from_handle(self.raw.last())
    }

    /// The next node in key order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.successor(node.0))
    }

    /// The previous node in key order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.predecessor(node.0))
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.parent(node.0))
    }

    #[must_use]
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.left(node.0))
    }

    #[must_use]
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.right(node.0))
    }

    /// The other child of `node`'s parent, if there is one. `None` for the root.
    #[must_use]
    pub fn sibling(&self, node: NodeId) -> Option<NodeId> {
        NodeId::from_handle(self.raw.sibling(node.0))
    }

    /// # Panics
    ///
    /// Panics if `node` is the root.
    #[must_use]
    pub fn is_left_child(&self, node: NodeId) -> bool {
        self.raw.is_left_child(node.0)
    }

    /// # Panics
    ///
    /// Panics if `node` is the root.
    #[must_use]
    pub fn is_right_child(&self, node: NodeId) -> bool {
        self.raw.is_right_child(node.0)
    }

    /// Whether `node` is colored red.
    #[must_use]
    pub fn is_red(&self, node: NodeId) -> bool {
        self.raw.color(node.0).is_red()
    }

    #[must_use]
    pub fn key(&self, node: NodeId) -> &K {
        self.raw.key(node.0)
    }

    #[must_use]
    pub fn value(&self, node: NodeId) -> &V {
        self.raw.entry(node.0).1
    }

    /// Mutable access to the payload. Keys cannot be changed in place.
    #[must_use]
    pub fn value_mut(&mut self, node: NodeId) -> &mut V {
        self.raw.value_mut(node.0)
    }

    #[must_use]
    pub fn entry(&self, node: NodeId) -> (&K, &V) {
        self.raw.entry(node.0)
    }

    /// Number of nodes in the subtree rooted at `node`, `node` included.
    #[must_use]
    pub fn subtree_len(&self, node: NodeId) -> usize {
        self.raw.subtree_len(node.0)
    }

    /// The node of one-based `rank` within the subtree rooted at `node`.
    ///
    /// Pass [`root`](Self::root) to select over the whole tree.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= rank <= self.subtree_len(node)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OrderStatisticTree;
    ///
    /// let tree: OrderStatisticTree<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let root = tree.root().unwrap();
    /// assert_eq!(tree.entry(tree.select(root, 1)), (&1, &'a'));
    /// assert_eq!(tree.entry(tree.select(root, 3)), (&3, &'c'));
    /// ```
    #[must_use]
    pub fn select(&self, node: NodeId, rank: usize) -> NodeId {
        NodeId(self.raw.select(node.0, rank))
    }

    /// Recursive form of [`select`](Self::select), with the same contract.
    #[must_use]
    pub fn select_recursive(&self, node: NodeId, rank: usize) -> NodeId {
        NodeId(self.raw.select_recursive(node.0, rank))
    }

    /// Like [`select`](Self::select), but reports an out-of-range `rank` as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RankOutOfRange`] unless `1 <= rank <= self.subtree_len(node)`.
    pub fn try_select(&self, node: NodeId, rank: usize) -> Result<NodeId, RankOutOfRange> {
        let len = self.raw.subtree_len(node.0);
        if rank == 0 || rank > len {
            return Err(RankOutOfRange { rank, len });
        }
        Ok(NodeId(self.raw.select(node.0, rank)))
    }

    /// One-based position of `node` in the whole tree.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    #[must_use]
    pub fn rank(&self, node: NodeId) -> usize {
        self.raw.rank(node.0)
    }

    /// The node `i` positions after `node` in key order; `node` itself when `i == 0`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `i` nodes follow `node`.
    #[must_use]
    pub fn find_ith_successor(&self, node: NodeId, i: usize) -> NodeId {
        NodeId(self.raw.find_ith_successor(node.0, i))
    }

    /// Like [`find_ith_successor`](Self::find_ith_successor), but `None` when fewer than
    /// `i` nodes follow `node`.
    #[must_use]
    pub fn try_find_ith_successor(&self, node: NodeId, i: usize) -> Option<NodeId> {
        let following = self.raw.len() - self.raw.rank(node.0);
        (i <= following).then(|| NodeId(self.raw.find_ith_successor(node.0, i)))
    }

    /// Detaches `node` and returns its key and value.
    ///
    /// Other `NodeId`s stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `node` is stale.
    pub fn remove(&mut self, node: NodeId) -> (K, V) {
        self.raw.remove(node.0)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: RawIter::new(&self.raw),
        }
    }

    /// Writes the tree in Graphviz `dot` format, labelling every node with its key, color
    /// and subtree size.
    #[cfg(feature = "dot")]
    pub fn dot(&self) -> crate::dot::Dot<'_, K, V> {
        crate::dot::Dot { raw: &self.raw }
    }

    /// Checks every structural invariant of the tree.
    ///
    /// # Panics
    ///
    /// Panics with a list of violations if BST order, the red-black coloring rules, or
    /// the subtree sizes are broken.
    pub fn assert_valid(&self)
    where
        K: Ord,
    {
        self.raw.assert_valid();
    }
}

impl<K: Ord, V> OrderStatisticTree<K, V> {
    /// Inserts a new node and returns its id. Equal keys are kept, with the new node
    /// placed after all existing nodes of the same key.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OrderStatisticTree;
    ///
    /// let mut tree = OrderStatisticTree::new();
    /// let a = tree.insert(5, "first");
    /// let b = tree.insert(5, "second");
    /// assert_eq!(tree.rank(a), 1);
    /// assert_eq!(tree.rank(b), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        NodeId(self.raw.insert(key, value))
    }

    /// Some node holding `key`: the first one met on the way down from the root.
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        NodeId::from_handle(self.raw.search(key))
    }

    /// The first node, in key order, holding `key`.
    #[must_use]
    pub fn search_first<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        NodeId::from_handle(self.raw.search_first(key))
    }

    /// One-based rank of the node [`search`](Self::search) would return.
    #[must_use]
    pub fn rank_of_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of_key(key)
    }

    /// Removes the node [`search`](Self::search) would return.
    pub fn remove_key<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key).non_nil()?;
        Some(self.raw.remove(handle))
    }
}

impl<K: Clone, V: Clone> Clone for OrderStatisticTree<K, V> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderStatisticTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OrderStatisticTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderStatisticTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderStatisticTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderStatisticTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// An iterator over the entries of an [`OrderStatisticTree`], in key order.
///
/// This `struct` is created by [`OrderStatisticTree::iter`].
pub struct Iter<'a, K, V> {
    raw: RawIter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.raw.next()?;
        Some(self.raw.tree().entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.len(), Some(self.raw.len()))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.raw.next_back()?;
        Some(self.raw.tree().entry(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn stale_ids_are_reported() {
        let mut tree = OrderStatisticTree::new();
        let a = tree.insert(1, ());
        let b = tree.insert(2, ());
        assert!(tree.contains(a));
        assert_eq!(tree.remove(a), (1, ()));
        assert!(!tree.contains(a));
        assert!(tree.contains(b));
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_id_panics() {
        let mut tree = OrderStatisticTree::new();
        let a = tree.insert(1, ());
        tree.insert(2, ());
        tree.remove(a);
        let _ = tree.rank(a);
    }

    #[test]
    fn try_variants() {
        let tree: OrderStatisticTree<_, _> = (1..=5).map(|k| (k, ())).collect();
        let root = tree.root().unwrap();
        assert_eq!(tree.try_select(root, 0), Err(RankOutOfRange { rank: 0, len: 5 }));
        assert_eq!(tree.try_select(root, 6), Err(RankOutOfRange { rank: 6, len: 5 }));
        assert_eq!(tree.try_select(root, 5).map(|n| *tree.key(n)), Ok(5));

        let second = tree.select(root, 2);
        assert_eq!(tree.try_find_ith_successor(second, 3).map(|n| *tree.key(n)), Some(5));
        assert_eq!(tree.try_find_ith_successor(second, 4), None);
    }

    #[test]
    fn navigation_agrees_with_iteration() {
        let tree: OrderStatisticTree<_, _> = [8, 3, 10, 1, 6, 14, 4, 7, 13].into_iter().map(|k| (k, k * 10)).collect();
        let forward: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
        let backward: Vec<_> = tree.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(forward, [1, 3, 4, 6, 7, 8, 10, 13, 14]);
        assert_eq!(backward, [14, 13, 10, 8, 7, 6, 4, 3, 1]);

        let mut walked = Vec::new();
        let mut node = tree.first();
        while let Some(id) = node {
            walked.push(*tree.key(id));
            node = tree.successor(id);
        }
        assert_eq!(walked, forward);
        assert_eq!(tree.last().map(|n| *tree.value(n)), Some(140));
        assert_eq!(tree.iter().len(), 9);
    }

    #[test]
    fn family_links() {
        let tree: OrderStatisticTree<_, _> = [2, 1, 3].into_iter().map(|k| (k, ())).collect();
        let root = tree.root().unwrap();
        assert_eq!(*tree.key(root), 2);
        assert!(!tree.is_red(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.sibling(root), None);

        let left = tree.left(root).unwrap();
        let right = tree.right(root).unwrap();
        assert!(tree.is_left_child(left));
        assert!(tree.is_right_child(right));
        assert_eq!(tree.sibling(left), Some(right));
        assert_eq!(tree.parent(left), Some(root));
        assert!(tree.is_red(left) && tree.is_red(right));
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut tree = OrderStatisticTree::new();
        let ids: Vec<_> = (0..6).map(|i| tree.insert(7, i)).collect();
        tree.insert(3, 99);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(tree.rank(*id), i + 2);
        }
        let leftmost = tree.search_first(&7).unwrap();
        assert_eq!(*tree.value(leftmost), 0);
        assert!(tree.search(&7).is_some());
        assert!(tree.rank_of_key(&7).is_some_and(|r| (2..=7).contains(&r)));
    }

    #[test]
    fn remove_key_and_value_mut() {
        let mut tree: OrderStatisticTree<_, _> = [("b", 2), ("a", 1)].into_iter().collect();
        let a = tree.search("a").unwrap();
        *tree.value_mut(a) += 10;
        assert_eq!(tree.remove_key("a"), Some(("a", 11)));
        assert_eq!(tree.remove_key("a"), None);
        assert_eq!(tree.len(), 1);
        tree.assert_valid();
    }

    #[test]
    fn debug_output() {
        let tree: OrderStatisticTree<_, _> = [(2, 'b'), (1, 'a')].into_iter().collect();
        assert_eq!(alloc::format!("{tree:?}"), "{1: 'a', 2: 'b'}");
    }
}
