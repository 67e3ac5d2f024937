use core::borrow::Borrow;
use core::cmp::Ordering;

use super::augment::{LinkStore, SubtreeSize};
use super::handle::Handle;
use super::red_black::RawTree;

// All ranks in this module are one-based: the smallest node has rank 1.
impl<K, V> RawTree<K, V, SubtreeSize> {
    /// Number of nodes in the subtree rooted at `handle` (zero for the sentinel).
    #[inline]
    pub(crate) fn subtree_len(&self, handle: Handle) -> usize {
        self.size(handle).to_usize()
    }

    /// Rank of `handle` within its own subtree.
    #[inline]
    fn local_rank(&self, handle: Handle) -> usize {
        self.subtree_len(self.left(handle)) + 1
    }

    /// Node holding the `rank`-th smallest key of the subtree rooted at `node`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= rank <= subtree_len(node)`.
    pub(crate) fn select(&self, mut node: Handle, mut rank: usize) -> Handle {
        assert!(
            rank >= 1 && rank <= self.subtree_len(node),
            "`RawTree::select()` - `rank` {rank} is outside 1..={}!",
            self.subtree_len(node)
        );

        loop {
            let here = self.local_rank(node);
            match rank.cmp(&here) {
                Ordering::Equal => return node,
                Ordering::Less => node = self.left(node),
                Ordering::Greater => {
                    node = self.right(node);
                    rank -= here;
                }
            }
        }
    }

    /// Recursive form of [`select`](Self::select), with the same contract.
    pub(crate) fn select_recursive(&self, node: Handle, rank: usize) -> Handle {
        assert!(
            rank >= 1 && rank <= self.subtree_len(node),
            "`RawTree::select_recursive()` - `rank` {rank} is outside 1..={}!",
            self.subtree_len(node)
        );

        let here = self.local_rank(node);
        match rank.cmp(&here) {
            Ordering::Equal => node,
            Ordering::Less => self.select_recursive(self.left(node), rank),
            Ordering::Greater => self.select_recursive(self.right(node), rank - here),
        }
    }

    /// Rank of `handle` within the whole tree.
    pub(crate) fn rank(&self, handle: Handle) -> usize {
        assert!(!handle.is_nil(), "`RawTree::rank()` - called on the sentinel!");

        let mut rank = self.local_rank(handle);
        let mut current = handle;
        while current != self.root() {
            let parent = self.parent(current);
            if self.right(parent) == current {
                rank += self.local_rank(parent);
            }
            current = parent;
        }
        rank
    }

    /// Rank of the first node holding `key` met on the way down from the root.
    pub(crate) fn rank_of_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut skipped = 0;
        let mut current = self.root();
        while !current.is_nil() {
            match key.cmp(self.key(current).borrow()) {
                Ordering::Less => current = self.left(current),
                Ordering::Equal => return Some(skipped + self.local_rank(current)),
                Ordering::Greater => {
                    skipped += self.local_rank(current);
                    current = self.right(current);
                }
            }
        }
        None
    }

    /// Node `i` positions after `node` in key order; `node` itself when `i == 0`.
    ///
    /// Climbs only as far as needed and then descends with [`select`](Self::select), so
    /// this is O(log n) regardless of `i`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `i` nodes follow `node`.
    pub(crate) fn find_ith_successor(&self, mut node: Handle, mut i: usize) -> Handle {
        loop {
            if i == 0 {
                return node;
            }

            let right = self.right(node);
            let ahead = self.subtree_len(right);
            if i <= ahead {
                return self.select(right, i);
            }
            i -= ahead;

            // Everything below `node` is used up; climb to the first ancestor that has
            // `node` in its left subtree. That ancestor is the next node in order.
            loop {
                let child = node;
                node = self.parent(node);
                assert!(!node.is_nil(), "`RawTree::find_ith_successor()` - `i` runs past the last node!");
                if self.left(node) == child {
                    break;
                }
            }
            i -= 1;
        }
    }

    /// Node of the given rank in the whole tree, `None` if out of range.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<Handle> {
        (1..=self.len()).contains(&rank).then(|| self.select(self.root(), rank))
    }
}
