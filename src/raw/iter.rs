use super::handle::Handle;
use super::red_black::RawTree;

/// Double-ended in-order walk over the handles of a borrowed tree.
///
/// `front` and `back` are the next handles to yield from each end; `remaining` keeps the
/// two ends from crossing.
pub(crate) struct RawIter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }

    #[inline]
    pub(crate) const fn tree(&self) -> &'a RawTree<K, V> {
        self.tree
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.front;
        self.front = self.tree.successor(handle);
        Some(handle)
    }

    pub(crate) fn next_back(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let handle = self.back;
        self.back = self.tree.predecessor(handle);
        Some(handle)
    }
}

// Derived `Clone` would require `K: Clone, V: Clone`.
impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
