use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::marker::PhantomData;

use smallvec::SmallVec;

use super::arena::Arena;
use super::augment::{Augment, LinkStore, SubtreeSize};
use super::handle::Handle;
use super::node::{Color, Links, Node, Side};

/// The red-black engine backing every collection in this crate.
///
/// Nodes live in an arena and refer to each other by [`Handle`]; the sentinel is the
/// tree-owned `nil` record, addressed by [`Handle::NIL`]. The augmentation `A` is told
/// about every structural change and keeps its per-node data consistent.
pub(crate) struct RawTree<K, V, A = SubtreeSize> {
    /// Arena storing all live nodes.
    nodes: Arena<Node<K, V>>,
    /// The sentinel. Always black with size zero; its parent link is scratch space
    /// during removal.
    nil: Links,
    /// Root of the tree, or `Handle::NIL` when empty.
    root: Handle,
    _augment: PhantomData<fn() -> A>,
}

impl<K, V, A> LinkStore for RawTree<K, V, A> {
    #[inline]
    fn links(&self, handle: Handle) -> &Links {
        if handle.is_nil() { &self.nil } else { &self.nodes.get(handle).links }
    }

    #[inline]
    fn links_mut(&mut self, handle: Handle) -> &mut Links {
        if handle.is_nil() { &mut self.nil } else { &mut self.nodes.get_mut(handle).links }
    }
}

impl<K, V, A> RawTree<K, V, A> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            nil: Links::SENTINEL,
            root: Handle::NIL,
            _augment: PhantomData,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            nil: Links::SENTINEL,
            root: Handle::NIL,
            _augment: PhantomData,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nil = Links::SENTINEL;
        self.root = Handle::NIL;
    }

    /// Root of the tree, `Handle::NIL` if empty.
    #[inline]
    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    /// Returns `true` if `handle` addresses a live node of this tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.nodes.get(handle).key
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.nodes.get_mut(handle).value
    }

    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, &node.value)
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get_mut(handle);
        (&node.key, &mut node.value)
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Handle {
        self.links(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Handle {
        self.links(handle).right
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Handle {
        self.links(handle).parent
    }

    #[inline]
    pub(crate) fn color(&self, handle: Handle) -> Color {
        self.links(handle).color
    }

    /// Recolors `handle`. The sentinel only ever accepts black.
    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        if handle.is_nil() {
            debug_assert!(color.is_black(), "`RawTree::set_color()` - the sentinel must stay black!");
            return;
        }
        self.links_mut(handle).color = color;
    }

    /// Which child of its parent `handle` is.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the root (or the sentinel with no recorded parent).
    #[inline]
    pub(crate) fn side_of(&self, handle: Handle) -> Side {
        let parent = self.parent(handle);
        assert!(!parent.is_nil(), "`RawTree::side_of()` - `node` has no parent!");
        if self.left(parent) == handle { Side::Left } else { Side::Right }
    }

    pub(crate) fn is_left_child(&self, handle: Handle) -> bool {
        self.side_of(handle) == Side::Left
    }

    pub(crate) fn is_right_child(&self, handle: Handle) -> bool {
        self.side_of(handle) == Side::Right
    }

    /// The other child of `handle`'s parent, or `Handle::NIL` for the root.
    pub(crate) fn sibling(&self, handle: Handle) -> Handle {
        let parent = self.parent(handle);
        if parent.is_nil() {
            return Handle::NIL;
        }
        let links = self.links(parent);
        if links.left == handle { links.right } else { links.left }
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        assert!(!handle.is_nil(), "`RawTree::minimum()` - called on the sentinel!");
        while !self.left(handle).is_nil() {
            handle = self.left(handle);
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        assert!(!handle.is_nil(), "`RawTree::maximum()` - called on the sentinel!");
        while !self.right(handle).is_nil() {
            handle = self.right(handle);
        }
        handle
    }

    /// Smallest node of the tree, `Handle::NIL` if empty.
    pub(crate) fn first(&self) -> Handle {
        if self.root.is_nil() { Handle::NIL } else { self.minimum(self.root) }
    }

    /// Largest node of the tree, `Handle::NIL` if empty.
    pub(crate) fn last(&self) -> Handle {
        if self.root.is_nil() { Handle::NIL } else { self.maximum(self.root) }
    }

    /// In-order successor of `handle`, `Handle::NIL` if it is the last node.
    pub(crate) fn successor(&self, handle: Handle) -> Handle {
        self.neighbor(handle, Side::Right)
    }

    /// In-order predecessor of `handle`, `Handle::NIL` if it is the first node.
    pub(crate) fn predecessor(&self, handle: Handle) -> Handle {
        self.neighbor(handle, Side::Left)
    }

    fn neighbor(&self, mut handle: Handle, toward: Side) -> Handle {
        let down = self.links(handle).child(toward);
        if !down.is_nil() {
            return match toward {
                Side::Right => self.minimum(down),
                Side::Left => self.maximum(down),
            };
        }

        let mut parent = self.parent(handle);
        while !parent.is_nil() && self.links(parent).child(toward) == handle {
            handle = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Points `parent`'s link that used to lead to `old` at `new` (or the root, if
    /// `parent` is the sentinel).
    #[inline]
    fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.links_mut(parent).left = new;
        } else {
            self.links_mut(parent).right = new;
        }
    }

    /// Replaces the subtree rooted at `to` with the one rooted at `from`.
    ///
    /// `from` may be the sentinel, whose parent link is then set so the removal fixup
    /// can climb from it.
    fn transplant(&mut self, to: Handle, from: Handle) {
        let parent = self.parent(to);
        self.replace_child(parent, to, from);
        self.links_mut(from).parent = parent;
    }

    /// Drains all entries in key order, leaving the tree empty. O(n).
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while !current.is_nil() {
            order.push(current);
            current = self.successor(current);
        }

        let entries: Vec<(K, V)> = order.into_iter().map(|handle| self.nodes.take(handle).into_entry()).collect();
        self.clear();
        entries
    }
}

impl<K, V, A: Augment> RawTree<K, V, A> {
    /// Rotates `x` down toward `toward`; its child on the opposite side takes its place.
    ///
    /// ```text
    ///   rotate(x, Left)            rotate(y, Right)
    ///
    ///     x                y              y            x
    ///    / \              / \            / \          / \
    ///   a   y     =>     x   c          x   c  =>    a   y
    ///      / \          / \            / \              / \
    ///     b   c        a   b          a   b            b   c
    /// ```
    fn rotate(&mut self, x: Handle, toward: Side) {
        let rises = toward.opposite();
        let y = self.links(x).child(rises);
        debug_assert!(!y.is_nil(), "`RawTree::rotate()` - nothing to rotate up!");

        let inner = self.links(y).child(toward);
        self.links_mut(x).set_child(rises, inner);
        if !inner.is_nil() {
            self.links_mut(inner).parent = x;
        }

        let parent = self.parent(x);
        self.links_mut(y).parent = parent;
        self.replace_child(parent, x, y);

        self.links_mut(y).set_child(toward, x);
        self.links_mut(x).parent = y;

        A::after_rotate(self, x, y);
    }

    #[cfg(test)]
    pub(crate) fn rotate_left(&mut self, x: Handle) {
        self.rotate(x, Side::Left);
    }

    #[cfg(test)]
    pub(crate) fn rotate_right(&mut self, x: Handle) {
        self.rotate(x, Side::Right);
    }

    /// Inserts a node, placing equal keys to the right of existing ones.
    /// Returns the handle of the new node.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Handle
    where
        K: Ord,
    {
        // Allocate first so a full arena cannot leave the descent's bookkeeping behind.
        let added = self.nodes.alloc(Node::new(key, value, Handle::NIL));

        let mut parent = Handle::NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while !current.is_nil() {
            A::on_descend(self, current);
            parent = current;
            side = if self.key(added) < self.key(current) { Side::Left } else { Side::Right };
            current = self.links(current).child(side);
        }

        self.links_mut(added).parent = parent;
        if parent.is_nil() {
            self.root = added;
        } else {
            self.links_mut(parent).set_child(side, added);
        }
        A::on_attach(self, added);

        self.insert_fixup(added);
        added
    }

    /// Restores the red-black properties after `z` was attached as a red leaf.
    fn insert_fixup(&mut self, mut z: Handle) {
        loop {
            let parent = self.parent(z);
            if parent.is_nil() || self.color(parent).is_black() {
                break;
            }
            let grandparent = self.parent(parent);
            if grandparent.is_nil() {
                // A red root; recolored below.
                break;
            }

            let side = self.side_of(parent);
            let uncle = self.links(grandparent).child(side.opposite());
            if self.color(uncle).is_red() {
                tracing::trace!(?z, "insert fixup: red uncle, recoloring");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            if self.side_of(z) != side {
                tracing::trace!(?z, "insert fixup: inner child, rotating at parent");
                z = parent;
                self.rotate(z, side);
            }

            tracing::trace!(?z, "insert fixup: outer child, rotating at grandparent");
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlinks `z` from the tree and returns its entry.
    ///
    /// # Panics
    ///
    /// Panics if `z` is not a live node of this tree.
    pub(crate) fn remove(&mut self, z: Handle) -> (K, V) {
        assert!(self.contains(z), "`RawTree::remove()` - `node` is not in the tree!");

        let Links { left, right, .. } = *self.links(z);
        let x;
        let removed_color;
        if left.is_nil() {
            removed_color = self.color(z);
            x = right;
            self.transplant(z, right);
        } else if right.is_nil() {
            removed_color = self.color(z);
            x = left;
            self.transplant(z, left);
        } else {
            let y = self.minimum(right);
            removed_color = self.color(y);
            x = self.right(y);
            if self.parent(y) == z {
                self.links_mut(x).parent = y;
            } else {
                self.transplant(y, x);
                self.links_mut(y).right = right;
                self.links_mut(right).parent = y;
            }
            self.transplant(z, y);
            self.links_mut(y).left = left;
            self.links_mut(left).parent = y;
            let color = self.color(z);
            self.set_color(y, color);
        }

        let from = self.parent(x);
        A::after_splice(self, from);

        if removed_color.is_black() {
            self.remove_fixup(x);
        }
        self.nil = Links::SENTINEL;

        self.nodes.take(z).into_entry()
    }

    /// Restores black-height uniformity after a black node was spliced out above `x`.
    fn remove_fixup(&mut self, mut x: Handle) {
        while x != self.root && self.color(x).is_black() {
            let parent = self.parent(x);
            // `x` may be the sentinel, so compare against the parent's links directly.
            let side = if self.left(parent) == x { Side::Left } else { Side::Right };
            let mut sibling = self.links(parent).child(side.opposite());

            if self.color(sibling).is_red() {
                tracing::trace!(?x, "remove fixup: red sibling, rotating at parent");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.links(parent).child(side.opposite());
            }

            let near = self.links(sibling).child(side);
            let far = self.links(sibling).child(side.opposite());
            if self.color(near).is_black() && self.color(far).is_black() {
                tracing::trace!(?x, "remove fixup: black nephews, moving up");
                self.set_color(sibling, Color::Red);
                x = parent;
                continue;
            }

            if self.color(far).is_black() {
                tracing::trace!(?x, "remove fixup: black far nephew, rotating at sibling");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.links(parent).child(side.opposite());
            }

            tracing::trace!(?x, "remove fixup: red far nephew, rotating at parent");
            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far = self.links(sibling).child(side.opposite());
            self.set_color(far, Color::Black);
            self.rotate(parent, side);
            x = self.root;
        }
        self.set_color(x, Color::Black);
    }

    /// Searches for `key` and returns the first matching node met on the way down,
    /// `Handle::NIL` if there is none.
    pub(crate) fn search<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while !current.is_nil() {
            current = match key.cmp(self.key(current).borrow()) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return current,
            };
        }
        current
    }

    /// Leftmost node whose key equals `key`, `Handle::NIL` if there is none.
    ///
    /// Rotations can leave equal keys on both sides of a match, so keep descending left.
    pub(crate) fn search_first<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut found = Handle::NIL;
        let mut current = self.root;
        while !current.is_nil() {
            current = match key.cmp(self.key(current).borrow()) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => {
                    found = current;
                    self.left(current)
                }
            };
        }
        found
    }

    /// Checks every structural invariant and panics with a description of all
    /// violations found.
    pub(crate) fn assert_valid(&self)
    where
        K: Ord,
    {
        let mut errors: Vec<alloc::string::String> = Vec::new();

        if self.nil != Links::SENTINEL {
            errors.push(alloc::format!("sentinel was modified: {:?}", self.nil));
        }
        if !self.color(self.root).is_black() {
            errors.push("root is red".into());
        }
        if !self.root.is_nil() && !self.parent(self.root).is_nil() {
            errors.push("root has a parent".into());
        }

        // Iterative post-order walk computing (count, black height) per subtree.
        let mut stack: SmallVec<[(Handle, bool); 64]> = SmallVec::new();
        let mut results: SmallVec<[(usize, usize); 64]> = SmallVec::new();
        if !self.root.is_nil() {
            stack.push((self.root, false));
        }
        while let Some((handle, children_done)) = stack.pop() {
            let links = *self.links(handle);
            if !children_done {
                stack.push((handle, true));
                for child in [links.right, links.left] {
                    if child.is_nil() {
                        continue;
                    }
                    if self.parent(child) != handle {
                        errors.push(alloc::format!("{child:?} does not point back at its parent {handle:?}"));
                    }
                    stack.push((child, false));
                }
                continue;
            }

            let (right_count, right_black) =
                if links.right.is_nil() { (0, 1) } else { results.pop().expect("right subtree result") };
            let (left_count, left_black) =
                if links.left.is_nil() { (0, 1) } else { results.pop().expect("left subtree result") };

            if left_black != right_black {
                errors.push(alloc::format!(
                    "black height mismatch at {handle:?}: left={left_black}, right={right_black}"
                ));
            }
            if links.color.is_red() && (self.color(links.left).is_red() || self.color(links.right).is_red()) {
                errors.push(alloc::format!("red node {handle:?} has a red child"));
            }
            if !links.left.is_nil() && self.key(links.left) > self.key(handle) {
                errors.push(alloc::format!("left child of {handle:?} is out of order"));
            }
            if !links.right.is_nil() && self.key(links.right) < self.key(handle) {
                errors.push(alloc::format!("right child of {handle:?} is out of order"));
            }

            let count = left_count + right_count + 1;
            if A::MAINTAINS_SIZE && links.size.to_usize() != count {
                errors.push(alloc::format!(
                    "size mismatch at {handle:?}: stored={}, actual={count}",
                    links.size.to_usize()
                ));
            }
            results.push((count, left_black + usize::from(links.color.is_black())));
        }

        let total = results.pop().map_or(0, |(count, _)| count);
        if total != self.len() {
            errors.push(alloc::format!("len mismatch: arena holds {}, tree reaches {total}", self.len()));
        }

        // Global order: a full in-order walk never goes backwards.
        let mut current = self.first();
        while !current.is_nil() {
            let next = self.successor(current);
            if !next.is_nil() && self.key(next) < self.key(current) {
                errors.push(alloc::format!("in-order walk goes backwards at {current:?}"));
            }
            current = next;
        }

        assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
    }
}

impl<K: Clone, V: Clone, A> Clone for RawTree<K, V, A> {
    fn clone(&self) -> Self {
        // Handles are arena indices, so cloning the arena clones the shape as well.
        Self {
            nodes: self.nodes.clone(),
            nil: Links::SENTINEL,
            root: self.root,
            _augment: PhantomData,
        }
    }
}
