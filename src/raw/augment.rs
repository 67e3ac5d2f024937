use super::handle::Handle;
use super::node::Links;
use super::size::Size;

/// Read/write access to the links of any node, the sentinel included.
pub(crate) trait LinkStore {
    fn links(&self, handle: Handle) -> &Links;
    fn links_mut(&mut self, handle: Handle) -> &mut Links;

    #[inline]
    fn size(&self, handle: Handle) -> Size {
        self.links(handle).size
    }
}

/// Hooks the red-black engine calls after each structural step.
///
/// The engine only recolors and relinks; an augmentation keeps its per-node data
/// consistent by reacting to the four points where shape changes. Every hook runs after
/// the pointers involved are already rewired.
pub(crate) trait Augment {
    /// Whether `Links::size` is kept exact. Only checked by invariant validation.
    const MAINTAINS_SIZE: bool;

    /// `visited` lies on the insertion path and is about to gain a descendant.
    #[inline]
    fn on_descend(_store: &mut impl LinkStore, _visited: Handle) {}

    /// `node` was just linked into the tree as a leaf.
    #[inline]
    fn on_attach(_store: &mut impl LinkStore, _node: Handle) {}

    /// `lowered` was rotated down below `raised`.
    #[inline]
    fn after_rotate(_store: &mut impl LinkStore, _lowered: Handle, _raised: Handle) {}

    /// A node was spliced out below `from`; every node from `from` up to the root lost
    /// exactly one descendant.
    #[inline]
    fn after_splice(_store: &mut impl LinkStore, _from: Handle) {}
}

/// The bare red-black engine: sizes are never written.
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NoAugment;

#[cfg(test)]
impl Augment for NoAugment {
    const MAINTAINS_SIZE: bool = false;
}

/// Order-statistic augmentation: every node counts the nodes of its subtree.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SubtreeSize;

impl Augment for SubtreeSize {
    const MAINTAINS_SIZE: bool = true;

    #[inline]
    fn on_descend(store: &mut impl LinkStore, visited: Handle) {
        let links = store.links_mut(visited);
        links.size = links.size.incremented();
    }

    #[inline]
    fn on_attach(store: &mut impl LinkStore, node: Handle) {
        store.links_mut(node).size = Size::ONE;
    }

    #[inline]
    fn after_rotate(store: &mut impl LinkStore, lowered: Handle, raised: Handle) {
        // The raised node now spans exactly what the lowered one used to.
        let spanned = store.size(lowered);
        store.links_mut(raised).size = spanned;
        let Links { left, right, .. } = *store.links(lowered);
        let size = Size::of_children(store.size(left), store.size(right));
        store.links_mut(lowered).size = size;
    }

    fn after_splice(store: &mut impl LinkStore, from: Handle) {
        let mut current = from;
        while !current.is_nil() {
            let Links { left, right, parent, .. } = *store.links(current);
            let size = Size::of_children(store.size(left), store.size(right));
            store.links_mut(current).size = size;
            current = parent;
        }
    }
}
