use super::handle::Handle;
use super::size::Size;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    #[inline]
    pub(crate) const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The structural part of a node: everything the balancing and augmentation code touches.
///
/// The sentinel is a bare `Links` owned by the tree itself, which is why links are kept
/// apart from the key and value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Links {
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
    pub(crate) color: Color,
    pub(crate) size: Size,
}

impl Links {
    /// Links of the per-tree sentinel: black, empty, pointing nowhere.
    pub(crate) const SENTINEL: Self = Self {
        left: Handle::NIL,
        right: Handle::NIL,
        parent: Handle::NIL,
        color: Color::Black,
        size: Size::ZERO,
    };

    /// Links of a freshly attached node: red, no children.
    pub(crate) const fn leaf(parent: Handle) -> Self {
        Self {
            left: Handle::NIL,
            right: Handle::NIL,
            parent,
            color: Color::Red,
            size: Size::ZERO,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Handle {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Handle) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) links: Links,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(key: K, value: V, parent: Handle) -> Self {
        Self {
            links: Links::leaf(parent),
            key,
            value,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Clone, V: Clone> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        Self {
            links: self.links,
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }
}
