use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// Index of a node slot in the arena.
///
/// The top raw value is reserved for the sentinel ([`Handle::NIL`]) and is never handed
/// out by the arena, so every link in the tree is a plain `Handle` and "no child" /
/// "no parent" never needs an `Option`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest index the arena may allocate.
    pub(crate) const MAX: usize = (RawHandle::MAX - 2) as usize;

    /// The per-tree sentinel.
    pub(crate) const NIL: Self = Self(NonZero::<RawHandle>::MAX);

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is never zero and fits since `index <= MAX`.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        debug_assert!(!self.is_nil(), "`Handle::to_index()` - called on the sentinel!");
        (self.0.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0.get() == RawHandle::MAX
    }

    /// `None` for the sentinel, `Some(self)` otherwise.
    #[inline]
    pub(crate) const fn non_nil(self) -> Option<Self> {
        if self.is_nil() { None } else { Some(self) }
    }
}
