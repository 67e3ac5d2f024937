use super::OSRBTreeMap;
use crate::raw::RawTree;

impl<K, V> OSRBTreeMap<K, V> {
    /// Creates an empty map whose node arena has room for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeMap {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the number of node slots the map's arena can hold without reallocating.
    ///
    /// Slots freed by removals are kept for reuse and still count, so after removals
    /// the capacity stays at least as large as the peak length.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    ///
    /// map.extend((0..32).map(|k| (k, k)));
    /// map.remove(&7);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
