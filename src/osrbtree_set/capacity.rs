use super::OSRBTreeSet;
use crate::OSRBTreeMap;

impl<T> OSRBTreeSet<T> {
    /// Creates an empty set whose node arena has room for at least `capacity` elements.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OSRBTreeSet;
    ///
    /// let set: OSRBTreeSet<i32> = OSRBTreeSet::with_capacity(32);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeSet {
            map: OSRBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of node slots the set's arena can hold without reallocating.
    ///
    /// Slots freed by removals are kept for reuse and still count, so after removals
    /// the capacity stays at least as large as the peak length.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_ostree::OSRBTreeSet;
    ///
    /// let mut set: OSRBTreeSet<i32> = (0..32).collect();
    /// let peak = set.capacity();
    /// set.retain(|v| v % 4 == 0);
    /// assert_eq!(set.len(), 8);
    /// assert_eq!(set.capacity(), peak);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
}
