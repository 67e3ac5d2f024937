use crate::OrderStatisticTree;

/// Counts the pairs `(i, j)` with `i < j` and `seq[i] > seq[j]` in O(n log n).
///
/// Each element is inserted into an [`OrderStatisticTree`] in turn. Since equal keys go
/// after existing ones, the rank of the freshly inserted node counts the earlier
/// elements not greater than it, and the rest of the prefix are inversions.
///
/// # Examples
///
/// ```
/// use rb_ostree::count_inversions;
///
/// assert_eq!(count_inversions(&[2, 4, 5, 7, 2, 6, 3]), 8);
/// assert_eq!(count_inversions::<u8>(&[]), 0);
/// ```
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(len = seq.len()))]
pub fn count_inversions<T: Ord>(seq: &[T]) -> usize {
    let mut tree = OrderStatisticTree::with_capacity(seq.len());
    let mut inversions = 0;
    for (index, element) in seq.iter().enumerate() {
        let node = tree.insert(element, ());
        inversions += index + 1 - tree.rank(node);
    }
    tracing::debug!(inversions, "counted inversions");
    inversions
}
