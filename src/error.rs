use core::fmt;

/// Error returned by [`OrderStatisticTree::try_select`](crate::OrderStatisticTree::try_select)
/// when the requested rank does not exist in the subtree.
///
/// Ranks are one-based, so the valid range is `1..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOutOfRange {
    /// The rank that was asked for.
    pub rank: usize,
    /// Number of nodes in the subtree that was searched.
    pub len: usize,
}

impl fmt::Display for RankOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            write!(f, "rank {} requested from an empty subtree", self.rank)
        } else {
            write!(f, "rank {} is outside 1..={}", self.rank, self.len)
        }
    }
}

impl core::error::Error for RankOutOfRange {}
