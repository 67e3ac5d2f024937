//! Order-statistic red-black trees for Rust.
//!
//! Every node of the tree records the size of its subtree, which turns "which element is
//! k-th?" and "where does this element rank?" into O(log n) walks. The crate offers three
//! collections over one arena-backed engine:
//!
//! - [`OrderStatisticTree`] - a multiset-style tree addressed through [`NodeId`]s, with
//!   [`select`](OrderStatisticTree::select), [`rank`](OrderStatisticTree::rank) and
//!   [`find_ith_successor`](OrderStatisticTree::find_ith_successor)
//! - [`OSRBTreeMap`] - a `BTreeMap`-like ordered map with [`get_by_rank`](OSRBTreeMap::get_by_rank),
//!   [`rank_of`](OSRBTreeMap::rank_of) and indexing by [`Rank`]
//! - [`OSRBTreeSet`] - the set counterpart of the map
//!
//! Ranks are **one-based** throughout: rank 1 is the smallest element.
//!
//! # Example
//!
//! ```
//! use rb_ostree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//!
//! // The median entry, second in key order.
//! let (name, score) = scores.get_by_rank(2).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//!
//! assert_eq!(scores.rank_of(&"Carol"), Some(3));
//! assert_eq!(scores[Rank(1)], 100);
//! ```
//!
//! The same machinery counts inversions in O(n log n):
//!
//! ```
//! assert_eq!(rb_ostree::count_inversions(&[2, 4, 5, 7, 2, 6, 3]), 8);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **No unsafe code** - Nodes live in an arena and link to each other by index
//! - **`dot`** - Renders an [`OrderStatisticTree`] as a Graphviz digraph
//!
//! # Logging
//!
//! Rebalancing emits [`tracing`](https://docs.rs/tracing) events at `TRACE` level naming
//! each fixup case taken. They compile to nothing unless a subscriber is installed.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(feature = "dot")]
mod dot;
mod error;
mod inversions;
mod order_statistic;
mod raw;

pub mod osrbtree_map;
pub mod osrbtree_set;
pub mod tree;

#[cfg(feature = "dot")]
pub use dot::Dot;
pub use error::RankOutOfRange;
pub use inversions::count_inversions;
pub use order_statistic::Rank;
pub use osrbtree_map::OSRBTreeMap;
pub use osrbtree_set::OSRBTreeSet;
pub use tree::{NodeId, OrderStatisticTree};
