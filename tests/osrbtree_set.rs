use std::collections::BTreeSet;

use proptest::prelude::*;
use rb_ostree::osrbtree_set;
use rb_ostree::{OSRBTreeSet, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -10_000i64..10_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    Take(i64),
    First,
    Last,
    PopFirst,
    PopLast,
    RankOf(i64),
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Take),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
        2 => value_strategy().prop_map(SetOp::RankOf),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OSRBTreeSet and BTreeSet and
    /// asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut os_set: OSRBTreeSet<i64> = OSRBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(os_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(os_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(os_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(os_set.take(v), bt_set.take(v), "take({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(os_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(os_set.last(), bt_set.last(), "last()");
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(os_set.pop_first(), bt_set.pop_first(), "pop_first()");
                }
                SetOp::PopLast => {
                    prop_assert_eq!(os_set.pop_last(), bt_set.pop_last(), "pop_last()");
                }
                SetOp::RankOf(v) => {
                    let expected = bt_set.contains(v).then(|| bt_set.range(..*v).count() + 1);
                    prop_assert_eq!(os_set.rank_of(v), expected, "rank_of({})", v);
                }
            }
            prop_assert_eq!(os_set.len(), bt_set.len(), "len mismatch after {:?}", op);
        }
    }

    /// Tests that iteration order matches BTreeSet in both directions.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert!(os_set.iter().eq(bt_set.iter()));
        prop_assert!(os_set.iter().rev().eq(bt_set.iter().rev()));
        prop_assert_eq!(os_set.iter().len(), bt_set.len());
        prop_assert!(os_set.into_iter().eq(bt_set.into_iter()));
    }

    /// Tests that alternating next/next_back yields every value exactly once.
    #[test]
    fn into_iter_interleaved_next_next_back(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let expected: Vec<i64> = BTreeSet::from_iter(values.iter().copied()).into_iter().collect();

        let mut iter = os_set.into_iter();
        let mut front = Vec::new();
        let mut back = Vec::new();
        loop {
            prop_assert_eq!(iter.len(), expected.len() - front.len() - back.len());
            match iter.next() {
                Some(v) => front.push(v),
                None => break,
            }
            match iter.next_back() {
                Some(v) => back.push(v),
                None => break,
            }
        }
        prop_assert_eq!(iter.next_back(), None);
        back.reverse();
        front.extend(back);
        prop_assert_eq!(front, expected);
    }

    #[test]
    fn retain_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();

        os_set.retain(|v| v % 2 == 0);
        bt_set.retain(|v| v % 2 == 0);
        prop_assert!(os_set.iter().eq(bt_set.iter()));
        for (index, v) in bt_set.iter().enumerate() {
            prop_assert_eq!(os_set.rank_of(v), Some(index + 1));
        }
    }

    #[test]
    fn get_matches_btreeset(
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        probes in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        for probe in &probes {
            prop_assert_eq!(os_set.get(probe), bt_set.get(probe), "get({})", probe);
        }
    }

    #[test]
    fn clear_empties_set(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let mut os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        os_set.clear();

        prop_assert!(os_set.is_empty());
        prop_assert_eq!(os_set.first(), None);
        prop_assert_eq!(os_set.get_by_rank(1), None);
        prop_assert!(os_set.insert(7));
        prop_assert_eq!(os_set.rank_of(&7), Some(1));
    }
}

// ─── Order-statistic operations (compared against Vec) ───────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Tests get_by_rank against a sorted Vec oracle.
    #[test]
    fn get_by_rank_matches_vec(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let sorted: Vec<i64> = BTreeSet::from_iter(values.iter().copied()).into_iter().collect();

        prop_assert_eq!(os_set.len(), sorted.len());
        for (index, expected) in sorted.iter().enumerate() {
            prop_assert_eq!(os_set.get_by_rank(index + 1), Some(expected), "get_by_rank({})", index + 1);
        }

        // Out of bounds
        prop_assert_eq!(os_set.get_by_rank(0), None);
        prop_assert_eq!(os_set.get_by_rank(sorted.len() + 1), None);
        prop_assert_eq!(os_set.get_by_rank(sorted.len() + 100), None);
    }

    /// Tests rank_of against a sorted Vec oracle.
    #[test]
    fn rank_of_matches_vec(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let sorted: Vec<i64> = BTreeSet::from_iter(values.iter().copied()).into_iter().collect();

        for (index, v) in sorted.iter().enumerate() {
            prop_assert_eq!(os_set.rank_of(v), Some(index + 1), "rank_of({})", v);
        }
        for probe in [i64::MIN, i64::MAX, 99_999, -99_999] {
            prop_assert_eq!(os_set.rank_of(&probe), None, "rank_of({}) should be None", probe);
        }
    }

    /// Tests Index<Rank>.
    #[test]
    fn index_by_rank_matches_vec(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let sorted: Vec<i64> = BTreeSet::from_iter(values.iter().copied()).into_iter().collect();

        for (index, expected) in sorted.iter().enumerate() {
            prop_assert_eq!(os_set[Rank(index + 1)], *expected, "Index[Rank({})]", index + 1);
        }
    }

    /// Tests that rank_of and get_by_rank invert each other.
    #[test]
    fn rank_of_get_by_rank_roundtrip(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();

        for rank in 1..=os_set.len() {
            let v = os_set.get_by_rank(rank).unwrap();
            prop_assert_eq!(os_set.rank_of(v), Some(rank), "roundtrip rank mismatch at rank {}", rank);
        }
    }

    /// Tests order-statistic operations after a mix of inserts and removes.
    #[test]
    fn order_stats_after_mutations(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut os_set: OSRBTreeSet<i64> = OSRBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    os_set.insert(*v);
                    bt_set.insert(*v);
                }
                SetOp::Remove(v) | SetOp::Take(v) => {
                    os_set.remove(v);
                    bt_set.remove(v);
                }
                _ => {}
            }
        }

        let sorted: Vec<i64> = bt_set.into_iter().collect();
        prop_assert_eq!(os_set.len(), sorted.len());

        // Spot-check ranks at various positions
        let positions = [0, 1, sorted.len() / 4, sorted.len() / 2, sorted.len() * 3 / 4, sorted.len().saturating_sub(1)];
        for &pos in &positions {
            if pos < sorted.len() {
                prop_assert_eq!(os_set.get_by_rank(pos + 1), Some(&sorted[pos]), "get_by_rank({})", pos + 1);
                prop_assert_eq!(os_set.rank_of(&sorted[pos]), Some(pos + 1), "rank_of at pos {}", pos);
            }
        }
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Tests Extend matches BTreeSet.
    #[test]
    fn extend_matches_btreeset(
        initial in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
        extra in proptest::collection::vec(value_strategy(), 0..TEST_SIZE / 2),
    ) {
        let mut os_set: OSRBTreeSet<i64> = initial.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = initial.iter().copied().collect();

        os_set.extend(extra.iter().copied());
        bt_set.extend(extra.iter().copied());
        prop_assert!(os_set.iter().eq(bt_set.iter()));

        // Extend from references
        os_set.extend(&initial);
        prop_assert_eq!(os_set.len(), bt_set.len());
    }

    #[test]
    fn clone_produces_equal_set(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let mut cloned = os_set.clone();

        prop_assert_eq!(&cloned, &os_set);
        cloned.insert(i64::MAX);
        prop_assert_ne!(&cloned, &os_set);
        prop_assert_eq!(cloned.len(), os_set.len() + 1);
    }

    #[test]
    fn ord_matches_btreeset(
        a in proptest::collection::vec(value_strategy(), 0..100),
        b in proptest::collection::vec(value_strategy(), 0..100),
    ) {
        let os_a: OSRBTreeSet<i64> = a.iter().copied().collect();
        let os_b: OSRBTreeSet<i64> = b.iter().copied().collect();
        let bt_a: BTreeSet<i64> = a.iter().copied().collect();
        let bt_b: BTreeSet<i64> = b.iter().copied().collect();

        prop_assert_eq!(os_a == os_b, bt_a == bt_b);
        prop_assert_eq!(os_a.cmp(&os_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(os_a.partial_cmp(&os_b), bt_a.partial_cmp(&bt_b));
    }

    /// Tests that equal sets hash identically regardless of insertion order.
    #[test]
    fn hash_consistent_for_equal_sets(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        use std::hash::{BuildHasher, RandomState};

        let forward: OSRBTreeSet<i64> = values.iter().copied().collect();
        let backward: OSRBTreeSet<i64> = values.iter().rev().copied().collect();
        let state = RandomState::new();

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(state.hash_one(&forward), state.hash_one(&backward));
    }
}

// ─── Panics ──────────────────────────────────────────────────────────────────

/// Tests that Index<Rank> panics past the last rank.
#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_rank_out_of_bounds_panics() {
    let set: OSRBTreeSet<i32> = [1, 2, 3].into_iter().collect();
    // Ranks run 1..=3
    let _ = set[Rank(4)];
}

/// Tests that Index<Rank> panics for rank zero.
#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_rank_zero_panics() {
    let set: OSRBTreeSet<i32> = [1, 2, 3].into_iter().collect();
    let _ = set[Rank(0)];
}

/// Tests that Index<Rank> panics on an empty set.
#[test]
#[should_panic(expected = "rank out of bounds")]
fn index_rank_empty_set_panics() {
    let set: OSRBTreeSet<i32> = OSRBTreeSet::new();
    let _ = set[Rank(1)];
}

// ─── Deterministic insertion pattern tests ───────────────────────────────────

/// Generates deterministic pseudo-random values with an LCG.
fn random_values_deterministic(n: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

mod insertion_pattern_tests {
    use super::*;

    const N: usize = 10_000;

    fn assert_matches(os_set: &OSRBTreeSet<i64>, bt_set: &BTreeSet<i64>) {
        assert_eq!(os_set.len(), bt_set.len());
        assert!(os_set.iter().eq(bt_set.iter()));
        assert_eq!(os_set.first(), bt_set.first());
        assert_eq!(os_set.last(), bt_set.last());
    }

    #[test]
    fn ordered_inserts_match_btreeset() {
        let os_set: OSRBTreeSet<i64> = (0..N as i64).collect();
        let bt_set: BTreeSet<i64> = (0..N as i64).collect();
        assert_matches(&os_set, &bt_set);
        assert_eq!(os_set.get_by_rank(N / 2), Some(&(N as i64 / 2 - 1)));
    }

    #[test]
    fn reverse_ordered_inserts_match_btreeset() {
        let os_set: OSRBTreeSet<i64> = (0..N as i64).rev().collect();
        let bt_set: BTreeSet<i64> = (0..N as i64).rev().collect();
        assert_matches(&os_set, &bt_set);
        assert_eq!(os_set.rank_of(&0), Some(1));
    }

    #[test]
    fn random_insert_then_random_remove() {
        let values = random_values_deterministic(N);
        let mut os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();
        assert_matches(&os_set, &bt_set);

        for v in values.iter().rev().step_by(2) {
            assert_eq!(os_set.remove(v), bt_set.remove(v), "remove({v})");
        }
        assert_matches(&os_set, &bt_set);
        for (index, v) in bt_set.iter().enumerate() {
            assert_eq!(os_set.rank_of(v), Some(index + 1));
        }
    }

    #[test]
    fn ordered_insert_then_ordered_remove() {
        let mut os_set: OSRBTreeSet<i64> = (0..N as i64).collect();
        for i in 0..N as i64 {
            assert_eq!(os_set.rank_of(&i), Some(1));
            assert!(os_set.remove(&i));
        }
        assert!(os_set.is_empty());
    }
}

#[test]
fn default_iterators_are_empty() {
    let mut iter = osrbtree_set::IntoIter::<i32>::default();
    assert_eq!(iter.next(), None);
    assert_eq!(iter.len(), 0);
}

#[test]
fn from_array_and_debug() {
    let set = OSRBTreeSet::from([3, 1, 2, 3]);
    assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    assert_eq!(set.get_by_rank(3), Some(&3));
}
