//! Keyed sequence diff.

use std::hash::Hash;

use crate::changeset::{Changeset, IndexPair, Move};
use crate::collections::map::{HashMap, HashSet};
use crate::lis::longest_increasing_subsequence;

/// Decides which paired elements count as moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MovePolicy {
    /// A paired element stays put when its rank among the paired elements is
    /// the same in both sequences. Index shifts caused only by inserts and
    /// removals are not moves. Linear time.
    #[default]
    Relative,
    /// The elements that stay put form a longest increasing subsequence of
    /// source indices, so the number of moves is as small as possible.
    /// O(n log n).
    Minimal,
}

/// Diffs `previous` against `current` using [`MovePolicy::Relative`].
///
/// Elements are paired by `identity`, which must be unique within each
/// sequence; a duplicate panics. `is_equal` only decides whether a paired
/// element changed content.
pub fn diff<T, K>(
    previous: &[T],
    current: &[T],
    identity: impl Fn(&T) -> K,
    is_equal: impl Fn(&T, &T) -> bool,
) -> Changeset
where
    K: Hash + Eq,
{
    diff_with(previous, current, identity, is_equal, MovePolicy::default())
}

/// Diffs `previous` against `current` with an explicit [`MovePolicy`].
pub fn diff_with<T, K>(
    previous: &[T],
    current: &[T],
    identity: impl Fn(&T) -> K,
    is_equal: impl Fn(&T, &T) -> bool,
    policy: MovePolicy,
) -> Changeset
where
    K: Hash + Eq,
{
    diff_paired(previous, current, identity, is_equal, policy).0
}

/// Same as [`diff_with`] but also returns every pairing, stationary or not,
/// in destination order.
pub(crate) fn diff_paired<T, K>(
    previous: &[T],
    current: &[T],
    identity: impl Fn(&T) -> K,
    is_equal: impl Fn(&T, &T) -> bool,
    policy: MovePolicy,
) -> (Changeset, Vec<IndexPair>)
where
    K: Hash + Eq,
{
    let mut changeset = Changeset::new();
    if previous.is_empty() && current.is_empty() {
        return (changeset, Vec::new());
    }

    let mut previous_index: HashMap<K, usize> =
        HashMap::with_capacity_and_hasher(previous.len(), Default::default());
    for (index, element) in previous.iter().enumerate() {
        if previous_index.insert(identity(element), index).is_some() {
            panic!("duplicate identity in previous sequence at index {index}");
        }
    }

    let mut seen: HashSet<K> = HashSet::with_capacity_and_hasher(current.len(), Default::default());
    let mut paired_sources = vec![false; previous.len()];
    let mut pairs: Vec<IndexPair> = Vec::with_capacity(current.len().min(previous.len()));
    for (destination, element) in current.iter().enumerate() {
        let key = identity(element);
        match previous_index.get(&key) {
            Some(&source) => {
                paired_sources[source] = true;
                pairs.push(IndexPair::new(source, destination));
            }
            None => changeset.inserts.push(destination),
        }
        if !seen.insert(key) {
            panic!("duplicate identity in current sequence at index {destination}");
        }
    }

    changeset.removals = paired_sources
        .iter()
        .enumerate()
        .filter(|(_, paired)| !**paired)
        .map(|(source, _)| source)
        .collect();

    let stationary = stationary_pairs(&pairs, &paired_sources, policy);
    for (pair, stays) in pairs.iter().zip(stationary) {
        let unchanged = is_equal(&previous[pair.source], &current[pair.destination]);
        if stays {
            if !unchanged {
                changeset.mutations.push(*pair);
            }
        } else {
            changeset.moves.push(Move {
                source: pair.source,
                destination: pair.destination,
                is_mutated: !unchanged,
            });
        }
    }

    (changeset, pairs)
}

/// Flags, for each pair in destination order, whether the element stays put.
fn stationary_pairs(pairs: &[IndexPair], paired_sources: &[bool], policy: MovePolicy) -> Vec<bool> {
    match policy {
        MovePolicy::Relative => {
            let mut source_rank = vec![0usize; paired_sources.len()];
            let mut rank = 0;
            for (source, paired) in paired_sources.iter().enumerate() {
                if *paired {
                    source_rank[source] = rank;
                    rank += 1;
                }
            }
            pairs
                .iter()
                .enumerate()
                .map(|(destination_rank, pair)| source_rank[pair.source] == destination_rank)
                .collect()
        }
        MovePolicy::Minimal => {
            let sources: Vec<usize> = pairs.iter().map(|pair| pair.source).collect();
            let mut stationary = vec![false; pairs.len()];
            for position in longest_increasing_subsequence(&sources) {
                stationary[position] = true;
            }
            stationary
        }
    }
}

#[cfg(test)]
#[path = "tests/keyed_tests.rs"]
mod tests;
