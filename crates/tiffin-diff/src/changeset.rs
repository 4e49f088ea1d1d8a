//! Changesets produced by the diff engines.

use std::fmt;

/// A paired element's position before and after the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPair {
    pub source: usize,
    pub destination: usize,
}

impl IndexPair {
    #[inline]
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// A paired element that changed position.
///
/// `is_mutated` is set when the element's content changed as well, in which
/// case the consumer has to both move and rebind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: usize,
    pub destination: usize,
    pub is_mutated: bool,
}

impl Move {
    pub fn pair(&self) -> IndexPair {
        IndexPair::new(self.source, self.destination)
    }
}

/// Result of comparing two keyed sequences.
///
/// Indices follow batch-update conventions: `removals` and move sources refer
/// to the previous sequence, `inserts` and move destinations to the current
/// one. Every list is sorted: removals and inserts ascending, moves by
/// destination, mutations by source.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    pub inserts: Vec<usize>,
    pub removals: Vec<usize>,
    pub moves: Vec<Move>,
    /// Paired elements that kept their position but whose content changed.
    pub mutations: Vec<IndexPair>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the two sequences were identical in identity, order
    /// and content.
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.removals.is_empty()
            && self.moves.is_empty()
            && self.mutations.is_empty()
    }

    /// Returns true when the changeset inserts, removes or moves anything.
    pub fn has_structural_changes(&self) -> bool {
        !self.inserts.is_empty() || !self.removals.is_empty() || !self.moves.is_empty()
    }

    /// Every element whose content changed, moved or not.
    pub fn rebind_pairs(&self) -> impl Iterator<Item = IndexPair> + '_ {
        self.mutations.iter().copied().chain(
            self.moves
                .iter()
                .filter(|movement| movement.is_mutated)
                .map(Move::pair),
        )
    }

    /// Number of elements whose content changed.
    pub fn mutated_count(&self) -> usize {
        self.mutations.len() + self.moves.iter().filter(|m| m.is_mutated).count()
    }

    /// Replays the changeset against `previous` with batch-update semantics.
    ///
    /// Removed elements are dropped, moved elements land at their
    /// destinations, `inserted` produces the element for every insert index,
    /// and the remaining elements fill the free slots in their original order.
    /// Panics if the changeset was not computed against `previous`.
    pub fn apply<T>(&self, previous: Vec<T>, mut inserted: impl FnMut(usize) -> T) -> Vec<T> {
        let previous_len = previous.len();
        assert!(
            self.removals.len() <= previous_len,
            "changeset removes {} elements from a sequence of {}",
            self.removals.len(),
            previous_len
        );
        let mut taken = vec![false; previous_len];
        for &removal in &self.removals {
            taken[removal] = true;
        }
        for movement in &self.moves {
            taken[movement.source] = true;
        }

        let len = previous_len - self.removals.len() + self.inserts.len();
        let mut slots: Vec<Option<T>> = (0..len).map(|_| None).collect();
        let mut previous: Vec<Option<T>> = previous.into_iter().map(Some).collect();
        for movement in &self.moves {
            slots[movement.destination] = previous[movement.source].take();
        }
        for &insert in &self.inserts {
            slots[insert] = Some(inserted(insert));
        }

        let mut remaining = previous
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !taken[*index])
            .filter_map(|(_, element)| element);
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            *slot = remaining.next();
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| panic!("changeset leaves destination slot {index} empty"))
            })
            .collect()
    }
}

impl fmt::Debug for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Changeset")
            .field("inserts", &self.inserts)
            .field("removals", &self.removals)
            .field("moves", &self.moves)
            .field("mutations", &self.mutations)
            .finish()
    }
}
