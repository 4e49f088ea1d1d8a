//! Two-level diff over sections and their items.

use std::hash::Hash;

use crate::changeset::{Changeset, IndexPair};
use crate::keyed::{diff_paired, MovePolicy};

/// Item-level changes of a section present in both trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutatedSection {
    /// Index of the section in the previous tree.
    pub source: usize,
    /// Index of the section in the current tree.
    pub destination: usize,
    pub changeset: Changeset,
}

/// Result of [`diff_sections`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedChangeset {
    /// Section-level changes, judged on section metadata only.
    pub sections: Changeset,
    /// One entry per surviving section, in destination order, whether or not
    /// its items changed.
    pub mutated_sections: Vec<MutatedSection>,
}

impl SectionedChangeset {
    /// Sections whose metadata (header, footer) changed, moved or not.
    pub fn mutation_index_pairs(&self) -> Vec<IndexPair> {
        let mut pairs: Vec<IndexPair> = self.sections.rebind_pairs().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Returns true when nothing changed at either level.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
            && self
                .mutated_sections
                .iter()
                .all(|section| section.changeset.is_empty())
    }

    /// Item changeset for the section that sits at `destination` after the
    /// diff, if that section existed before.
    pub fn items_at_destination(&self, destination: usize) -> Option<&MutatedSection> {
        self.mutated_sections
            .binary_search_by_key(&destination, |section| section.destination)
            .ok()
            .map(|index| &self.mutated_sections[index])
    }
}

/// Diffs two sectioned sequences with [`MovePolicy::Relative`] at both levels.
///
/// Sections are paired by `section_id` and classified with
/// `sections_metadata_equal`, which must ignore items. Every section present
/// in both sequences then gets an item-level diff through `items`, `item_id`
/// and `items_equal`.
pub fn diff_sections<S, I, SK, IK, FS, FM, FI, FK, FE>(
    previous: &[S],
    current: &[S],
    section_id: FS,
    sections_metadata_equal: FM,
    items: FI,
    item_id: FK,
    items_equal: FE,
) -> SectionedChangeset
where
    SK: Hash + Eq,
    IK: Hash + Eq,
    FS: Fn(&S) -> SK,
    FM: Fn(&S, &S) -> bool,
    FI: for<'a> Fn(&'a S) -> &'a [I],
    FK: Fn(&I) -> IK,
    FE: Fn(&I, &I) -> bool,
{
    diff_sections_with(
        previous,
        current,
        section_id,
        sections_metadata_equal,
        items,
        item_id,
        items_equal,
        MovePolicy::default(),
    )
}

/// [`diff_sections`] with an explicit [`MovePolicy`], applied at both levels.
#[allow(clippy::too_many_arguments)]
pub fn diff_sections_with<S, I, SK, IK, FS, FM, FI, FK, FE>(
    previous: &[S],
    current: &[S],
    section_id: FS,
    sections_metadata_equal: FM,
    items: FI,
    item_id: FK,
    items_equal: FE,
    policy: MovePolicy,
) -> SectionedChangeset
where
    SK: Hash + Eq,
    IK: Hash + Eq,
    FS: Fn(&S) -> SK,
    FM: Fn(&S, &S) -> bool,
    FI: for<'a> Fn(&'a S) -> &'a [I],
    FK: Fn(&I) -> IK,
    FE: Fn(&I, &I) -> bool,
{
    let (sections, pairs) = diff_paired(
        previous,
        current,
        &section_id,
        &sections_metadata_equal,
        policy,
    );

    let mutated_sections = pairs
        .into_iter()
        .map(|pair| {
            let (changeset, _) = diff_paired(
                items(&previous[pair.source]),
                items(&current[pair.destination]),
                &item_id,
                &items_equal,
                policy,
            );
            MutatedSection {
                source: pair.source,
                destination: pair.destination,
                changeset,
            }
        })
        .collect();

    SectionedChangeset {
        sections,
        mutated_sections,
    }
}

#[cfg(test)]
#[path = "tests/sectioned_tests.rs"]
mod tests;
