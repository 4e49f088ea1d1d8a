//! Keyed sequence diffing for Tiffin.
//!
//! The engine compares two ordered sequences whose elements carry a unique
//! identity and reports what a list view has to do to turn the first into the
//! second: removals, inserts, moves and in-place mutations. The sectioned
//! variant runs the same comparison on two levels, sections first and then the
//! items of every section that survived.
//!
//! Nothing in this crate knows about views; the reconciler in `tiffin-list`
//! translates a [`SectionedChangeset`] into batch updates.

pub mod changeset;
pub mod collections;
mod keyed;
mod lis;
mod sectioned;

pub use changeset::{Changeset, IndexPair, Move};
pub use keyed::{diff, diff_with, MovePolicy};
pub use sectioned::{diff_sections, diff_sections_with, MutatedSection, SectionedChangeset};
