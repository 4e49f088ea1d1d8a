//! The host list view as seen by the adapter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tiffin_core::{Container, EdgeInsets, IndexPath};

static NEXT_LIST_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a list view instance, used to key adapters in the side table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListViewId(u64);

impl ListViewId {
    pub fn next() -> Self {
        Self(NEXT_LIST_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list-view#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    Header,
    Footer,
}

/// What a list view asks of its data source while laying out rows.
///
/// Paths and section indices are always post-update: by the time a list view
/// calls back, the data source already describes the new tree.
pub trait DataSource {
    fn number_of_sections(&self) -> usize;

    fn number_of_items(&self, section: usize) -> usize;

    fn item_reuse_identifier(&self, path: IndexPath) -> Option<&str>;

    /// `None` when the section has no header of that kind.
    fn supplementary_reuse_identifier(&self, kind: SupplementaryKind, section: usize)
        -> Option<&str>;

    fn bind_item(&self, container: &mut Container, path: IndexPath);

    fn bind_supplementary(&self, container: &mut Container, kind: SupplementaryKind, section: usize);

    /// A container is about to appear. Its component is already bound.
    fn will_display(&self, container: &mut Container);

    /// A container left the screen. It still holds the component it showed,
    /// which may no longer be part of the tree.
    fn did_end_displaying(&self, container: &mut Container);
}

/// A native list of sections and rows with batched structural updates.
///
/// Between `begin_updates` and `end_updates`, deletions, reloads and move
/// sources address the layout before the batch; insertions and move
/// destinations address the layout after it. The list view resolves the
/// batch in `end_updates`, checking the result against `source`.
///
/// The adapter of a view lives in [`crate::registry`] under its [`ListViewId`].
/// Implementations must call [`crate::registry::release`] with their id when
/// dropped, or the adapter and its last tree stay in the table.
pub trait ListView {
    fn id(&self) -> ListViewId;

    fn begin_updates(&mut self);

    fn end_updates(&mut self, source: &dyn DataSource, animated: bool);

    fn insert_sections(&mut self, sections: &[usize]);

    fn delete_sections(&mut self, sections: &[usize]);

    fn move_section(&mut self, from: usize, to: usize);

    fn insert_items(&mut self, paths: &[IndexPath]);

    fn delete_items(&mut self, paths: &[IndexPath]);

    fn move_item(&mut self, from: IndexPath, to: IndexPath);

    /// Re-dequeues the rows at `paths` instead of rebinding in place.
    fn reload_items(&mut self, paths: &[IndexPath]);

    fn reload_supplementary(&mut self, kind: SupplementaryKind, section: usize);

    /// Drops every row and lays the list out from scratch.
    fn reload_data(&mut self, source: &dyn DataSource);

    fn visible_item_mut(&mut self, path: IndexPath) -> Option<&mut Container>;

    fn visible_supplementary_mut(
        &mut self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<&mut Container>;

    fn visible_containers_mut(&mut self) -> Vec<&mut Container>;

    fn visible_paths(&self) -> Vec<IndexPath>;

    fn scroll_to_item(&mut self, path: IndexPath, source: &dyn DataSource, animated: bool);

    /// Makes the visible row at `path` first responder. Returns whether it
    /// accepted.
    fn focus_item(&mut self, path: IndexPath) -> bool;

    fn focused_path(&self) -> Option<IndexPath>;

    fn resign_focus(&mut self);

    /// Width rows are laid out in.
    fn width(&self) -> f32;

    /// Margins rows inherit from the list.
    fn layout_margins(&self) -> EdgeInsets {
        EdgeInsets::ZERO
    }
}
