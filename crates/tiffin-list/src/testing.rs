use std::hash::Hash;

use tiffin_core::{IndexPath, SectionedChangeset, Tree, View};

use crate::adapter::{Adapter, AdapterConfig};
use crate::focus::{FocusCoordinator, FocusDirection, FocusToolbar, ToolbarAction};
use crate::list_view::{ListView, SupplementaryKind};
use crate::memory::{ListOp, MemoryListView};

/// Headless harness pairing an [`Adapter`] with a [`MemoryListView`].
///
/// Renders go straight through the adapter, without the side table, so
/// tests can inspect both halves between renders.
pub struct ListTestRule<S, I> {
    view: MemoryListView,
    adapter: Adapter<S, I>,
    toolbar: FocusToolbar,
    skips_populated: bool,
}

impl<S, I> ListTestRule<S, I>
where
    S: Hash + Eq + Clone,
    I: Hash + Eq + Clone,
{
    /// A rule whose list view shows `visible_rows` rows at a time.
    pub fn new(visible_rows: usize) -> Self {
        Self::with_config(visible_rows, AdapterConfig::default())
    }

    pub fn with_config(visible_rows: usize, config: AdapterConfig) -> Self {
        Self {
            view: MemoryListView::new(visible_rows),
            adapter: Adapter::new(config),
            toolbar: FocusToolbar::new(),
            skips_populated: false,
        }
    }

    pub fn skipping_populated(mut self, skips_populated: bool) -> Self {
        self.skips_populated = skips_populated;
        self
    }

    /// Renders `tree` with animation and returns the operations it caused.
    pub fn render(&mut self, tree: Tree<S, I>) -> Vec<ListOp> {
        self.render_with(tree, true)
    }

    pub fn render_with(&mut self, tree: Tree<S, I>, animated: bool) -> Vec<ListOp> {
        let start = self.view.ops().len();
        self.adapter.render(&mut self.view, tree, animated);
        self.view.ops()[start..].to_vec()
    }

    /// Diff the adapter would apply for `tree`, without applying it.
    pub fn preview(&self, tree: &Tree<S, I>) -> SectionedChangeset {
        tiffin_core::diff_trees(
            self.adapter.sections(),
            tree.sections(),
            self.adapter.config().move_policy,
        )
    }

    pub fn view(&self) -> &MemoryListView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MemoryListView {
        &mut self.view
    }

    pub fn adapter(&self) -> &Adapter<S, I> {
        &self.adapter
    }

    /// Typed view of the visible row at `path`.
    pub fn item_view<V: View>(&self, path: IndexPath) -> Option<&V> {
        self.view.item_container(path)?.typed_view::<V>()
    }

    pub fn header_view<V: View>(&self, section: usize) -> Option<&V> {
        self.view
            .supplementary_container(SupplementaryKind::Header, section)?
            .typed_view::<V>()
    }

    /// How many times the visible row at `path` was bound.
    pub fn bind_count(&self, path: IndexPath) -> Option<usize> {
        self.view.item_container(path).map(|container| container.bind_count())
    }

    /// Scrolls so `row` is the first row on screen.
    pub fn scroll_to_row(&mut self, row: usize) {
        self.view.set_first_visible_row(row, &self.adapter);
    }

    pub fn coordinator(&mut self) -> FocusCoordinator<'_, S, I> {
        FocusCoordinator::new(&self.adapter, &mut self.view).skipping_populated(self.skips_populated)
    }

    pub fn can_move(&mut self, direction: FocusDirection) -> bool {
        self.coordinator().can_move(direction)
    }

    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        self.coordinator().move_focus(direction)
    }

    /// Focuses the visible row at `path` directly.
    pub fn focus(&mut self, path: IndexPath) -> bool {
        self.view.focus_item(path)
    }

    pub fn focused_path(&self) -> Option<IndexPath> {
        self.view.focused_path()
    }

    pub fn toolbar(&self) -> FocusToolbar {
        self.toolbar
    }

    /// Recomputes the toolbar. Returns whether its state changed.
    pub fn refresh_toolbar(&mut self) -> bool {
        let coordinator = FocusCoordinator::new(&self.adapter, &mut self.view)
            .skipping_populated(self.skips_populated);
        self.toolbar.refresh(&coordinator)
    }

    pub fn tap(&mut self, action: ToolbarAction) -> bool {
        let mut coordinator = FocusCoordinator::new(&self.adapter, &mut self.view)
            .skipping_populated(self.skips_populated);
        self.toolbar.handle(action, &mut coordinator)
    }
}
