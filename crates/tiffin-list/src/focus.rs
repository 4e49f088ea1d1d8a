//! Keyboard focus traversal across the rows of a form.

use tiffin_core::{paths, FocusEligibility, Focusable, IndexPath, Section};

use crate::adapter::Adapter;
use crate::list_view::ListView;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Forward,
    Backward,
}

fn eligibility<S, I>(sections: &[Section<S, I>], path: IndexPath) -> FocusEligibility {
    tiffin_core::node_at(sections, path)
        .and_then(|node| node.component().cast::<dyn Focusable>())
        .map_or(FocusEligibility::Ineligible, |focusable| {
            focusable.focus_eligibility()
        })
}

/// Nearest row strictly after (or before) `from` that can take focus.
/// Without `from` the search starts at the first (or last) row. Sections
/// are crossed as if the rows formed one sequence.
pub fn find_focus_target<S, I>(
    sections: &[Section<S, I>],
    from: Option<IndexPath>,
    direction: FocusDirection,
    skips_populated: bool,
) -> Option<IndexPath> {
    let eligible =
        |path: &IndexPath| eligibility(sections, *path).is_eligible(skips_populated);
    match direction {
        FocusDirection::Forward => paths(sections)
            .filter(|path| from.is_none_or(|from| *path > from))
            .find(eligible),
        FocusDirection::Backward => paths(sections)
            .filter(|path| from.is_none_or(|from| *path < from))
            .filter(eligible)
            .last(),
    }
}

/// Moves focus between the rows of one list view.
pub struct FocusCoordinator<'a, S, I> {
    adapter: &'a Adapter<S, I>,
    view: &'a mut dyn ListView,
    skips_populated: bool,
}

impl<'a, S, I> FocusCoordinator<'a, S, I> {
    pub fn new(adapter: &'a Adapter<S, I>, view: &'a mut dyn ListView) -> Self {
        Self {
            adapter,
            view,
            skips_populated: false,
        }
    }

    /// Skip rows that already hold a value.
    pub fn skipping_populated(mut self, skips_populated: bool) -> Self {
        self.skips_populated = skips_populated;
        self
    }

    pub fn target(&self, direction: FocusDirection) -> Option<IndexPath> {
        self.target_from(self.view.focused_path(), direction)
    }

    pub fn target_from(
        &self,
        from: Option<IndexPath>,
        direction: FocusDirection,
    ) -> Option<IndexPath> {
        find_focus_target(self.adapter.sections(), from, direction, self.skips_populated)
    }

    pub fn can_move(&self, direction: FocusDirection) -> bool {
        self.target(direction).is_some()
    }

    /// Focuses the next eligible row from the focused one. Returns false
    /// when there is none or it refused focus; the caller then typically
    /// resigns focus altogether.
    pub fn move_focus(&mut self, direction: FocusDirection) -> bool {
        let from = self.view.focused_path();
        self.move_focus_from(from, direction)
    }

    pub fn move_focus_from(&mut self, from: Option<IndexPath>, direction: FocusDirection) -> bool {
        let Some(target) = self.target_from(from, direction) else {
            log::debug!("{}: no focus target {direction:?} of {from:?}", self.view.id());
            return false;
        };
        if !self.view.visible_paths().contains(&target) {
            let animated = self.adapter.config().animated;
            self.view.scroll_to_item(target, self.adapter, animated);
        }
        let focused = self.view.focus_item(target);
        if focused {
            log::debug!("{}: focus moved {direction:?} to {target}", self.view.id());
        } else {
            log::warn!("{}: row {target} refused focus", self.view.id());
        }
        focused
    }

    pub fn resign(&mut self) {
        self.view.resign_focus();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Backward,
    Forward,
    Done,
}

/// Enablement state of a previous / next / done input toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusToolbar {
    can_go_backward: bool,
    can_go_forward: bool,
}

impl FocusToolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_go_backward(&self) -> bool {
        self.can_go_backward
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    /// Recomputes enablement. Returns whether anything changed.
    pub fn refresh<S, I>(&mut self, coordinator: &FocusCoordinator<'_, S, I>) -> bool {
        let next = FocusToolbar {
            can_go_backward: coordinator.can_move(FocusDirection::Backward),
            can_go_forward: coordinator.can_move(FocusDirection::Forward),
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Performs `action`. Returns whether focus moved; `Done` and failed
    /// moves resign focus.
    pub fn handle<S, I>(
        &mut self,
        action: ToolbarAction,
        coordinator: &mut FocusCoordinator<'_, S, I>,
    ) -> bool {
        let moved = match action {
            ToolbarAction::Backward => coordinator.move_focus(FocusDirection::Backward),
            ToolbarAction::Forward => coordinator.move_focus(FocusDirection::Forward),
            ToolbarAction::Done => false,
        };
        if !moved {
            coordinator.resign();
        }
        self.refresh(coordinator);
        moved
    }
}

#[cfg(test)]
#[path = "tests/focus_tests.rs"]
mod tests;
