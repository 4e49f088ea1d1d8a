//! Applies successive trees to a list view as minimal batched updates.

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use tiffin_core::{
    diff_trees, node_at, Accessory, AccessoryProviding, AnyRenderable, ComponentLifecycleAware,
    Container, CustomInputProviding, Deletable, EdgeInsets, FocusEligibility, Focusable,
    HeightCustomizing, IndexPath, MenuItem, MenuItemsResponding, MovePolicy, MutatedSection,
    Section, Selectable, Tree, ViewLifecycleAware,
};

use crate::error::ListError;
use crate::list_view::{DataSource, ListView, SupplementaryKind};
use crate::sizing::SizingCache;

#[derive(Clone, Debug, PartialEq)]
pub struct AdapterConfig {
    /// Animation used by focus scrolling and by renders that do not say.
    pub animated: bool,
    pub estimated_row_height: f32,
    pub estimated_header_height: f32,
    pub estimated_footer_height: f32,
    /// Keep one sizing template per reuse identifier instead of creating a
    /// container for every measurement.
    pub sizing_cache: bool,
    pub move_policy: MovePolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            animated: true,
            estimated_row_height: 44.0,
            estimated_header_height: 28.0,
            estimated_footer_height: 28.0,
            sizing_cache: true,
            move_policy: MovePolicy::Relative,
        }
    }
}

impl AdapterConfig {
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_estimated_row_height(mut self, height: f32) -> Self {
        self.estimated_row_height = height;
        self
    }

    pub fn with_estimated_header_height(mut self, height: f32) -> Self {
        self.estimated_header_height = height;
        self
    }

    pub fn with_estimated_footer_height(mut self, height: f32) -> Self {
        self.estimated_footer_height = height;
        self
    }

    pub fn with_sizing_cache(mut self, enabled: bool) -> Self {
        self.sizing_cache = enabled;
        self
    }

    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }
}

/// Owns the last tree applied to one list view and serves it as the view's
/// data source.
pub struct Adapter<S, I> {
    sections: Vec<Section<S, I>>,
    config: AdapterConfig,
    sizing: RefCell<SizingCache>,
    loaded: bool,
}

impl<S, I> Default for Adapter<S, I> {
    fn default() -> Self {
        Self::new(AdapterConfig::default())
    }
}

impl<S, I> Adapter<S, I> {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            sections: Vec::new(),
            sizing: RefCell::new(SizingCache::new(config.sizing_cache)),
            config,
            loaded: false,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The tree most recently applied.
    pub fn sections(&self) -> &[Section<S, I>] {
        &self.sections
    }

    pub fn section(&self, section: usize) -> Result<&Section<S, I>, ListError> {
        self.sections
            .get(section)
            .ok_or(ListError::MissingSection { section })
    }

    pub fn component_at(&self, path: IndexPath) -> Result<&AnyRenderable, ListError> {
        node_at(&self.sections, path)
            .map(|node| node.component())
            .ok_or(ListError::MissingItem { path })
    }

    pub fn supplementary_at(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Result<Option<&AnyRenderable>, ListError> {
        let section = self.section(section)?;
        Ok(match kind {
            SupplementaryKind::Header => section.header(),
            SupplementaryKind::Footer => section.footer(),
        })
    }

    fn capability_at<C: ?Sized + 'static>(&self, path: IndexPath) -> Option<Rc<C>> {
        self.component_at(path).ok()?.cast::<C>()
    }

    pub fn height_for_item(
        &self,
        path: IndexPath,
        width: f32,
        insets: EdgeInsets,
    ) -> Result<f32, ListError> {
        let component = self.component_at(path)?;
        Ok(self.height_of(component, width, insets, self.config.estimated_row_height))
    }

    pub fn estimated_height_for_item(
        &self,
        path: IndexPath,
        width: f32,
        insets: EdgeInsets,
    ) -> Result<f32, ListError> {
        let component = self.component_at(path)?;
        Ok(match component.cast::<dyn HeightCustomizing>() {
            Some(custom) => custom.estimated_height(width, insets),
            None => self.config.estimated_row_height,
        })
    }

    /// Height of a header or footer; zero when the section has none.
    pub fn height_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
        width: f32,
        insets: EdgeInsets,
    ) -> Result<f32, ListError> {
        let estimate = match kind {
            SupplementaryKind::Header => self.config.estimated_header_height,
            SupplementaryKind::Footer => self.config.estimated_footer_height,
        };
        Ok(self
            .supplementary_at(kind, section)?
            .map_or(0.0, |component| {
                self.height_of(component, width, insets, estimate)
            }))
    }

    fn height_of(
        &self,
        component: &AnyRenderable,
        width: f32,
        insets: EdgeInsets,
        estimate: f32,
    ) -> f32 {
        if let Some(custom) = component.cast::<dyn HeightCustomizing>() {
            return custom.height(width, insets);
        }
        self.sizing
            .borrow_mut()
            .measure(component, width, insets)
            .unwrap_or(estimate)
    }

    /// Number of sizing templates created so far.
    pub fn sizing_template_count(&self) -> usize {
        self.sizing.borrow().template_count()
    }

    pub fn can_delete_item(&self, path: IndexPath) -> bool {
        self.capability_at::<dyn Deletable>(path).is_some()
    }

    pub fn delete_action_text(&self, path: IndexPath) -> Option<String> {
        self.capability_at::<dyn Deletable>(path)
            .map(|deletable| deletable.delete_action_text())
    }

    pub fn deletable_at(&self, path: IndexPath) -> Result<Rc<dyn Deletable>, ListError> {
        self.component_at(path)?
            .cast::<dyn Deletable>()
            .ok_or(ListError::MissingCapability {
                path,
                capability: "Deletable",
            })
    }

    /// Runs the row's delete action. The caller is expected to render a tree
    /// without the row afterwards.
    pub fn commit_delete(&self, path: IndexPath) -> Result<(), ListError> {
        self.deletable_at(path)?.delete();
        Ok(())
    }

    pub fn menu_items(&self, path: IndexPath) -> Vec<MenuItem> {
        self.capability_at::<dyn MenuItemsResponding>(path)
            .map(|menu| menu.menu_items())
            .unwrap_or_default()
    }

    pub fn should_highlight_item(&self, path: IndexPath) -> bool {
        self.capability_at::<dyn Selectable>(path)
            .is_some_and(|selectable| selectable.should_highlight())
    }

    pub fn selectable_at(&self, path: IndexPath) -> Option<Rc<dyn Selectable>> {
        self.capability_at::<dyn Selectable>(path)
    }

    /// Returns whether the row handled the selection.
    pub fn did_select_item(&self, path: IndexPath) -> bool {
        match self.selectable_at(path) {
            Some(selectable) => {
                selectable.did_select();
                true
            }
            None => false,
        }
    }

    pub fn accessory_for_item(&self, path: IndexPath) -> Accessory {
        self.capability_at::<dyn AccessoryProviding>(path)
            .map(|provider| provider.accessory())
            .unwrap_or_default()
    }

    pub fn custom_input_for_item(&self, path: IndexPath) -> Option<AnyRenderable> {
        self.capability_at::<dyn CustomInputProviding>(path)
            .map(|provider| provider.custom_input())
    }

    pub fn focus_eligibility(&self, path: IndexPath) -> FocusEligibility {
        self.capability_at::<dyn Focusable>(path)
            .map_or(FocusEligibility::Ineligible, |focusable| {
                focusable.focus_eligibility()
            })
    }

    fn notify_focus_neighbors(view: &mut dyn ListView) {
        for container in view.visible_containers_mut() {
            if let Some(view) = container.view_mut() {
                view.neighboring_focus_eligibility_did_change();
            }
        }
    }
}

impl<S, I> Adapter<S, I>
where
    S: Hash + Eq + Clone,
    I: Hash + Eq + Clone,
{
    /// Makes `view` show `tree`.
    ///
    /// The first render loads the view wholesale. Later renders diff against
    /// the previous tree and apply the result in one batch: the new tree is
    /// installed before the batch begins, visible rows that changed in place
    /// are rebound where they sit, and everything else is left to the list
    /// view's own dequeuing.
    pub fn render(&mut self, view: &mut dyn ListView, tree: Tree<S, I>, animated: bool) {
        let next = tree.into_sections();
        if !self.loaded {
            log::debug!(
                "{}: initial load of {} sections",
                view.id(),
                next.len()
            );
            self.sections = next;
            self.loaded = true;
            view.reload_data(self);
            Self::notify_focus_neighbors(view);
            return;
        }

        let changeset = diff_trees(&self.sections, &next, self.config.move_policy);
        let previous = std::mem::replace(&mut self.sections, next);
        if changeset.is_empty() {
            log::trace!("{}: render without changes", view.id());
            return;
        }
        log::debug!(
            "{}: sections +{} -{} ~{} moved {}",
            view.id(),
            changeset.sections.inserts.len(),
            changeset.sections.removals.len(),
            changeset.mutation_index_pairs().len(),
            changeset.sections.moves.len()
        );

        view.begin_updates();
        for pair in changeset.mutation_index_pairs() {
            for kind in [SupplementaryKind::Header, SupplementaryKind::Footer] {
                self.refresh_supplementary(view, &previous, kind, pair.source, pair.destination);
            }
        }
        if !changeset.sections.inserts.is_empty() {
            view.insert_sections(&changeset.sections.inserts);
        }
        if !changeset.sections.removals.is_empty() {
            view.delete_sections(&changeset.sections.removals);
        }
        for section in &changeset.mutated_sections {
            self.apply_items(view, &previous, section);
        }
        for section_move in &changeset.sections.moves {
            log::trace!(
                "move section {} -> {}",
                section_move.source,
                section_move.destination
            );
            view.move_section(section_move.source, section_move.destination);
        }
        view.end_updates(self, animated);
        Self::notify_focus_neighbors(view);
    }

    fn refresh_supplementary(
        &self,
        view: &mut dyn ListView,
        previous: &[Section<S, I>],
        kind: SupplementaryKind,
        source: usize,
        destination: usize,
    ) {
        let pick = |section: &Section<S, I>| match kind {
            SupplementaryKind::Header => section.header().cloned(),
            SupplementaryKind::Footer => section.footer().cloned(),
        };
        let old = pick(&previous[source]);
        let new = pick(&self.sections[destination]);
        match (old, new) {
            (None, None) => {}
            (Some(old), Some(new)) if old == new => {}
            (Some(old), Some(new)) if old.reuse_identifier() == new.reuse_identifier() => {
                if let Some(container) = view.visible_supplementary_mut(kind, source) {
                    log::trace!("rebind {kind:?} of section {source} in place");
                    container.bind(&new);
                }
            }
            _ => {
                log::trace!("reload {kind:?} of section {source}");
                view.reload_supplementary(kind, source);
            }
        }
    }

    fn apply_items(
        &self,
        view: &mut dyn ListView,
        previous: &[Section<S, I>],
        section: &MutatedSection,
    ) {
        let changeset = &section.changeset;
        if changeset.is_empty() {
            return;
        }
        let old_items = previous[section.source].items();
        let new_items = self.sections[section.destination].items();
        let old_path = |item| IndexPath::new(section.source, item);
        let new_path = |item| IndexPath::new(section.destination, item);
        let reuse_changed = |source: usize, destination: usize| {
            old_items[source].component().reuse_identifier()
                != new_items[destination].component().reuse_identifier()
        };

        let mut deletes: Vec<IndexPath> = changeset.removals.iter().map(|&i| old_path(i)).collect();
        let mut inserts: Vec<IndexPath> = changeset.inserts.iter().map(|&i| new_path(i)).collect();
        let mut moves = Vec::new();
        let mut reloads = Vec::new();
        let mut rebinds = Vec::new();
        for item_move in &changeset.moves {
            if item_move.is_mutated && reuse_changed(item_move.source, item_move.destination) {
                deletes.push(old_path(item_move.source));
                inserts.push(new_path(item_move.destination));
                continue;
            }
            moves.push((old_path(item_move.source), new_path(item_move.destination)));
            if item_move.is_mutated {
                rebinds.push((item_move.source, item_move.destination));
            }
        }
        for pair in &changeset.mutations {
            if reuse_changed(pair.source, pair.destination) {
                reloads.push(old_path(pair.source));
            } else {
                rebinds.push((pair.source, pair.destination));
            }
        }

        log::trace!(
            "section {} -> {}: items +{} -{} moved {} rebound {} reloaded {}",
            section.source,
            section.destination,
            inserts.len(),
            deletes.len(),
            moves.len(),
            rebinds.len(),
            reloads.len()
        );
        if !deletes.is_empty() {
            view.delete_items(&deletes);
        }
        if !inserts.is_empty() {
            view.insert_items(&inserts);
        }
        for (from, to) in moves {
            view.move_item(from, to);
        }
        if !reloads.is_empty() {
            view.reload_items(&reloads);
        }
        for (source, destination) in rebinds {
            if let Some(container) = view.visible_item_mut(old_path(source)) {
                container.bind(new_items[destination].component());
            }
        }
    }
}

impl<S, I> DataSource for Adapter<S, I> {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Section::len)
    }

    fn item_reuse_identifier(&self, path: IndexPath) -> Option<&str> {
        self.component_at(path)
            .ok()
            .map(AnyRenderable::reuse_identifier)
    }

    fn supplementary_reuse_identifier(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<&str> {
        self.supplementary_at(kind, section)
            .ok()
            .flatten()
            .map(AnyRenderable::reuse_identifier)
    }

    fn bind_item(&self, container: &mut Container, path: IndexPath) {
        match self.component_at(path) {
            Ok(component) => container.bind(component),
            Err(err) => panic!("list view asked to bind a row the tree does not have: {err}"),
        }
    }

    fn bind_supplementary(&self, container: &mut Container, kind: SupplementaryKind, section: usize) {
        match self.supplementary_at(kind, section) {
            Ok(Some(component)) => container.bind(component),
            Ok(None) => panic!("section {section} has no {kind:?} to bind"),
            Err(err) => panic!("list view asked to bind a {kind:?} the tree does not have: {err}"),
        }
    }

    fn will_display(&self, container: &mut Container) {
        let Some(component) = container.component().cloned() else {
            return;
        };
        if let Some(lifecycle) = component.cast::<dyn ComponentLifecycleAware>() {
            lifecycle.will_display();
        }
        if let (Some(lifecycle), Some(view)) =
            (component.cast::<dyn ViewLifecycleAware>(), container.view_mut())
        {
            lifecycle.will_display(view);
        }
    }

    fn did_end_displaying(&self, container: &mut Container) {
        let Some(component) = container.component().cloned() else {
            return;
        };
        if let Some(lifecycle) = component.cast::<dyn ComponentLifecycleAware>() {
            lifecycle.did_end_displaying();
        }
        if let (Some(lifecycle), Some(view)) =
            (component.cast::<dyn ViewLifecycleAware>(), container.view_mut())
        {
            lifecycle.did_end_displaying(view);
        }
    }
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;
