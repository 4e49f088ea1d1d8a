//! Headless list view for tests, demos and server-side rendering.
//!
//! Rows are laid out as one flattened run per section (header, items,
//! footer). A fixed-size window of rows counts as on screen; rows inside it
//! hold a bound container, rows outside it hold nothing.

use std::fmt;

use tiffin_core::{Container, EdgeInsets, IndexPath};

use crate::list_view::{DataSource, ListView, ListViewId, SupplementaryKind};
use crate::reuse_pool::{MemoryReusePool, ReusePool};

/// Calls a [`MemoryListView`] received, for assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListOp {
    ReloadData,
    BeginUpdates,
    EndUpdates { animated: bool },
    InsertSections(Vec<usize>),
    DeleteSections(Vec<usize>),
    MoveSection { from: usize, to: usize },
    InsertItems(Vec<IndexPath>),
    DeleteItems(Vec<IndexPath>),
    MoveItem { from: IndexPath, to: IndexPath },
    ReloadItems(Vec<IndexPath>),
    ReloadSupplementary { kind: SupplementaryKind, section: usize },
    ScrollToItem { path: IndexPath, animated: bool },
    Focus(IndexPath),
    ResignFocus,
}

impl ListOp {
    /// Whether the call changes the row structure.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ListOp::ReloadData
                | ListOp::InsertSections(_)
                | ListOp::DeleteSections(_)
                | ListOp::MoveSection { .. }
                | ListOp::InsertItems(_)
                | ListOp::DeleteItems(_)
                | ListOp::MoveItem { .. }
                | ListOp::ReloadItems(_)
                | ListOp::ReloadSupplementary { .. }
        )
    }
}

#[derive(Debug, Default)]
struct SectionSlots {
    header: Option<Container>,
    footer: Option<Container>,
    items: Vec<Option<Container>>,
}

impl SectionSlots {
    fn empty(item_count: usize) -> Self {
        Self {
            header: None,
            footer: None,
            items: (0..item_count).map(|_| None).collect(),
        }
    }

    fn supplementary_mut(&mut self, kind: SupplementaryKind) -> &mut Option<Container> {
        match kind {
            SupplementaryKind::Header => &mut self.header,
            SupplementaryKind::Footer => &mut self.footer,
        }
    }

    fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.header
            .iter_mut()
            .chain(self.items.iter_mut().flatten())
            .chain(self.footer.iter_mut())
    }
}

#[derive(Debug, Default)]
struct Batch {
    inserted_sections: Vec<usize>,
    deleted_sections: Vec<usize>,
    moved_sections: Vec<(usize, usize)>,
    inserted_items: Vec<IndexPath>,
    deleted_items: Vec<IndexPath>,
    moved_items: Vec<(IndexPath, IndexPath)>,
    reloaded_items: Vec<IndexPath>,
    reloaded_supplementaries: Vec<(SupplementaryKind, usize)>,
}

#[derive(Clone, Copy)]
enum Incoming {
    Inserted,
    Existing(usize),
}

pub struct MemoryListView {
    id: ListViewId,
    width: f32,
    layout_margins: EdgeInsets,
    first_row: usize,
    visible_rows: usize,
    sections: Vec<SectionSlots>,
    pool: MemoryReusePool,
    batch: Option<Batch>,
    ops: Vec<ListOp>,
}

impl MemoryListView {
    /// A list view showing `visible_rows` rows at a time.
    pub fn new(visible_rows: usize) -> Self {
        Self {
            id: ListViewId::next(),
            width: 320.0,
            layout_margins: EdgeInsets::symmetric(16.0, 0.0),
            first_row: 0,
            visible_rows,
            sections: Vec::new(),
            pool: MemoryReusePool::new(),
            batch: None,
            ops: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_layout_margins(mut self, margins: EdgeInsets) -> Self {
        self.layout_margins = margins;
        self
    }

    pub fn ops(&self) -> &[ListOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<ListOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn structural_op_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_structural()).count()
    }

    pub fn pool(&self) -> &MemoryReusePool {
        &self.pool
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |slots| slots.items.len())
    }

    pub fn first_visible_row(&self) -> usize {
        self.first_row
    }

    /// Scrolls so `row` is the first one on screen.
    pub fn set_first_visible_row(&mut self, row: usize, source: &dyn DataSource) {
        self.first_row = row;
        self.layout(source);
    }

    pub fn item_container(&self, path: IndexPath) -> Option<&Container> {
        self.sections.get(path.section)?.items.get(path.item)?.as_ref()
    }

    pub fn supplementary_container(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<&Container> {
        let slots = self.sections.get(section)?;
        match kind {
            SupplementaryKind::Header => slots.header.as_ref(),
            SupplementaryKind::Footer => slots.footer.as_ref(),
        }
    }

    fn batch_mut(&mut self) -> &mut Batch {
        match self.batch.as_mut() {
            Some(batch) => batch,
            None => panic!("{}: structural update outside begin_updates/end_updates", self.id),
        }
    }

    fn record(&mut self, op: ListOp) {
        log::trace!("{}: {op:?}", self.id);
        self.ops.push(op);
    }

    /// Binds rows entering the window and releases rows leaving it.
    fn layout(&mut self, source: &dyn DataSource) {
        let window = self.first_row..self.first_row + self.visible_rows;
        let pool = &mut self.pool;
        let mut row = 0;
        for (section, slots) in self.sections.iter_mut().enumerate() {
            let header = source.supplementary_reuse_identifier(SupplementaryKind::Header, section);
            place(
                &mut slots.header,
                header,
                window.contains(&row),
                pool,
                source,
                |container| source.bind_supplementary(container, SupplementaryKind::Header, section),
            );
            row += usize::from(header.is_some());

            for (item, slot) in slots.items.iter_mut().enumerate() {
                let path = IndexPath::new(section, item);
                place(
                    slot,
                    source.item_reuse_identifier(path),
                    window.contains(&row),
                    pool,
                    source,
                    |container| source.bind_item(container, path),
                );
                row += 1;
            }

            let footer = source.supplementary_reuse_identifier(SupplementaryKind::Footer, section);
            place(
                &mut slots.footer,
                footer,
                window.contains(&row),
                pool,
                source,
                |container| source.bind_supplementary(container, SupplementaryKind::Footer, section),
            );
            row += usize::from(footer.is_some());
        }
    }

    /// Flattened row of the item at `path`.
    fn row_of(&self, path: IndexPath, source: &dyn DataSource) -> usize {
        let supplementaries = |section| {
            [SupplementaryKind::Header, SupplementaryKind::Footer]
                .into_iter()
                .filter(|&kind| source.supplementary_reuse_identifier(kind, section).is_some())
                .count()
        };
        let before: usize = (0..path.section.min(self.sections.len()))
            .map(|section| self.item_count(section) + supplementaries(section))
            .sum();
        let header = usize::from(
            source
                .supplementary_reuse_identifier(SupplementaryKind::Header, path.section)
                .is_some(),
        );
        before + header + path.item
    }

    fn resolve(&mut self, batch: Batch, source: &dyn DataSource) {
        let mut old = std::mem::take(&mut self.sections);
        let old_count = old.len();
        let new_count = source.number_of_sections();

        let mut section_leaves = vec![false; old_count];
        let mut incoming: Vec<Option<Incoming>> = vec![None; new_count];
        for &section in &batch.deleted_sections {
            check_index("deleted section", section, old_count);
            section_leaves[section] = true;
            evict_section(&mut old[section], &mut self.pool, source);
        }
        for &section in &batch.inserted_sections {
            check_index("inserted section", section, new_count);
            claim(&mut incoming[section], Incoming::Inserted, section);
        }
        for &(from, to) in &batch.moved_sections {
            check_index("moved section", from, old_count);
            check_index("section move destination", to, new_count);
            section_leaves[from] = true;
            claim(&mut incoming[to], Incoming::Existing(from), to);
        }
        let expected = old_count - batch.deleted_sections.len() + batch.inserted_sections.len();
        if expected != new_count {
            panic!(
                "{}: invalid batch update: {new_count} sections after the update, expected {expected}",
                self.id
            );
        }
        let mut staying = (0..old_count).filter(|&section| !section_leaves[section]);
        for slot in incoming.iter_mut().filter(|slot| slot.is_none()) {
            *slot = staying.next().map(Incoming::Existing);
        }

        for path in &batch.reloaded_items {
            let slot = old
                .get_mut(path.section)
                .and_then(|slots| slots.items.get_mut(path.item))
                .unwrap_or_else(|| panic!("reloaded item {path} out of bounds"));
            evict(slot, &mut self.pool, source);
        }
        for &(kind, section) in &batch.reloaded_supplementaries {
            check_index("reloaded section", section, old_count);
            evict(old[section].supplementary_mut(kind), &mut self.pool, source);
        }

        let mut item_leaves: Vec<Vec<bool>> = old
            .iter()
            .map(|slots| vec![false; slots.items.len()])
            .collect();
        for path in &batch.deleted_items {
            let slot = old
                .get_mut(path.section)
                .and_then(|slots| slots.items.get_mut(path.item))
                .unwrap_or_else(|| panic!("deleted item {path} out of bounds"));
            evict(slot, &mut self.pool, source);
            item_leaves[path.section][path.item] = true;
        }
        for path in &batch.inserted_items {
            check_index("section of inserted item", path.section, new_count);
        }
        let mut arrivals: Vec<(IndexPath, Option<Container>)> = Vec::new();
        for &(from, to) in &batch.moved_items {
            check_index("section of item move destination", to.section, new_count);
            let slot = old
                .get_mut(from.section)
                .and_then(|slots| slots.items.get_mut(from.item))
                .unwrap_or_else(|| panic!("moved item {from} out of bounds"));
            arrivals.push((to, slot.take()));
            item_leaves[from.section][from.item] = true;
        }

        let mut old: Vec<Option<SectionSlots>> = old.into_iter().map(Some).collect();
        let mut sections = Vec::with_capacity(new_count);
        for (section, incoming) in incoming.into_iter().enumerate() {
            let count = source.number_of_items(section);
            let mut items: Vec<Option<Option<Container>>> = (0..count).map(|_| None).collect();
            let mut fixed = 0;
            for path in batch.inserted_items.iter().filter(|path| path.section == section) {
                check_index("inserted item", path.item, count);
                claim(&mut items[path.item], None, *path);
                fixed += 1;
            }
            for (to, container) in arrivals.iter_mut().filter(|(to, _)| to.section == section) {
                check_index("item move destination", to.item, count);
                claim(&mut items[to.item], container.take(), *to);
                fixed += 1;
            }

            let mut slots = SectionSlots::default();
            match incoming {
                Some(Incoming::Existing(previous)) => {
                    let Some(previous_slots) = old[previous].take() else {
                        panic!("section {previous} placed twice");
                    };
                    slots.header = previous_slots.header;
                    slots.footer = previous_slots.footer;
                    let survivors: Vec<Option<Container>> = previous_slots
                        .items
                        .into_iter()
                        .zip(&item_leaves[previous])
                        .filter(|(_, leaves)| !**leaves)
                        .map(|(slot, _)| slot)
                        .collect();
                    let expected = survivors.len() + fixed;
                    if expected != count {
                        panic!(
                            "{}: invalid batch update: section {section} has {count} items after the update, expected {expected}",
                            self.id
                        );
                    }
                    let mut survivors = survivors.into_iter();
                    for slot in items.iter_mut().filter(|slot| slot.is_none()) {
                        *slot = survivors.next();
                    }
                }
                Some(Incoming::Inserted) => {}
                None => panic!("{}: no section placed at {section}", self.id),
            }
            slots.items = items.into_iter().map(Option::flatten).collect();
            sections.push(slots);
        }
        self.sections = sections;
        self.layout(source);
    }
}

fn check_index(what: &str, index: usize, bound: usize) {
    if index >= bound {
        panic!("{what} {index} out of bounds ({bound})");
    }
}

fn claim<T, P: fmt::Display>(slot: &mut Option<T>, value: T, position: P) {
    if slot.is_some() {
        panic!("two updates target {position}");
    }
    *slot = Some(value);
}

fn place(
    slot: &mut Option<Container>,
    reuse_identifier: Option<&str>,
    visible: bool,
    pool: &mut MemoryReusePool,
    source: &dyn DataSource,
    bind: impl FnOnce(&mut Container),
) {
    let Some(reuse_identifier) = reuse_identifier.filter(|_| visible) else {
        evict(slot, pool, source);
        return;
    };
    if slot
        .as_ref()
        .is_some_and(|container| container.reuse_identifier() != reuse_identifier)
    {
        evict(slot, pool, source);
    }
    if slot.is_none() {
        let mut container = pool.dequeue(reuse_identifier);
        bind(&mut container);
        source.will_display(&mut container);
        *slot = Some(container);
    }
}

fn evict(slot: &mut Option<Container>, pool: &mut MemoryReusePool, source: &dyn DataSource) {
    let Some(mut container) = slot.take() else {
        return;
    };
    if let Some(view) = container.view_mut() {
        if view.is_first_responder() {
            view.resign_first_responder();
        }
    }
    source.did_end_displaying(&mut container);
    pool.enqueue(container);
}

fn evict_section(slots: &mut SectionSlots, pool: &mut MemoryReusePool, source: &dyn DataSource) {
    evict(&mut slots.header, pool, source);
    for slot in slots.items.iter_mut() {
        evict(slot, pool, source);
    }
    evict(&mut slots.footer, pool, source);
}

impl ListView for MemoryListView {
    fn id(&self) -> ListViewId {
        self.id
    }

    fn begin_updates(&mut self) {
        if self.batch.is_some() {
            panic!("{}: begin_updates while a batch is open", self.id);
        }
        self.batch = Some(Batch::default());
        self.record(ListOp::BeginUpdates);
    }

    fn end_updates(&mut self, source: &dyn DataSource, animated: bool) {
        let Some(batch) = self.batch.take() else {
            panic!("{}: end_updates without begin_updates", self.id);
        };
        self.record(ListOp::EndUpdates { animated });
        self.resolve(batch, source);
    }

    fn insert_sections(&mut self, sections: &[usize]) {
        self.batch_mut().inserted_sections.extend_from_slice(sections);
        self.record(ListOp::InsertSections(sections.to_vec()));
    }

    fn delete_sections(&mut self, sections: &[usize]) {
        self.batch_mut().deleted_sections.extend_from_slice(sections);
        self.record(ListOp::DeleteSections(sections.to_vec()));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.batch_mut().moved_sections.push((from, to));
        self.record(ListOp::MoveSection { from, to });
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        self.batch_mut().inserted_items.extend_from_slice(paths);
        self.record(ListOp::InsertItems(paths.to_vec()));
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        self.batch_mut().deleted_items.extend_from_slice(paths);
        self.record(ListOp::DeleteItems(paths.to_vec()));
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) {
        self.batch_mut().moved_items.push((from, to));
        self.record(ListOp::MoveItem { from, to });
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        self.batch_mut().reloaded_items.extend_from_slice(paths);
        self.record(ListOp::ReloadItems(paths.to_vec()));
    }

    fn reload_supplementary(&mut self, kind: SupplementaryKind, section: usize) {
        self.batch_mut().reloaded_supplementaries.push((kind, section));
        self.record(ListOp::ReloadSupplementary { kind, section });
    }

    fn reload_data(&mut self, source: &dyn DataSource) {
        if self.batch.is_some() {
            panic!("{}: reload_data inside a batch", self.id);
        }
        for slots in self.sections.iter_mut() {
            evict_section(slots, &mut self.pool, source);
        }
        self.sections = (0..source.number_of_sections())
            .map(|section| SectionSlots::empty(source.number_of_items(section)))
            .collect();
        self.record(ListOp::ReloadData);
        self.layout(source);
    }

    fn visible_item_mut(&mut self, path: IndexPath) -> Option<&mut Container> {
        self.sections
            .get_mut(path.section)?
            .items
            .get_mut(path.item)?
            .as_mut()
    }

    fn visible_supplementary_mut(
        &mut self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<&mut Container> {
        self.sections
            .get_mut(section)?
            .supplementary_mut(kind)
            .as_mut()
    }

    fn visible_containers_mut(&mut self) -> Vec<&mut Container> {
        self.sections
            .iter_mut()
            .flat_map(SectionSlots::containers_mut)
            .collect()
    }

    fn visible_paths(&self) -> Vec<IndexPath> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, slots)| {
                slots
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.is_some())
                    .map(move |(item, _)| IndexPath::new(section, item))
            })
            .collect()
    }

    fn scroll_to_item(&mut self, path: IndexPath, source: &dyn DataSource, animated: bool) {
        let row = self.row_of(path, source);
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + self.visible_rows {
            self.first_row = row + 1 - self.visible_rows.max(1);
        }
        self.record(ListOp::ScrollToItem { path, animated });
        self.layout(source);
    }

    fn focus_item(&mut self, path: IndexPath) -> bool {
        if self.item_container(path).is_none() {
            return false;
        }
        for container in self.visible_containers_mut() {
            if let Some(view) = container.view_mut() {
                if view.is_first_responder() {
                    view.resign_first_responder();
                }
            }
        }
        let accepted = self
            .visible_item_mut(path)
            .and_then(Container::view_mut)
            .is_some_and(|view| view.become_first_responder());
        if accepted {
            self.record(ListOp::Focus(path));
        }
        accepted
    }

    fn focused_path(&self) -> Option<IndexPath> {
        self.visible_paths().into_iter().find(|&path| {
            self.item_container(path)
                .and_then(Container::view)
                .is_some_and(|view| view.is_first_responder())
        })
    }

    fn resign_focus(&mut self) {
        let mut resigned = false;
        for container in self.visible_containers_mut() {
            if let Some(view) = container.view_mut() {
                if view.is_first_responder() {
                    view.resign_first_responder();
                    resigned = true;
                }
            }
        }
        if resigned {
            self.record(ListOp::ResignFocus);
        }
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn layout_margins(&self) -> EdgeInsets {
        self.layout_margins
    }
}

impl fmt::Debug for MemoryListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryListView")
            .field("id", &self.id)
            .field("sections", &self.sections.len())
            .field("first_row", &self.first_row)
            .field("visible_rows", &self.visible_rows)
            .field("ops", &self.ops.len())
            .finish()
    }
}

impl Drop for MemoryListView {
    fn drop(&mut self) {
        crate::registry::release(self.id);
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
