//! Immutable description of a sectioned list.

use std::fmt;
use std::hash::Hash;

use tiffin_diff::{diff_sections_with, MovePolicy, SectionedChangeset};

use crate::renderable::{AnyRenderable, IntoAnyRenderable};

/// Position of an item: section index, then item index within the section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// One row: a stable identity plus the component that renders it.
#[derive(Clone, Debug)]
pub struct Node<I> {
    id: I,
    component: AnyRenderable,
}

impl<I> Node<I> {
    pub fn new(id: I, component: impl IntoAnyRenderable) -> Self {
        Self {
            id,
            component: component.into_any(),
        }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn component(&self) -> &AnyRenderable {
        &self.component
    }
}

impl<I: PartialEq> PartialEq for Node<I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.component == other.component
    }
}

/// A section: identity, optional header and footer, and ordered rows.
#[derive(Clone, Debug)]
pub struct Section<S, I> {
    id: S,
    header: Option<AnyRenderable>,
    footer: Option<AnyRenderable>,
    items: Vec<Node<I>>,
}

impl<S, I> Section<S, I> {
    pub fn new(id: S) -> Self {
        Self {
            id,
            header: None,
            footer: None,
            items: Vec::new(),
        }
    }

    pub fn with_header(mut self, header: impl IntoAnyRenderable) -> Self {
        self.header = Some(header.into_any());
        self
    }

    pub fn with_footer(mut self, footer: impl IntoAnyRenderable) -> Self {
        self.footer = Some(footer.into_any());
        self
    }

    pub fn add_row(self, id: I, component: impl IntoAnyRenderable) -> Self {
        self.add_node(Node::new(id, component))
    }

    pub fn add_node(mut self, node: Node<I>) -> Self {
        self.items.push(node);
        self
    }

    pub fn add_nodes(mut self, nodes: impl IntoIterator<Item = Node<I>>) -> Self {
        self.items.extend(nodes);
        self
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn header(&self) -> Option<&AnyRenderable> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&AnyRenderable> {
        self.footer.as_ref()
    }

    pub fn items(&self) -> &[Node<I>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Node<I>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: PartialEq, I> Section<S, I> {
    /// Compares identity, header and footer, ignoring items.
    pub fn has_equal_metadata(&self, other: &Self) -> bool {
        self.id == other.id && self.header == other.header && self.footer == other.footer
    }
}

impl<S: PartialEq, I: PartialEq> PartialEq for Section<S, I> {
    fn eq(&self, other: &Self) -> bool {
        self.has_equal_metadata(other) && self.items == other.items
    }
}

/// The whole list: an ordered sequence of sections.
#[derive(Clone, Debug)]
pub struct Tree<S, I> {
    sections: Vec<Section<S, I>>,
}

impl<S, I> Default for Tree<S, I> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<S, I> Tree<S, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<Section<S, I>>) -> Self {
        Self { sections }
    }

    pub fn add_section(mut self, section: Section<S, I>) -> Self {
        self.sections.push(section);
        self
    }

    pub fn add_sections(mut self, sections: impl IntoIterator<Item = Section<S, I>>) -> Self {
        self.sections.extend(sections);
        self
    }

    pub fn sections(&self) -> &[Section<S, I>] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section<S, I>> {
        self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section<S, I>> {
        self.sections.get(index)
    }

    pub fn node(&self, path: IndexPath) -> Option<&Node<I>> {
        node_at(&self.sections, path)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of rows across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Every item path in display order.
    pub fn paths(&self) -> impl Iterator<Item = IndexPath> + '_ {
        paths(&self.sections)
    }
}

impl<S, I> Tree<S, I>
where
    S: Hash + Eq + Clone,
    I: Hash + Eq + Clone,
{
    /// Changes that turn `self` into `next`, with the default move policy.
    pub fn diff(&self, next: &Tree<S, I>) -> SectionedChangeset {
        diff_trees(&self.sections, &next.sections, MovePolicy::default())
    }

    pub fn diff_with(&self, next: &Tree<S, I>, policy: MovePolicy) -> SectionedChangeset {
        diff_trees(&self.sections, &next.sections, policy)
    }
}

impl<S: PartialEq, I: PartialEq> PartialEq for Tree<S, I> {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl<S, I> From<Vec<Section<S, I>>> for Tree<S, I> {
    fn from(sections: Vec<Section<S, I>>) -> Self {
        Self::from_sections(sections)
    }
}

/// Diffs two section lists. Sections pair by id and compare by metadata;
/// rows pair by id and compare by component equality.
pub fn diff_trees<S, I>(
    previous: &[Section<S, I>],
    current: &[Section<S, I>],
    policy: MovePolicy,
) -> SectionedChangeset
where
    S: Hash + Eq + Clone,
    I: Hash + Eq + Clone,
{
    diff_sections_with(
        previous,
        current,
        |section| section.id.clone(),
        Section::has_equal_metadata,
        |section| section.items.as_slice(),
        |node| node.id.clone(),
        |a, b| a.component == b.component,
        policy,
    )
}

pub fn node_at<S, I>(sections: &[Section<S, I>], path: IndexPath) -> Option<&Node<I>> {
    sections.get(path.section)?.items.get(path.item)
}

pub fn paths<S, I>(sections: &[Section<S, I>]) -> impl Iterator<Item = IndexPath> + '_ {
    sections
        .iter()
        .enumerate()
        .flat_map(|(section, content)| {
            (0..content.items.len()).map(move |item| IndexPath::new(section, item))
        })
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
