//! Core model for declarative sectioned lists.
//!
//! A [`Tree`] describes what a list shows: sections with optional headers and
//! footers, each holding identified rows. Every row, header and footer is an
//! [`AnyRenderable`], a type-erased component that knows how to create and
//! configure a host [`View`]. Components advertise optional behaviour
//! (focus, deletion, selection, custom heights) through capabilities that
//! are queried with [`AnyRenderable::cast`].

pub mod capability;
mod container;
pub mod decorators;
mod geometry;
mod renderable;
mod tree;
mod view;

pub use capability::{
    Accessory, AccessoryProviding, CapabilityRegistry, ComponentLifecycleAware,
    CustomInputProviding, Deletable, FocusEligibility, FocusStatus, Focusable, HeightCustomizing,
    MenuItem, MenuItemsResponding, Selectable, ViewLifecycleAware,
};
pub use container::Container;
pub use decorators::{ComponentLifecycle, Decoration, ViewLifecycle};
pub use geometry::{EdgeInsets, Size};
pub use renderable::{AnyRenderable, ErasedRenderable, IntoAnyRenderable, MountStash, Renderable};
pub use tree::{diff_trees, node_at, paths, IndexPath, Node, Section, Tree};
pub use view::{Stylable, Style, View};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use tiffin_diff::{Changeset, IndexPair, Move, MovePolicy, MutatedSection, SectionedChangeset};
