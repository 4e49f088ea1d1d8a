//! Reconciliation of [`Tree`](tiffin_core::Tree) values against a native
//! list view.
//!
//! An [`Adapter`] keeps the last tree it applied. Each render diffs the new
//! tree against it and issues one batch of structural updates, rebinding
//! visible rows that changed in place. [`registry`] ties adapters to list
//! views without the views knowing, and [`focus`] walks focusable rows for
//! form-style keyboard navigation.

mod adapter;
mod error;
pub mod focus;
mod list_view;
mod memory;
pub mod registry;
mod reuse_pool;
mod sizing;
pub mod testing;

pub use adapter::{Adapter, AdapterConfig};
pub use error::ListError;
pub use focus::{find_focus_target, FocusCoordinator, FocusDirection, FocusToolbar, ToolbarAction};
pub use list_view::{DataSource, ListView, ListViewId, SupplementaryKind};
pub use memory::{ListOp, MemoryListView};
pub use reuse_pool::{MemoryReusePool, ReusePool, ReuseStats};
pub use testing::ListTestRule;
