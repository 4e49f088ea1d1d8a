//! Side table attaching adapters to list views.
//!
//! List views know nothing about adapters. Each thread keeps a map from
//! [`ListViewId`] to the adapter prepared for that view; rendering takes the
//! adapter out of the map for the duration of the render so a completion
//! callback can render the same view again. An entry lives until the view
//! is dropped or [`release`] is called.

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::hash::Hash;

use tiffin_core::{IndexPath, Tree};
use tiffin_diff::collections::map::HashMap;

use crate::adapter::{Adapter, AdapterConfig};
use crate::error::ListError;
use crate::focus::{FocusCoordinator, FocusDirection};
use crate::list_view::{ListView, ListViewId};

struct Entry {
    adapter: Option<Box<dyn Any>>,
    adapter_type: &'static str,
}

thread_local! {
    static ADAPTERS: RefCell<HashMap<ListViewId, Entry>> = RefCell::new(HashMap::default());
}

/// Attaches `adapter` to `view`.
///
/// Panics if the view already has an adapter.
pub fn prepare<S: 'static, I: 'static>(view: &dyn ListView, adapter: Adapter<S, I>) {
    let id = view.id();
    ADAPTERS.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(existing) = table.get(&id) {
            panic!(
                "{id} is already prepared with {}; prepare it once before rendering",
                existing.adapter_type
            );
        }
        log::debug!("{id}: prepared with {}", type_name::<Adapter<S, I>>());
        table.insert(
            id,
            Entry {
                adapter: Some(Box::new(adapter)),
                adapter_type: type_name::<Adapter<S, I>>(),
            },
        );
    });
}

/// Attaches a default adapter with `config`.
pub fn prepare_with<S: 'static, I: 'static>(view: &dyn ListView, config: AdapterConfig) {
    prepare(view, Adapter::<S, I>::new(config));
}

pub fn is_prepared(view: ListViewId) -> bool {
    ADAPTERS.with(|table| table.borrow().contains_key(&view))
}

/// Forgets the adapter of `view`. Returns whether there was one.
///
/// List views call this from `Drop`. It never panics: during thread teardown
/// or while the table is borrowed it does nothing and returns `false`. The
/// adapter is dropped after the table borrow ends, so components holding
/// other list views may release them in turn.
pub fn release(view: ListViewId) -> bool {
    let removed = ADAPTERS
        .try_with(|table| {
            table
                .try_borrow_mut()
                .ok()
                .and_then(|mut table| table.remove(&view))
        })
        .ok()
        .flatten();
    removed.is_some()
}

fn take<S: 'static, I: 'static>(view: ListViewId) -> Option<Box<Adapter<S, I>>> {
    ADAPTERS.with(|table| {
        let mut table = table.borrow_mut();
        let entry = table.get_mut(&view)?;
        let Some(adapter) = entry.adapter.take() else {
            panic!("{view}: adapter used while a render is in progress");
        };
        match adapter.downcast::<Adapter<S, I>>() {
            Ok(adapter) => Some(adapter),
            Err(_) => panic!(
                "{view} was prepared with {} but used as {}",
                entry.adapter_type,
                type_name::<Adapter<S, I>>()
            ),
        }
    })
}

fn put_back<S: 'static, I: 'static>(view: ListViewId, adapter: Box<Adapter<S, I>>) {
    ADAPTERS.with(|table| {
        if let Some(entry) = table.borrow_mut().get_mut(&view) {
            entry.adapter = Some(adapter);
        }
    });
}

/// Runs `f` with the adapter of `view` checked out of the table.
fn with_checked_out<S: 'static, I: 'static, R>(
    view: ListViewId,
    f: impl FnOnce(&mut Adapter<S, I>) -> R,
) -> Result<R, ListError> {
    let mut adapter = take::<S, I>(view).ok_or(ListError::NotPrepared { view })?;
    let result = f(&mut adapter);
    put_back(view, adapter);
    Ok(result)
}

/// Renders `tree` into `view`, preparing a default adapter on first use.
pub fn render<S, I, V>(view: &mut V, tree: Tree<S, I>, animated: bool)
where
    S: Hash + Eq + Clone + 'static,
    I: Hash + Eq + Clone + 'static,
    V: ListView,
{
    render_then(view, tree, animated, |_| {});
}

/// Like [`render`], then calls `completion` once the adapter is back in the
/// table. The completion may render `view` again.
pub fn render_then<S, I, V>(
    view: &mut V,
    tree: Tree<S, I>,
    animated: bool,
    completion: impl FnOnce(&mut V),
) where
    S: Hash + Eq + Clone + 'static,
    I: Hash + Eq + Clone + 'static,
    V: ListView,
{
    let id = view.id();
    if !is_prepared(id) {
        log::debug!("{id}: rendered before prepare, using a default adapter");
        prepare(&*view, Adapter::<S, I>::default());
    }
    let rendered = with_checked_out::<S, I, _>(id, |adapter| {
        adapter.render(&mut *view, tree, animated)
    });
    if let Err(err) = rendered {
        panic!("render into {id} failed: {err}");
    }
    completion(view);
}

/// Runs `f` against the adapter of `view`.
///
/// Capability callbacks reached through `f` must not render the same view;
/// use [`commit_delete`] and [`select_item`] for those.
pub fn with_adapter<S: 'static, I: 'static, R>(
    view: ListViewId,
    f: impl FnOnce(&Adapter<S, I>) -> R,
) -> Result<R, ListError> {
    with_checked_out::<S, I, _>(view, |adapter| f(adapter))
}

/// Runs the delete action of the row at `path`. The action runs after the
/// adapter is back in the table, so it may render.
pub fn commit_delete<S: 'static, I: 'static>(
    view: ListViewId,
    path: IndexPath,
) -> Result<(), ListError> {
    let deletable = with_adapter::<S, I, _>(view, |adapter| adapter.deletable_at(path))??;
    deletable.delete();
    Ok(())
}

/// Selects the row at `path`. Returns whether the row handled it.
pub fn select_item<S: 'static, I: 'static>(
    view: ListViewId,
    path: IndexPath,
) -> Result<bool, ListError> {
    let selectable = with_adapter::<S, I, _>(view, |adapter| adapter.selectable_at(path))?;
    Ok(match selectable {
        Some(selectable) => {
            selectable.did_select();
            true
        }
        None => false,
    })
}

/// Moves keyboard focus within `view` to the next eligible row.
pub fn move_focus<S: 'static, I: 'static, V: ListView>(
    view: &mut V,
    direction: FocusDirection,
    skips_populated: bool,
) -> Result<bool, ListError> {
    let id = view.id();
    with_checked_out::<S, I, _>(id, |adapter| {
        FocusCoordinator::new(adapter, &mut *view)
            .skipping_populated(skips_populated)
            .move_focus(direction)
    })
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
