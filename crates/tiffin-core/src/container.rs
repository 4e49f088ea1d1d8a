//! A reusable slot that owns one host view and the component bound to it.

use std::fmt;

use crate::renderable::{AnyRenderable, MountStash};
use crate::view::View;

/// Owns a view for one reuse identifier and binds components to it.
///
/// The view is generated by the first component bound to the container and
/// kept for every later bind.
pub struct Container {
    reuse_identifier: String,
    view: Option<Box<dyn View>>,
    component: Option<AnyRenderable>,
    stash: MountStash,
    bind_count: usize,
}

impl Container {
    pub fn new(reuse_identifier: impl Into<String>) -> Self {
        Self {
            reuse_identifier: reuse_identifier.into(),
            view: None,
            component: None,
            stash: MountStash::new(),
            bind_count: 0,
        }
    }

    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    pub fn component(&self) -> Option<&AnyRenderable> {
        self.component.as_ref()
    }

    pub fn view(&self) -> Option<&dyn View> {
        self.view.as_deref()
    }

    pub fn view_mut(&mut self) -> Option<&mut dyn View> {
        self.view.as_deref_mut()
    }

    pub fn typed_view<V: View>(&self) -> Option<&V> {
        self.view()?.downcast_ref::<V>()
    }

    pub fn typed_view_mut<V: View>(&mut self) -> Option<&mut V> {
        self.view_mut()?.downcast_mut::<V>()
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }

    pub fn is_bound(&self) -> bool {
        self.component.is_some()
    }

    /// How many times a component was rendered into this container.
    pub fn bind_count(&self) -> usize {
        self.bind_count
    }

    /// Binds `component`: unmounts the previous one, then mounts and renders
    /// the new one into the container's view.
    ///
    /// Panics if the component's reuse identifier differs from the
    /// container's.
    pub fn bind(&mut self, component: &AnyRenderable) {
        if component.reuse_identifier() != self.reuse_identifier {
            panic!(
                "{} with reuse identifier `{}` bound to a container for `{}`",
                component.component_name(),
                component.reuse_identifier(),
                self.reuse_identifier
            );
        }
        let view = self.view.get_or_insert_with(|| component.generate());
        if let Some(previous) = self.component.take() {
            previous.unmount(view.as_mut(), &mut self.stash);
        }
        component.mount(view.as_mut(), &mut self.stash);
        component.render(view.as_mut());
        self.component = Some(component.clone());
        self.bind_count += 1;
    }

    /// Unmounts the bound component, if any, and readies the view for reuse.
    pub fn unbind(&mut self) {
        if let Some(view) = self.view.as_deref_mut() {
            if let Some(previous) = self.component.take() {
                previous.unmount(view, &mut self.stash);
            }
            view.prepare_for_reuse();
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("reuse_identifier", &self.reuse_identifier)
            .field("component", &self.component)
            .field("has_view", &self.view.is_some())
            .field("bind_count", &self.bind_count)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod tests;
