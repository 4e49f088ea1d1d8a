//! Typed components and their type-erased form.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::rc::Rc;

use crate::capability::CapabilityRegistry;
use crate::view::View;

/// A description of what one row, header or footer shows.
///
/// Components are cheap values rebuilt on every render. `generate` creates a
/// fresh view when no reusable one exists; `render` configures an existing
/// view, which may previously have shown another component with the same
/// reuse identifier.
pub trait Renderable: 'static {
    type View: View;

    fn generate(&self) -> Self::View;

    fn render(&self, view: &mut Self::View);

    /// Pool key for views of this component. Defaults to the view type name.
    fn reuse_identifier(&self) -> String {
        type_name::<Self::View>().to_string()
    }

    /// Whether `other` would render identically. Returning false (the
    /// default) only costs a redundant render.
    fn is_equal(&self, other: &Self) -> bool {
        let _ = other;
        false
    }

    /// Registers the capability traits this component implements.
    ///
    /// ```ignore
    /// fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
    ///     registry.insert::<dyn Focusable>(this.clone());
    /// }
    /// ```
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry)
    where
        Self: Sized,
    {
        let _ = (this, registry);
    }
}

/// Per-container storage that mount hooks use to hand data to the matching
/// unmount hook. Entries are strictly last-in first-out.
#[derive(Default)]
pub struct MountStash {
    entries: Vec<Box<dyn Any>>,
}

impl MountStash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: 'static>(&mut self, value: T) {
        self.entries.push(Box::new(value));
    }

    /// Pops the newest entry if it is a `T`. An entry of another type stays.
    pub fn pop<T: 'static>(&mut self) -> Option<T> {
        if !self.entries.last()?.is::<T>() {
            return None;
        }
        self.entries
            .pop()
            .and_then(|entry| entry.downcast::<T>().ok())
            .map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MountStash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountStash")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Object-safe face of a component. Implemented by the typed wrapper and by
/// every decorator.
pub trait ErasedRenderable: Any {
    fn component_name(&self) -> &'static str;

    fn reuse_identifier(&self) -> &str;

    fn generate(&self) -> Box<dyn View>;

    fn render(&self, view: &mut dyn View);

    /// Runs before `render` when the component is bound to a view.
    fn mount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let _ = (view, stash);
    }

    /// Runs before another component is bound to the same view.
    fn unmount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let _ = (view, stash);
    }

    fn is_equal(&self, other: &dyn ErasedRenderable) -> bool;

    /// The stored `Rc<C>` for capability id `TypeId::of::<C>()`.
    fn capability(&self, id: TypeId) -> Option<&dyn Any>;
}

impl dyn ErasedRenderable {
    pub fn as_any(&self) -> &dyn Any {
        self
    }
}

struct TypedRenderable<R: Renderable> {
    component: Rc<R>,
    reuse_identifier: String,
    capabilities: CapabilityRegistry,
}

impl<R: Renderable> TypedRenderable<R> {
    fn new(component: R) -> Self {
        let component = Rc::new(component);
        let mut capabilities = CapabilityRegistry::new();
        R::capabilities(&component, &mut capabilities);
        Self {
            reuse_identifier: component.reuse_identifier(),
            component,
            capabilities,
        }
    }

    fn view_mut<'a>(&self, view: &'a mut dyn View) -> &'a mut R::View {
        let actual = view.view_type_name();
        view.downcast_mut::<R::View>().unwrap_or_else(|| {
            panic!(
                "{} renders into {} but was handed a {}",
                type_name::<R>(),
                type_name::<R::View>(),
                actual
            )
        })
    }
}

impl<R: Renderable> ErasedRenderable for TypedRenderable<R> {
    fn component_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    fn generate(&self) -> Box<dyn View> {
        Box::new(self.component.generate())
    }

    fn render(&self, view: &mut dyn View) {
        let view = self.view_mut(view);
        self.component.render(view);
    }

    fn is_equal(&self, other: &dyn ErasedRenderable) -> bool {
        other
            .as_any()
            .downcast_ref::<TypedRenderable<R>>()
            .is_some_and(|other| self.component.is_equal(&other.component))
    }

    fn capability(&self, id: TypeId) -> Option<&dyn Any> {
        self.capabilities.get_raw(id)
    }
}

/// A component of any type, cheap to clone.
#[derive(Clone)]
pub struct AnyRenderable {
    inner: Rc<dyn ErasedRenderable>,
}

impl AnyRenderable {
    pub fn new<R: Renderable>(component: R) -> Self {
        Self {
            inner: Rc::new(TypedRenderable::new(component)),
        }
    }

    /// Wraps a hand-written [`ErasedRenderable`], typically a decorator.
    pub fn from_erased(inner: impl ErasedRenderable) -> Self {
        Self {
            inner: Rc::new(inner),
        }
    }

    pub fn reuse_identifier(&self) -> &str {
        self.inner.reuse_identifier()
    }

    pub fn component_name(&self) -> &'static str {
        self.inner.component_name()
    }

    /// Type of the outermost wrapper: a decorator's type when decorated.
    pub fn component_type(&self) -> TypeId {
        self.inner.as_any().type_id()
    }

    pub fn generate(&self) -> Box<dyn View> {
        self.inner.generate()
    }

    /// Renders into `view`.
    ///
    /// Panics if `view` was not generated by a component with this one's
    /// view type.
    pub fn render(&self, view: &mut dyn View) {
        self.inner.render(view)
    }

    pub fn mount(&self, view: &mut dyn View, stash: &mut MountStash) {
        self.inner.mount(view, stash)
    }

    pub fn unmount(&self, view: &mut dyn View, stash: &mut MountStash) {
        self.inner.unmount(view, stash)
    }

    /// Looks up capability `C`, e.g. `component.cast::<dyn Focusable>()`.
    ///
    /// Decorators answer for their own capability first and then defer to
    /// the component they wrap.
    pub fn cast<C: ?Sized + 'static>(&self) -> Option<Rc<C>> {
        self.inner
            .capability(TypeId::of::<C>())
            .and_then(|entry| entry.downcast_ref::<Rc<C>>())
            .cloned()
    }

    pub fn supports<C: ?Sized + 'static>(&self) -> bool {
        self.inner.capability(TypeId::of::<C>()).is_some()
    }

    /// The concrete component when this value wraps an undecorated `R`.
    pub fn downcast_ref<R: Renderable>(&self) -> Option<&R> {
        self.inner
            .as_any()
            .downcast_ref::<TypedRenderable<R>>()
            .map(|typed| &*typed.component)
    }

    pub(crate) fn erased(&self) -> &dyn ErasedRenderable {
        &*self.inner
    }
}

impl PartialEq for AnyRenderable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.inner.is_equal(&*other.inner)
    }
}

impl fmt::Debug for AnyRenderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyRenderable")
            .field("component", &self.component_name())
            .field("reuse_identifier", &self.reuse_identifier())
            .finish()
    }
}

/// Conversion into [`AnyRenderable`], so builders accept typed components
/// and already erased ones alike.
pub trait IntoAnyRenderable {
    fn into_any(self) -> AnyRenderable;
}

impl<R: Renderable> IntoAnyRenderable for R {
    fn into_any(self) -> AnyRenderable {
        AnyRenderable::new(self)
    }
}

impl IntoAnyRenderable for AnyRenderable {
    fn into_any(self) -> AnyRenderable {
        self
    }
}

#[cfg(test)]
#[path = "tests/renderable_tests.rs"]
mod tests;
