//! Decorators add one capability to an existing component without touching
//! its type.
//!
//! A decorator forwards generation, rendering and reuse identity to the
//! component it wraps. Capability lookups check the decorator first and then
//! walk inwards, so the outermost decorator wins when two provide the same
//! capability.

use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use std::rc::Rc;

use crate::capability::{
    Accessory, AccessoryProviding, CapabilityRegistry, ComponentLifecycleAware,
    CustomInputProviding, Deletable, FocusEligibility, Focusable, HeightCustomizing, MenuItem,
    MenuItemsResponding, Selectable, ViewLifecycleAware,
};
use crate::geometry::EdgeInsets;
use crate::renderable::{AnyRenderable, ErasedRenderable, MountStash};
use crate::view::{Stylable, Style, View};

/// What a decorator adds on top of the component it wraps.
///
/// Hooks run after the wrapped component's `mount` and `render`, and before
/// its `unmount`.
pub trait Decoration: 'static {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry)
    where
        Self: Sized;

    /// Whether two decorations would leave the view in the same state.
    fn same_as(&self, other: &Self) -> bool {
        let _ = other;
        true
    }

    fn mount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let _ = (view, stash);
    }

    fn render(&self, view: &mut dyn View) {
        let _ = view;
    }

    fn unmount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let _ = (view, stash);
    }
}

struct Decorated<D: Decoration> {
    base: AnyRenderable,
    decoration: Rc<D>,
    capabilities: CapabilityRegistry,
}

impl<D: Decoration> ErasedRenderable for Decorated<D> {
    fn component_name(&self) -> &'static str {
        self.base.component_name()
    }

    fn reuse_identifier(&self) -> &str {
        self.base.reuse_identifier()
    }

    fn generate(&self) -> Box<dyn View> {
        self.base.generate()
    }

    fn render(&self, view: &mut dyn View) {
        self.base.render(view);
        self.decoration.render(view);
    }

    fn mount(&self, view: &mut dyn View, stash: &mut MountStash) {
        self.base.mount(view, stash);
        self.decoration.mount(view, stash);
    }

    fn unmount(&self, view: &mut dyn View, stash: &mut MountStash) {
        self.decoration.unmount(view, stash);
        self.base.unmount(view, stash);
    }

    fn is_equal(&self, other: &dyn ErasedRenderable) -> bool {
        other
            .as_any()
            .downcast_ref::<Decorated<D>>()
            .is_some_and(|other| {
                self.decoration.same_as(&other.decoration) && self.base == other.base
            })
    }

    fn capability(&self, id: TypeId) -> Option<&dyn Any> {
        self.capabilities
            .get_raw(id)
            .or_else(|| self.base.erased().capability(id))
    }
}

impl AnyRenderable {
    /// Wraps this component in `decoration`.
    pub fn decorate<D: Decoration>(self, decoration: D) -> AnyRenderable {
        let decoration = Rc::new(decoration);
        let mut capabilities = CapabilityRegistry::new();
        D::capabilities(&decoration, &mut capabilities);
        AnyRenderable::from_erased(Decorated {
            base: self,
            decoration,
            capabilities,
        })
    }

    pub fn deletable(
        self,
        action_text: impl Into<String>,
        on_delete: impl Fn() + 'static,
    ) -> AnyRenderable {
        self.decorate(DeleteAction {
            text: action_text.into(),
            on_delete: Box::new(on_delete),
        })
    }

    pub fn on_display(self, lifecycle: ComponentLifecycle) -> AnyRenderable {
        self.decorate(lifecycle)
    }

    pub fn on_view_display(self, lifecycle: ViewLifecycle) -> AnyRenderable {
        self.decorate(lifecycle)
    }

    /// Applies `style` to the view on every render and puts the view's
    /// previous style back when another component takes the view over.
    ///
    /// Panics at bind time if the view is not a `V`.
    pub fn styled<V: Stylable>(self, style: impl Style<V>) -> AnyRenderable {
        self.decorate(Styling::<V> {
            style: Rc::new(style),
            view: PhantomData,
        })
    }

    /// Makes the row focusable and supplies the component shown in place of
    /// the keyboard while it is focused.
    pub fn custom_input(
        self,
        input: impl crate::renderable::IntoAnyRenderable,
        eligibility: FocusEligibility,
    ) -> AnyRenderable {
        self.decorate(CustomInput {
            input: input.into_any(),
            eligibility,
        })
    }

    pub fn accessory(self, accessory: Accessory) -> AnyRenderable {
        self.decorate(AccessoryDecoration(accessory))
    }

    pub fn selectable(self, on_select: impl Fn() + 'static) -> AnyRenderable {
        self.decorate(Selection {
            highlights: true,
            on_select: Box::new(on_select),
        })
    }

    /// Like [`selectable`](Self::selectable) without the highlight.
    pub fn selectable_without_highlight(self, on_select: impl Fn() + 'static) -> AnyRenderable {
        self.decorate(Selection {
            highlights: false,
            on_select: Box::new(on_select),
        })
    }

    pub fn menu_items(self, items: Vec<MenuItem>) -> AnyRenderable {
        self.decorate(Menu(items))
    }

    /// Computed heights never compare equal, so the row is rebound on every render.
    pub fn height(self, height: impl Fn(f32, EdgeInsets) -> f32 + 'static) -> AnyRenderable {
        self.decorate(Height::Computed(Box::new(height)))
    }

    pub fn fixed_height(self, height: f32) -> AnyRenderable {
        self.decorate(Height::Fixed(height))
    }
}

struct DeleteAction {
    text: String,
    on_delete: Box<dyn Fn()>,
}

impl Decoration for DeleteAction {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn Deletable>(this.clone());
    }
}

impl Deletable for DeleteAction {
    fn delete_action_text(&self) -> String {
        self.text.clone()
    }

    fn delete(&self) {
        (self.on_delete)()
    }
}

/// Display callbacks for [`AnyRenderable::on_display`].
#[derive(Default)]
pub struct ComponentLifecycle {
    will_display: Option<Box<dyn Fn()>>,
    did_end_displaying: Option<Box<dyn Fn()>>,
}

impl ComponentLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn will_display(mut self, callback: impl Fn() + 'static) -> Self {
        self.will_display = Some(Box::new(callback));
        self
    }

    pub fn did_end_displaying(mut self, callback: impl Fn() + 'static) -> Self {
        self.did_end_displaying = Some(Box::new(callback));
        self
    }
}

impl Decoration for ComponentLifecycle {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn ComponentLifecycleAware>(this.clone());
    }
}

impl ComponentLifecycleAware for ComponentLifecycle {
    fn will_display(&self) {
        if let Some(callback) = &self.will_display {
            callback();
        }
    }

    fn did_end_displaying(&self) {
        if let Some(callback) = &self.did_end_displaying {
            callback();
        }
    }
}

type ViewCallback = Box<dyn Fn(&mut dyn View)>;

/// Display callbacks with view access for [`AnyRenderable::on_view_display`].
#[derive(Default)]
pub struct ViewLifecycle {
    will_display: Option<ViewCallback>,
    did_end_displaying: Option<ViewCallback>,
}

impl ViewLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn will_display(mut self, callback: impl Fn(&mut dyn View) + 'static) -> Self {
        self.will_display = Some(Box::new(callback));
        self
    }

    pub fn did_end_displaying(mut self, callback: impl Fn(&mut dyn View) + 'static) -> Self {
        self.did_end_displaying = Some(Box::new(callback));
        self
    }
}

impl Decoration for ViewLifecycle {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn ViewLifecycleAware>(this.clone());
    }
}

impl ViewLifecycleAware for ViewLifecycle {
    fn will_display(&self, view: &mut dyn View) {
        if let Some(callback) = &self.will_display {
            callback(view);
        }
    }

    fn did_end_displaying(&self, view: &mut dyn View) {
        if let Some(callback) = &self.did_end_displaying {
            callback(view);
        }
    }
}

struct Styling<V: Stylable> {
    style: Rc<dyn Style<V>>,
    view: PhantomData<fn(&mut V)>,
}

impl<V: Stylable> Styling<V> {
    fn typed<'a>(&self, view: &'a mut dyn View) -> &'a mut V {
        let actual = view.view_type_name();
        view.downcast_mut::<V>().unwrap_or_else(|| {
            panic!(
                "style for {} applied to a {}",
                type_name::<V>(),
                actual
            )
        })
    }
}

impl<V: Stylable> Decoration for Styling<V> {
    fn capabilities(_this: &Rc<Self>, _registry: &mut CapabilityRegistry) {}

    fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.style, &other.style)
    }

    fn mount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let view = self.typed(view);
        stash.push(view.snapshot_style());
    }

    fn render(&self, view: &mut dyn View) {
        self.style.apply(self.typed(view));
    }

    fn unmount(&self, view: &mut dyn View, stash: &mut MountStash) {
        let view = self.typed(view);
        match stash.pop::<V::Snapshot>() {
            Some(snapshot) => view.restore_style(snapshot),
            None => panic!(
                "no style snapshot for {} left in the mount stash",
                type_name::<V>()
            ),
        }
    }
}

struct CustomInput {
    input: AnyRenderable,
    eligibility: FocusEligibility,
}

impl Decoration for CustomInput {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn CustomInputProviding>(this.clone());
        registry.insert::<dyn Focusable>(this.clone());
    }

    fn same_as(&self, other: &Self) -> bool {
        self.eligibility == other.eligibility && self.input == other.input
    }
}

impl CustomInputProviding for CustomInput {
    fn custom_input(&self) -> AnyRenderable {
        self.input.clone()
    }
}

impl Focusable for CustomInput {
    fn focus_eligibility(&self) -> FocusEligibility {
        self.eligibility
    }
}

struct AccessoryDecoration(Accessory);

impl Decoration for AccessoryDecoration {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn AccessoryProviding>(this.clone());
    }

    fn same_as(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl AccessoryProviding for AccessoryDecoration {
    fn accessory(&self) -> Accessory {
        self.0.clone()
    }
}

struct Selection {
    highlights: bool,
    on_select: Box<dyn Fn()>,
}

impl Decoration for Selection {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn Selectable>(this.clone());
    }
}

impl Selectable for Selection {
    fn should_highlight(&self) -> bool {
        self.highlights
    }

    fn did_select(&self) {
        (self.on_select)()
    }
}

struct Menu(Vec<MenuItem>);

impl Decoration for Menu {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn MenuItemsResponding>(this.clone());
    }
}

impl MenuItemsResponding for Menu {
    fn menu_items(&self) -> Vec<MenuItem> {
        self.0.clone()
    }
}

enum Height {
    Fixed(f32),
    Computed(Box<dyn Fn(f32, EdgeInsets) -> f32>),
}

impl Decoration for Height {
    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn HeightCustomizing>(this.clone());
    }

    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Height::Fixed(a), Height::Fixed(b)) => a == b,
            _ => false,
        }
    }
}

impl HeightCustomizing for Height {
    fn height(&self, width: f32, insets: EdgeInsets) -> f32 {
        match self {
            Height::Fixed(height) => *height,
            Height::Computed(height) => height(width, insets),
        }
    }
}

#[cfg(test)]
#[path = "tests/decorators_tests.rs"]
mod tests;
