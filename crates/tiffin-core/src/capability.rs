//! Optional behaviours a component can expose, and the registry that finds
//! them through type erasure.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::rc::Rc;

use tiffin_diff::collections::map::HashMap;

use crate::geometry::EdgeInsets;
use crate::renderable::AnyRenderable;
use crate::view::View;

/// Capabilities a component exposes, keyed by the capability trait object.
///
/// Stores `Rc<dyn Trait>` values under `TypeId::of::<dyn Trait>()`. A
/// component registers itself once when it is erased:
///
/// ```ignore
/// registry.insert::<dyn Focusable>(this.clone());
/// ```
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: HashMap<TypeId, Box<dyn Any>>,
    names: Vec<&'static str>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capability` as `C`. A later insert of the same `C` wins.
    pub fn insert<C: ?Sized + 'static>(&mut self, capability: Rc<C>) {
        if self
            .entries
            .insert(TypeId::of::<C>(), Box::new(capability))
            .is_none()
        {
            self.names.push(type_name::<C>());
        }
    }

    pub fn get<C: ?Sized + 'static>(&self) -> Option<Rc<C>> {
        self.get_raw(TypeId::of::<C>())
            .and_then(|entry| entry.downcast_ref::<Rc<C>>())
            .cloned()
    }

    pub fn contains<C: ?Sized + 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<C>())
    }

    /// The stored `Rc<C>` for `TypeId::of::<C>()`, still boxed as `Any`.
    pub fn get_raw(&self, id: TypeId) -> Option<&dyn Any> {
        self.entries.get(&id).map(|entry| &**entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names.iter()).finish()
    }
}

/// Rows that can be swiped away.
pub trait Deletable {
    fn delete_action_text(&self) -> String {
        "Delete".to_string()
    }

    fn delete(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusStatus {
    Empty,
    Populated,
}

/// Whether a row can take keyboard focus during form traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusEligibility {
    Ineligible,
    Eligible(FocusStatus),
}

impl FocusEligibility {
    /// Populated rows are skipped when `skips_populated` is set.
    pub fn is_eligible(self, skips_populated: bool) -> bool {
        match self {
            FocusEligibility::Ineligible => false,
            FocusEligibility::Eligible(FocusStatus::Empty) => true,
            FocusEligibility::Eligible(FocusStatus::Populated) => !skips_populated,
        }
    }
}

pub trait Focusable {
    fn focus_eligibility(&self) -> FocusEligibility;
}

/// Notified when the component's row enters or leaves the screen.
pub trait ComponentLifecycleAware {
    fn will_display(&self) {}

    fn did_end_displaying(&self) {}
}

/// Like [`ComponentLifecycleAware`], with access to the displaying view.
pub trait ViewLifecycleAware {
    fn will_display(&self, view: &mut dyn View) {
        let _ = view;
    }

    fn did_end_displaying(&self, view: &mut dyn View) {
        let _ = view;
    }
}

/// An entry of a row's context menu.
#[derive(Clone)]
pub struct MenuItem {
    pub title: String,
    action: Rc<dyn Fn()>,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            title: title.into(),
            action: Rc::new(action),
        }
    }

    pub fn perform(&self) {
        (self.action)()
    }
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && Rc::ptr_eq(&self.action, &other.action)
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

pub trait MenuItemsResponding {
    fn menu_items(&self) -> Vec<MenuItem>;
}

/// Components that know their own row height.
pub trait HeightCustomizing {
    fn height(&self, width: f32, insets: EdgeInsets) -> f32;

    fn estimated_height(&self, width: f32, insets: EdgeInsets) -> f32 {
        self.height(width, insets)
    }
}

pub trait Selectable {
    fn should_highlight(&self) -> bool {
        true
    }

    fn did_select(&self);
}

/// Trailing accessory of a row.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Accessory {
    #[default]
    None,
    DisclosureIndicator,
    Checkmark,
    DetailButton,
    Custom(AnyRenderable),
}

pub trait AccessoryProviding {
    fn accessory(&self) -> Accessory;
}

/// Rows that replace the keyboard with a component of their own, such as a
/// picker, while focused.
pub trait CustomInputProviding {
    fn custom_input(&self) -> AnyRenderable;
}

#[cfg(test)]
#[path = "tests/capability_tests.rs"]
mod tests;
