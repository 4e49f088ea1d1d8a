//! Host views that components render into.

use std::any::{type_name, Any};

use crate::geometry::Size;

/// A view owned by the host toolkit.
///
/// Every method has a default so plain display views only need an empty
/// `impl View for MyView {}`. Views that take keyboard focus override the
/// responder methods.
pub trait View: Any {
    /// Size the view needs when laid out within `available`.
    ///
    /// Used for self-sizing rows when the component does not provide its own
    /// height. Views that cannot measure themselves report [`Size::ZERO`],
    /// which makes the list fall back to its estimates.
    fn fitting_size(&self, available: Size) -> Size {
        let _ = available;
        Size::ZERO
    }

    /// Asks the view to take keyboard focus. Returns whether it did.
    fn become_first_responder(&mut self) -> bool {
        false
    }

    fn resign_first_responder(&mut self) {}

    fn is_first_responder(&self) -> bool {
        false
    }

    /// Called on visible views when the focus eligibility of neighbouring rows
    /// may have changed, so input toolbars can refresh their arrows.
    fn neighboring_focus_eligibility_did_change(&mut self) {}

    /// Called when the view's container is handed back to a reuse pool.
    fn prepare_for_reuse(&mut self) {}

    /// Concrete type name, used in diagnostics.
    fn view_type_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl dyn View {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    pub fn is<V: View>(&self) -> bool {
        self.as_any().is::<V>()
    }

    pub fn downcast_ref<V: View>(&self) -> Option<&V> {
        self.as_any().downcast_ref::<V>()
    }

    pub fn downcast_mut<V: View>(&mut self) -> Option<&mut V> {
        self.as_any_mut().downcast_mut::<V>()
    }
}

/// A view whose visual properties can be captured and put back.
///
/// Styling decorators snapshot the view when they mount and restore the
/// snapshot when they unmount, so a reused view never keeps a style its next
/// component did not ask for.
pub trait Stylable: View {
    type Snapshot: 'static;

    fn snapshot_style(&self) -> Self::Snapshot;

    fn restore_style(&mut self, snapshot: Self::Snapshot);
}

/// Visual properties applied to a view of type `V`.
pub trait Style<V: ?Sized>: 'static {
    fn apply(&self, view: &mut V);
}

impl<V: ?Sized, F> Style<V> for F
where
    F: Fn(&mut V) + 'static,
{
    fn apply(&self, view: &mut V) {
        self(view)
    }
}
