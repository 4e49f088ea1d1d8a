use std::rc::Rc;

use crate::{
    CapabilityRegistry, FocusEligibility, FocusStatus, Focusable, Renderable, Size, Stylable,
    View,
};

#[derive(Debug, Default)]
pub(crate) struct LabelView {
    pub text: String,
    pub color: &'static str,
    pub renders: usize,
    pub reuses: usize,
}

impl View for LabelView {
    fn fitting_size(&self, available: Size) -> Size {
        Size::new(available.width, 20.0)
    }

    fn prepare_for_reuse(&mut self) {
        self.reuses += 1;
    }
}

impl Stylable for LabelView {
    type Snapshot = &'static str;

    fn snapshot_style(&self) -> &'static str {
        self.color
    }

    fn restore_style(&mut self, snapshot: &'static str) {
        self.color = snapshot;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Label(pub &'static str);

impl Renderable for Label {
    type View = LabelView;

    fn generate(&self) -> LabelView {
        LabelView {
            color: "black",
            ..LabelView::default()
        }
    }

    fn render(&self, view: &mut LabelView) {
        view.text = self.0.to_string();
        view.renders += 1;
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// Never reports equality, like most components that skip `is_equal`.
pub(crate) struct Opaque(pub u32);

impl Renderable for Opaque {
    type View = LabelView;

    fn generate(&self) -> LabelView {
        LabelView::default()
    }

    fn render(&self, view: &mut LabelView) {
        view.text = self.0.to_string();
    }
}

#[derive(Debug, Default)]
pub(crate) struct FieldView {
    pub value: String,
    pub focused: bool,
}

impl View for FieldView {
    fn become_first_responder(&mut self) -> bool {
        self.focused = true;
        true
    }

    fn resign_first_responder(&mut self) {
        self.focused = false;
    }

    fn is_first_responder(&self) -> bool {
        self.focused
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Field {
    pub value: String,
}

impl Field {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl Renderable for Field {
    type View = FieldView;

    fn generate(&self) -> FieldView {
        FieldView::default()
    }

    fn render(&self, view: &mut FieldView) {
        view.value = self.value.clone();
    }

    fn reuse_identifier(&self) -> String {
        "field".to_string()
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn Focusable>(this.clone());
    }
}

impl Focusable for Field {
    fn focus_eligibility(&self) -> FocusEligibility {
        if self.value.is_empty() {
            FocusEligibility::Eligible(FocusStatus::Empty)
        } else {
            FocusEligibility::Eligible(FocusStatus::Populated)
        }
    }
}
