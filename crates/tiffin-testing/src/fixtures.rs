use std::rc::Rc;

use tiffin_core::{
    CapabilityRegistry, EdgeInsets, FocusEligibility, FocusStatus, Focusable, HeightCustomizing,
    Renderable, Section, Size, Stylable, View,
};

/// Height of one line of [`TextView`] text.
pub const LINE_HEIGHT: f32 = 20.0;

/// A label-like view that counts how it is used.
#[derive(Debug, Default)]
pub struct TextView {
    pub text: String,
    pub color: &'static str,
    pub renders: usize,
    pub reuses: usize,
    pub neighbor_changes: usize,
}

impl View for TextView {
    fn fitting_size(&self, available: Size) -> Size {
        let lines = self.text.lines().count().max(1);
        Size::new(available.width, lines as f32 * LINE_HEIGHT)
    }

    fn neighboring_focus_eligibility_did_change(&mut self) {
        self.neighbor_changes += 1;
    }

    fn prepare_for_reuse(&mut self) {
        self.reuses += 1;
    }
}

impl Stylable for TextView {
    type Snapshot = &'static str;

    fn snapshot_style(&self) -> &'static str {
        self.color
    }

    fn restore_style(&mut self, snapshot: &'static str) {
        self.color = snapshot;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Renderable for Text {
    type View = TextView;

    fn generate(&self) -> TextView {
        TextView {
            color: "black",
            ..TextView::default()
        }
    }

    fn render(&self, view: &mut TextView) {
        view.text.clone_from(&self.text);
        view.renders += 1;
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// Renders like [`Text`] but never reports equality.
#[derive(Clone, Debug)]
pub struct Untracked {
    pub text: String,
}

impl Untracked {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Renderable for Untracked {
    type View = TextView;

    fn generate(&self) -> TextView {
        TextView::default()
    }

    fn render(&self, view: &mut TextView) {
        view.text.clone_from(&self.text);
        view.renders += 1;
    }
}

#[derive(Debug, Default)]
pub struct InputView {
    pub value: String,
    pub placeholder: String,
    pub focused: bool,
    pub refuses_focus: bool,
    pub neighbor_changes: usize,
}

impl View for InputView {
    fn fitting_size(&self, available: Size) -> Size {
        Size::new(available.width, 2.0 * LINE_HEIGHT)
    }

    fn become_first_responder(&mut self) -> bool {
        if self.refuses_focus {
            return false;
        }
        self.focused = true;
        true
    }

    fn resign_first_responder(&mut self) {
        self.focused = false;
    }

    fn is_first_responder(&self) -> bool {
        self.focused
    }

    fn neighboring_focus_eligibility_did_change(&mut self) {
        self.neighbor_changes += 1;
    }
}

/// A focusable single-line input.
#[derive(Clone, Debug, PartialEq)]
pub struct TextField {
    pub placeholder: String,
    pub value: String,
    pub enabled: bool,
    pub refuses_focus: bool,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: String::new(),
            enabled: true,
            refuses_focus: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The view declines first responder status.
    pub fn refusing_focus(mut self) -> Self {
        self.refuses_focus = true;
        self
    }
}

impl Renderable for TextField {
    type View = InputView;

    fn generate(&self) -> InputView {
        InputView::default()
    }

    fn render(&self, view: &mut InputView) {
        view.value.clone_from(&self.value);
        view.placeholder.clone_from(&self.placeholder);
        view.refuses_focus = self.refuses_focus;
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn Focusable>(this.clone());
    }
}

impl Focusable for TextField {
    fn focus_eligibility(&self) -> FocusEligibility {
        match (self.enabled, self.value.is_empty()) {
            (false, _) => FocusEligibility::Ineligible,
            (true, true) => FocusEligibility::Eligible(FocusStatus::Empty),
            (true, false) => FocusEligibility::Eligible(FocusStatus::Populated),
        }
    }
}

#[derive(Debug, Default)]
pub struct BadgeView {
    pub count: u32,
}

impl View for BadgeView {}

/// A row with its own view type, so it never shares containers with text.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub count: u32,
}

impl Renderable for Badge {
    type View = BadgeView;

    fn generate(&self) -> BadgeView {
        BadgeView::default()
    }

    fn render(&self, view: &mut BadgeView) {
        view.count = self.count;
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// A row that reports a fixed height through [`HeightCustomizing`].
#[derive(Clone, Debug, PartialEq)]
pub struct Spacer {
    pub height: f32,
}

impl Renderable for Spacer {
    type View = BadgeView;

    fn generate(&self) -> BadgeView {
        BadgeView::default()
    }

    fn render(&self, _view: &mut BadgeView) {}

    fn reuse_identifier(&self) -> String {
        "spacer".to_string()
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    fn capabilities(this: &Rc<Self>, registry: &mut CapabilityRegistry) {
        registry.insert::<dyn HeightCustomizing>(this.clone());
    }
}

impl HeightCustomizing for Spacer {
    fn height(&self, _width: f32, insets: EdgeInsets) -> f32 {
        self.height + insets.vertical()
    }

    fn estimated_height(&self, _width: f32, _insets: EdgeInsets) -> f32 {
        self.height
    }
}

/// A section of [`Text`] rows.
pub fn text_section<S>(id: S, rows: &[(u32, &str)]) -> Section<S, u32> {
    rows.iter()
        .fold(Section::new(id), |section, &(row, text)| {
            section.add_row(row, Text::new(text))
        })
}
