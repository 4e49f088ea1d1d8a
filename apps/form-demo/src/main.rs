use std::cell::RefCell;
use std::rc::Rc;

use tiffin_core::{
    CapabilityRegistry, FocusEligibility, FocusStatus, Focusable, IndexPath, IntoAnyRenderable,
    Renderable, Section, Size, Tree, View,
};
use tiffin_list::{
    registry, FocusCoordinator, FocusToolbar, ListView, MemoryListView, ToolbarAction,
};

#[derive(Debug, Default)]
struct LabelView {
    text: String,
}

impl View for LabelView {
    fn fitting_size(&self, available: Size) -> Size {
        Size::new(available.width, 22.0 * self.text.lines().count().max(1) as f32)
    }
}

#[derive(Clone, PartialEq)]
struct Label(String);

impl Renderable for Label {
    type View = LabelView;

    fn generate(&self) -> LabelView {
        LabelView::default()
    }

    fn render(&self, view: &mut LabelView) {
        view.text.clone_from(&self.0);
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

#[derive(Debug, Default)]
struct FieldView {
    title: String,
    value: String,
    focused: bool,
}

impl View for FieldView {
    fn fitting_size(&self, available: Size) -> Size {
        Size::new(available.width, 44.0)
    }

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

    fn neighboring_focus_eligibility_did_change(&mut self) {
        log::trace!("{}: neighbours changed", self.title);
    }
}

#[derive(Clone, PartialEq)]
struct Field {
    title: &'static str,
    value: String,
}

impl Renderable for Field {
    type View = FieldView;

    fn generate(&self) -> FieldView {
        FieldView::default()
    }

    fn render(&self, view: &mut FieldView) {
        view.title = self.title.to_string();
        view.value.clone_from(&self.value);
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

#[derive(Default)]
struct Signup {
    name: String,
    email: String,
    password: String,
    accepted: bool,
}

impl Signup {
    fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if !self.email.is_empty() && !self.email.contains('@') {
            problems.push("Email needs an @");
        }
        if !self.password.is_empty() && self.password.len() < 8 {
            problems.push("Password needs 8 characters");
        }
        problems
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SectionId {
    Account,
    Problems,
    Terms,
}

fn form(state: &Rc<RefCell<Signup>>) -> Tree<SectionId, &'static str> {
    let signup = state.borrow();
    let field = |title: &'static str, value: &str| Field {
        title,
        value: value.to_string(),
    };
    let mut tree = Tree::new().add_section(
        Section::new(SectionId::Account)
            .with_header(Label("Account".into()))
            .add_row("name", field("Name", &signup.name))
            .add_row("email", field("Email", &signup.email))
            .add_row("password", field("Password", &signup.password)),
    );

    let problems = signup.problems();
    if !problems.is_empty() {
        let section = problems
            .into_iter()
            .fold(Section::new(SectionId::Problems), |section, problem| {
                section.add_row(problem, Label(problem.to_string()))
            });
        tree = tree.add_section(section);
    }

    let toggle = state.clone();
    let terms = Label(if signup.accepted {
        "Terms accepted".to_string()
    } else {
        "Accept the terms".to_string()
    })
    .into_any()
    .selectable(move || {
        let mut signup = toggle.borrow_mut();
        signup.accepted = !signup.accepted;
    });
    tree.add_section(
        Section::new(SectionId::Terms)
            .add_row("terms", terms)
            .with_footer(Label("You can change this later".into())),
    )
}

fn render(view: &mut MemoryListView, state: &Rc<RefCell<Signup>>) {
    registry::render(view, form(state), true);
    let ops = view.take_ops();
    log::info!("render issued {} list operations", ops.len());
    for op in ops {
        log::debug!("  {op:?}");
    }
}

fn tap(view: &mut MemoryListView, toolbar: &mut FocusToolbar, action: ToolbarAction) {
    let id = view.id();
    let moved = registry::with_adapter::<SectionId, &'static str, _>(id, |adapter| {
        let mut coordinator = FocusCoordinator::new(adapter, &mut *view);
        toolbar.handle(action, &mut coordinator)
    });
    match moved {
        Ok(moved) => log::info!(
            "{action:?}: moved {moved}, focus at {:?}, back {} next {}",
            view.focused_path(),
            toolbar.can_go_backward(),
            toolbar.can_go_forward()
        ),
        Err(err) => log::error!("toolbar {action:?} failed: {err}"),
    }
}

fn main() {
    env_logger::init();

    let state = Rc::new(RefCell::new(Signup::default()));
    let mut view = MemoryListView::new(6);
    let mut toolbar = FocusToolbar::new();

    render(&mut view, &state);

    tap(&mut view, &mut toolbar, ToolbarAction::Forward);
    state.borrow_mut().name = "Ada".into();
    render(&mut view, &state);

    tap(&mut view, &mut toolbar, ToolbarAction::Forward);
    state.borrow_mut().email = "ada.example.org".into();
    state.borrow_mut().password = "secret".into();
    render(&mut view, &state);

    state.borrow_mut().email = "ada@example.org".into();
    state.borrow_mut().password = "correct horse".into();
    render(&mut view, &state);

    let terms = IndexPath::new(1, 0);
    match registry::select_item::<SectionId, &'static str>(view.id(), terms) {
        Ok(true) => render(&mut view, &state),
        Ok(false) => log::warn!("{terms} ignored the tap"),
        Err(err) => log::error!("selection failed: {err}"),
    }

    tap(&mut view, &mut toolbar, ToolbarAction::Done);
    let pool = view.pool().stats();
    log::info!(
        "containers created {}, reused {}, returned {}",
        pool.created,
        pool.reused,
        pool.enqueued
    );
}
