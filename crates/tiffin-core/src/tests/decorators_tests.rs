use super::*;
use std::cell::{Cell, RefCell};

use crate::test_support::{Field, Label, LabelView};
use crate::{Container, FocusStatus};

fn label(text: &'static str) -> AnyRenderable {
    AnyRenderable::new(Label(text))
}

fn red(view: &mut LabelView) {
    view.color = "red";
}

#[test]
fn deletable_exposes_text_and_callback() {
    let deleted = Rc::new(Cell::new(false));
    let flag = deleted.clone();
    let row = label("x").deletable("Remove", move || flag.set(true));

    let deletable = row.cast::<dyn Deletable>().expect("deletable");
    assert_eq!(deletable.delete_action_text(), "Remove");
    deletable.delete();
    assert!(deleted.get());
}

#[test]
fn decorators_forward_identity_and_rendering() {
    let row = label("inner").accessory(Accessory::Checkmark);
    assert_eq!(row.reuse_identifier(), label("inner").reuse_identifier());
    assert_eq!(row.component_name(), label("inner").component_name());
    assert_ne!(row.component_type(), label("inner").component_type());

    let mut view = row.generate();
    row.render(view.as_mut());
    assert_eq!(view.downcast_ref::<LabelView>().map(|v| v.text.as_str()), Some("inner"));
}

#[test]
fn lookup_walks_the_chain_and_the_outermost_wins() {
    let row = AnyRenderable::new(Field::new("filled"))
        .accessory(Accessory::DisclosureIndicator)
        .custom_input(label("picker"), FocusEligibility::Eligible(FocusStatus::Empty))
        .accessory(Accessory::Checkmark);

    assert_eq!(
        row.cast::<dyn AccessoryProviding>().map(|a| a.accessory()),
        Some(Accessory::Checkmark)
    );
    assert_eq!(
        row.cast::<dyn Focusable>().map(|f| f.focus_eligibility()),
        Some(FocusEligibility::Eligible(FocusStatus::Empty))
    );
    assert_eq!(
        row.cast::<dyn CustomInputProviding>().map(|c| c.custom_input()),
        Some(label("picker"))
    );
    assert!(row.cast::<dyn Deletable>().is_none());
}

#[test]
fn inner_capabilities_stay_reachable_through_unrelated_decorators() {
    let row = AnyRenderable::new(Field::new("")).selectable(|| {});
    assert!(row.supports::<dyn Focusable>());
    assert!(row.supports::<dyn Selectable>());
    assert!(row.cast::<dyn Selectable>().is_some_and(|s| s.should_highlight()));
}

#[test]
fn selection_without_highlight() {
    let selected = Rc::new(Cell::new(0));
    let counter = selected.clone();
    let row = label("x").selectable_without_highlight(move || counter.set(counter.get() + 1));
    let selectable = row.cast::<dyn Selectable>().expect("selectable");

    assert!(!selectable.should_highlight());
    selectable.did_select();
    assert_eq!(selected.get(), 1);
}

#[test]
fn lifecycle_callbacks_fire() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let will = events.clone();
    let did = events.clone();
    let row = label("x").on_display(
        ComponentLifecycle::new()
            .will_display(move || will.borrow_mut().push("will"))
            .did_end_displaying(move || did.borrow_mut().push("did")),
    );

    let lifecycle = row.cast::<dyn ComponentLifecycleAware>().expect("lifecycle");
    lifecycle.will_display();
    lifecycle.did_end_displaying();
    assert_eq!(*events.borrow(), vec!["will", "did"]);
}

#[test]
fn view_lifecycle_callbacks_see_the_view() {
    let row = label("x").on_view_display(ViewLifecycle::new().will_display(|view| {
        if let Some(label) = view.downcast_mut::<LabelView>() {
            label.text = "displayed".to_string();
        }
    }));
    let mut view = row.generate();

    let lifecycle = row.cast::<dyn ViewLifecycleAware>().expect("view lifecycle");
    lifecycle.will_display(view.as_mut());
    lifecycle.did_end_displaying(view.as_mut());
    assert_eq!(
        view.downcast_ref::<LabelView>().map(|v| v.text.as_str()),
        Some("displayed")
    );
}

#[test]
fn menu_items_and_height() {
    let row = label("x")
        .menu_items(vec![MenuItem::new("Copy", || {}), MenuItem::new("Share", || {})])
        .fixed_height(44.0);

    let titles: Vec<String> = row
        .cast::<dyn MenuItemsResponding>()
        .map(|m| m.menu_items().into_iter().map(|item| item.title).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["Copy", "Share"]);

    let height = row.cast::<dyn HeightCustomizing>().expect("height");
    assert_eq!(height.height(320.0, EdgeInsets::ZERO), 44.0);
    assert_eq!(height.estimated_height(320.0, EdgeInsets::ZERO), 44.0);
}

#[test]
fn styled_component_is_unstyled_when_the_view_is_rebound() {
    let mut container = Container::new(label("x").reuse_identifier());

    container.bind(&label("styled").styled::<LabelView>(red));
    assert_eq!(container.typed_view::<LabelView>().map(|v| v.color), Some("red"));

    container.bind(&label("plain"));
    let view = container.typed_view::<LabelView>().expect("label view");
    assert_eq!(view.color, "black");
    assert_eq!(view.text, "plain");
}

#[test]
fn nested_styles_unwind_in_order() {
    let mut container = Container::new(label("x").reuse_identifier());
    let styled = label("x")
        .styled::<LabelView>(red)
        .styled::<LabelView>(|view: &mut LabelView| view.color = "blue");

    container.bind(&styled);
    assert_eq!(container.typed_view::<LabelView>().map(|v| v.color), Some("blue"));

    container.bind(&styled);
    assert_eq!(container.typed_view::<LabelView>().map(|v| v.color), Some("blue"));

    container.unbind();
    assert_eq!(container.typed_view::<LabelView>().map(|v| v.color), Some("black"));
}

#[test]
fn decorated_equality_compares_base_and_visible_data() {
    let checkmark = |text| label(text).accessory(Accessory::Checkmark);
    assert_eq!(checkmark("a"), checkmark("a"));
    assert_ne!(checkmark("a"), checkmark("b"));
    assert_ne!(checkmark("a"), label("a").accessory(Accessory::DetailButton));
    assert_ne!(checkmark("a"), label("a"));
    assert_ne!(checkmark("a"), label("a").selectable(|| {}));
}

#[test]
fn callbacks_do_not_affect_equality() {
    assert_eq!(
        label("a").deletable("Delete", || {}),
        label("a").deletable("Delete", || {})
    );
}

#[test]
fn custom_input_compares_eligibility_and_input() {
    let input = |value, status| {
        label("date").custom_input(label(value), FocusEligibility::Eligible(status))
    };
    assert_eq!(
        input("picker", FocusStatus::Empty),
        input("picker", FocusStatus::Empty)
    );
    assert_ne!(
        input("picker", FocusStatus::Empty),
        input("picker", FocusStatus::Populated)
    );
    assert_ne!(
        input("2024-01-01", FocusStatus::Populated),
        input("2025-06-30", FocusStatus::Populated)
    );
}

#[test]
fn fixed_heights_compare_by_value_and_computed_heights_never_match() {
    assert_eq!(label("a").fixed_height(44.0), label("a").fixed_height(44.0));
    assert_ne!(label("a").fixed_height(44.0), label("a").fixed_height(88.0));
    assert_ne!(label("a").height(|_, _| 44.0), label("a").height(|_, _| 44.0));
}

#[test]
fn styles_compare_by_identity() {
    let style: Rc<dyn Style<LabelView>> = Rc::new(red);
    let shared = Styling::<LabelView> {
        style: style.clone(),
        view: PhantomData,
    };
    let same = Styling::<LabelView> {
        style,
        view: PhantomData,
    };
    assert!(shared.same_as(&same));
    assert_ne!(label("a").styled::<LabelView>(red), label("a").styled::<LabelView>(red));
}
