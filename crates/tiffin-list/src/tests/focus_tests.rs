use super::*;
use crate::memory::ListOp;
use crate::testing::ListTestRule;
use tiffin_core::Tree;
use tiffin_testing::{Text, TextField};

type Rule = ListTestRule<&'static str, u32>;

/// Disabled, empty and populated fields, in that order.
fn mixed_form() -> Tree<&'static str, u32> {
    Tree::new().add_section(
        Section::new("form")
            .add_row(1, TextField::new("Disabled").disabled())
            .add_row(2, TextField::new("Empty"))
            .add_row(3, TextField::new("Filled").with_value("Ada")),
    )
}

fn empty_fields(count: u32) -> Tree<&'static str, u32> {
    let section = (0..count).fold(Section::new("form"), |section, id| {
        section.add_row(id, TextField::new(format!("Field {id}")))
    });
    Tree::new().add_section(section)
}

#[test]
fn traversal_honours_eligibility_and_skipping() {
    let tree = mixed_form();
    let sections = tree.sections();
    let path = |item| IndexPath::new(0, item);

    assert_eq!(
        find_focus_target(sections, None, FocusDirection::Forward, true),
        Some(path(1))
    );
    assert_eq!(
        find_focus_target(sections, None, FocusDirection::Forward, false),
        Some(path(1))
    );
    assert_eq!(
        find_focus_target(sections, Some(path(1)), FocusDirection::Forward, true),
        None
    );
    assert_eq!(
        find_focus_target(sections, Some(path(1)), FocusDirection::Forward, false),
        Some(path(2))
    );
    assert_eq!(
        find_focus_target(sections, Some(path(2)), FocusDirection::Backward, false),
        Some(path(1))
    );
    assert_eq!(
        find_focus_target(sections, Some(path(1)), FocusDirection::Backward, false),
        None
    );
}

#[test]
fn traversal_crosses_sections() {
    let tree: Tree<&str, u32> = Tree::new()
        .add_section(Section::new("a").add_row(1, TextField::new("First")))
        .add_section(
            Section::new("b")
                .add_row(2, Text::new("label"))
                .add_row(3, TextField::new("Off").disabled()),
        )
        .add_section(Section::new("c").add_row(4, TextField::new("Last")));

    assert_eq!(
        find_focus_target(
            tree.sections(),
            Some(IndexPath::new(0, 0)),
            FocusDirection::Forward,
            false
        ),
        Some(IndexPath::new(2, 0))
    );
    assert_eq!(
        find_focus_target(tree.sections(), None, FocusDirection::Backward, false),
        Some(IndexPath::new(2, 0))
    );
}

#[test]
fn moving_focus_follows_the_tree() {
    let mut rule = Rule::new(10);
    rule.render(mixed_form());

    assert!(rule.move_focus(FocusDirection::Forward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 1)));
    assert!(rule.move_focus(FocusDirection::Forward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 2)));
    assert!(!rule.can_move(FocusDirection::Forward));
    assert!(rule.move_focus(FocusDirection::Backward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 1)));
}

#[test]
fn skipping_populated_rows() {
    let mut rule = Rule::new(10).skipping_populated(true);
    rule.render(mixed_form());

    assert!(rule.move_focus(FocusDirection::Forward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 1)));
    assert!(!rule.move_focus(FocusDirection::Forward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 1)));
}

#[test]
fn off_screen_target_is_scrolled_to_before_focusing() {
    let mut rule = Rule::new(2);
    rule.render(empty_fields(4));
    assert!(rule.focus(IndexPath::new(0, 0)));

    assert!(rule.move_focus(FocusDirection::Forward));
    assert!(rule.move_focus(FocusDirection::Forward));

    let target = IndexPath::new(0, 2);
    assert_eq!(rule.focused_path(), Some(target));
    assert_eq!(rule.view().first_visible_row(), 1);
    let tail = &rule.view().ops()[rule.view().ops().len() - 2..];
    assert_eq!(
        tail,
        &[
            ListOp::ScrollToItem {
                path: target,
                animated: true
            },
            ListOp::Focus(target),
        ]
    );
}

#[test]
fn refused_focus_reports_failure() {
    let mut rule = Rule::new(10);
    rule.render(
        Tree::new().add_section(
            Section::new("form").add_row(1, TextField::new("Locked").refusing_focus()),
        ),
    );

    assert!(rule.can_move(FocusDirection::Forward));
    assert!(!rule.move_focus(FocusDirection::Forward));
    assert_eq!(rule.focused_path(), None);
}

#[test]
fn toolbar_tracks_position_and_moves_focus() {
    let mut rule = Rule::new(10);
    rule.render(empty_fields(3));
    assert!(rule.focus(IndexPath::new(0, 0)));

    assert!(rule.refresh_toolbar());
    assert!(!rule.toolbar().can_go_backward());
    assert!(rule.toolbar().can_go_forward());
    assert!(!rule.refresh_toolbar());

    assert!(rule.tap(ToolbarAction::Forward));
    assert_eq!(rule.focused_path(), Some(IndexPath::new(0, 1)));
    assert!(rule.toolbar().can_go_backward());
    assert!(rule.toolbar().can_go_forward());

    assert!(rule.tap(ToolbarAction::Forward));
    assert!(!rule.toolbar().can_go_forward());

    assert!(!rule.tap(ToolbarAction::Forward));
    assert_eq!(rule.focused_path(), None);
    assert_eq!(rule.view().ops().last(), Some(&ListOp::ResignFocus));
}

#[test]
fn done_resigns_focus() {
    let mut rule = Rule::new(10);
    rule.render(empty_fields(2));
    assert!(rule.focus(IndexPath::new(0, 1)));

    assert!(!rule.tap(ToolbarAction::Done));
    assert_eq!(rule.focused_path(), None);
}
