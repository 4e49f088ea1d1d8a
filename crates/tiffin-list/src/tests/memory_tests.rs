use super::*;
use tiffin_core::AnyRenderable;
use tiffin_testing::{InputView, Text, TextField, TextView};

/// Data source over plain rows, with an optional header per section.
#[derive(Default)]
struct Rows {
    sections: Vec<(Option<AnyRenderable>, Vec<AnyRenderable>)>,
}

impl Rows {
    fn new(sections: &[&[&str]]) -> Self {
        Self {
            sections: sections
                .iter()
                .map(|rows| (None, rows.iter().map(|text| AnyRenderable::new(Text::new(*text))).collect()))
                .collect(),
        }
    }

    fn with_header(mut self, section: usize, text: &str) -> Self {
        self.sections[section].0 = Some(AnyRenderable::new(Text::new(text)));
        self
    }
}

impl DataSource for Rows {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |(_, rows)| rows.len())
    }

    fn item_reuse_identifier(&self, path: IndexPath) -> Option<&str> {
        self.sections
            .get(path.section)?
            .1
            .get(path.item)
            .map(AnyRenderable::reuse_identifier)
    }

    fn supplementary_reuse_identifier(&self, kind: SupplementaryKind, section: usize) -> Option<&str> {
        match kind {
            SupplementaryKind::Header => self.sections.get(section)?.0.as_ref().map(AnyRenderable::reuse_identifier),
            SupplementaryKind::Footer => None,
        }
    }

    fn bind_item(&self, container: &mut Container, path: IndexPath) {
        container.bind(&self.sections[path.section].1[path.item]);
    }

    fn bind_supplementary(&self, container: &mut Container, _kind: SupplementaryKind, section: usize) {
        if let Some(header) = &self.sections[section].0 {
            container.bind(header);
        }
    }

    fn will_display(&self, _container: &mut Container) {}

    fn did_end_displaying(&self, _container: &mut Container) {}
}

fn text_at(view: &MemoryListView, path: IndexPath) -> Option<&str> {
    view.item_container(path)?
        .typed_view::<TextView>()
        .map(|view| view.text.as_str())
}

#[test]
fn reload_binds_only_the_visible_window() {
    let source = Rows::new(&[&["a", "b"], &["c", "d", "e"]]).with_header(1, "Second");
    let mut view = MemoryListView::new(4);
    view.reload_data(&source);

    assert_eq!(view.section_count(), 2);
    assert_eq!(view.item_count(1), 3);
    assert_eq!(
        view.visible_paths(),
        vec![IndexPath::new(0, 0), IndexPath::new(0, 1), IndexPath::new(1, 0)]
    );
    assert!(view
        .supplementary_container(SupplementaryKind::Header, 1)
        .is_some());
    assert_eq!(text_at(&view, IndexPath::new(1, 0)), Some("c"));
    assert_eq!(view.ops(), &[ListOp::ReloadData]);
}

#[test]
fn scrolling_recycles_containers() {
    let source = Rows::new(&[&["a", "b", "c", "d", "e", "f"]]);
    let mut view = MemoryListView::new(2);
    view.reload_data(&source);

    view.set_first_visible_row(4, &source);

    assert_eq!(
        view.visible_paths(),
        vec![IndexPath::new(0, 4), IndexPath::new(0, 5)]
    );
    assert_eq!(text_at(&view, IndexPath::new(0, 4)), Some("e"));
    assert_eq!(view.pool().stats().created, 2);
    assert_eq!(view.pool().stats().reused, 2);
    let recycled = view
        .item_container(IndexPath::new(0, 5))
        .and_then(|container| container.typed_view::<TextView>())
        .map(|view| view.reuses);
    assert_eq!(recycled, Some(1));
}

#[test]
fn batch_moves_carry_containers() {
    let mut source = Rows::new(&[&["a", "b", "c"]]);
    let mut view = MemoryListView::new(10);
    view.reload_data(&source);

    source.sections[0].1.rotate_right(1);
    view.begin_updates();
    view.move_item(IndexPath::new(0, 2), IndexPath::new(0, 0));
    view.end_updates(&source, false);

    assert_eq!(text_at(&view, IndexPath::new(0, 0)), Some("c"));
    assert_eq!(text_at(&view, IndexPath::new(0, 1)), Some("a"));
    assert_eq!(view.pool().stats().created, 3);
    let renders: Vec<usize> = (0..3)
        .filter_map(|item| {
            view.item_container(IndexPath::new(0, item))
                .map(|container| container.bind_count())
        })
        .collect();
    assert_eq!(renders, vec![1, 1, 1]);
}

#[test]
fn batch_deletes_and_inserts_sections() {
    let mut source = Rows::new(&[&["a"], &["b"]]);
    let mut view = MemoryListView::new(10);
    view.reload_data(&source);

    source.sections.remove(0);
    source.sections.push((None, vec![AnyRenderable::new(Text::new("z"))]));
    view.begin_updates();
    view.delete_sections(&[0]);
    view.insert_sections(&[1]);
    view.end_updates(&source, true);

    assert_eq!(text_at(&view, IndexPath::new(0, 0)), Some("b"));
    assert_eq!(text_at(&view, IndexPath::new(1, 0)), Some("z"));
    assert_eq!(view.pool().stats().reused, 1);
    assert_eq!(view.structural_op_count(), 3);
}

#[test]
#[should_panic(expected = "invalid batch update")]
fn item_count_mismatch_is_rejected() {
    let mut source = Rows::new(&[&["a", "b"]]);
    let mut view = MemoryListView::new(10);
    view.reload_data(&source);

    source.sections[0].1.pop();
    view.begin_updates();
    view.end_updates(&source, true);
}

#[test]
#[should_panic(expected = "invalid batch update")]
fn section_count_mismatch_is_rejected() {
    let mut source = Rows::new(&[&["a"]]);
    let mut view = MemoryListView::new(10);
    view.reload_data(&source);

    source.sections.push((None, Vec::new()));
    view.begin_updates();
    view.end_updates(&source, true);
}

#[test]
#[should_panic(expected = "outside begin_updates/end_updates")]
fn structural_update_needs_a_batch() {
    let mut view = MemoryListView::new(10);
    view.insert_sections(&[0]);
}

#[test]
#[should_panic(expected = "two updates target")]
fn two_updates_cannot_land_on_one_row() {
    let mut source = Rows::new(&[&["a", "b"]]);
    let mut view = MemoryListView::new(10);
    view.reload_data(&source);

    source.sections[0].1.push(AnyRenderable::new(Text::new("c")));
    view.begin_updates();
    view.insert_items(&[IndexPath::new(0, 0)]);
    view.move_item(IndexPath::new(0, 1), IndexPath::new(0, 0));
    view.end_updates(&source, true);
}

#[test]
fn scroll_to_item_brings_the_row_on_screen() {
    let source = Rows::new(&[&["a", "b"], &["c", "d", "e"]]).with_header(1, "Second");
    let mut view = MemoryListView::new(2);
    view.reload_data(&source);

    view.scroll_to_item(IndexPath::new(1, 2), &source, true);
    assert_eq!(view.first_visible_row(), 4);
    assert_eq!(text_at(&view, IndexPath::new(1, 2)), Some("e"));

    view.scroll_to_item(IndexPath::new(0, 1), &source, false);
    assert_eq!(view.first_visible_row(), 1);
    assert_eq!(
        &view.ops()[1..],
        &[
            ListOp::ScrollToItem {
                path: IndexPath::new(1, 2),
                animated: true
            },
            ListOp::ScrollToItem {
                path: IndexPath::new(0, 1),
                animated: false
            },
        ]
    );
}

#[test]
fn focus_moves_between_rows_and_resigns_off_screen() {
    let fields = |count: usize| Rows {
        sections: vec![(
            None,
            (0..count)
                .map(|index| AnyRenderable::new(TextField::new(format!("field {index}"))))
                .collect(),
        )],
    };
    let source = fields(3);
    let mut view = MemoryListView::new(2);
    view.reload_data(&source);

    assert!(view.focus_item(IndexPath::new(0, 0)));
    assert_eq!(view.focused_path(), Some(IndexPath::new(0, 0)));
    assert!(view.focus_item(IndexPath::new(0, 1)));
    assert_eq!(view.focused_path(), Some(IndexPath::new(0, 1)));
    assert!(!view.focus_item(IndexPath::new(0, 2)), "off-screen rows cannot focus");

    view.set_first_visible_row(2, &source);
    assert_eq!(view.focused_path(), None);
    let focused = view
        .item_container(IndexPath::new(0, 2))
        .and_then(|container| container.typed_view::<InputView>())
        .map(|input| input.focused);
    assert_eq!(focused, Some(false));

    view.resign_focus();
    assert_eq!(view.ops().last(), Some(&ListOp::Focus(IndexPath::new(0, 1))));
}

#[test]
fn refused_focus_is_not_recorded() {
    let source = Rows {
        sections: vec![(
            None,
            vec![AnyRenderable::new(TextField::new("locked").refusing_focus())],
        )],
    };
    let mut view = MemoryListView::new(2);
    view.reload_data(&source);

    assert!(!view.focus_item(IndexPath::new(0, 0)));
    assert_eq!(view.ops(), &[ListOp::ReloadData]);
}

#[test]
fn structural_ops_are_classified() {
    assert!(ListOp::ReloadItems(Vec::new()).is_structural());
    assert!(ListOp::MoveSection { from: 0, to: 1 }.is_structural());
    assert!(!ListOp::BeginUpdates.is_structural());
    assert!(!ListOp::Focus(IndexPath::new(0, 0)).is_structural());
    assert!(!ListOp::ScrollToItem {
        path: IndexPath::new(0, 0),
        animated: true
    }
    .is_structural());
}
