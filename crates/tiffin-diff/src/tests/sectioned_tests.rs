use super::*;
use crate::changeset::Move;

#[derive(Clone, Debug, PartialEq)]
struct Row {
    id: u32,
    value: u32,
}

#[derive(Clone, Debug)]
struct Group {
    id: &'static str,
    header: Option<&'static str>,
    rows: Vec<Row>,
}

fn group(id: &'static str, rows: &[u32]) -> Group {
    Group {
        id,
        header: None,
        rows: rows.iter().map(|&id| Row { id, value: 0 }).collect(),
    }
}

fn run(previous: &[Group], current: &[Group]) -> SectionedChangeset {
    diff_sections(
        previous,
        current,
        |section| section.id,
        |a, b| a.id == b.id && a.header == b.header,
        |section| section.rows.as_slice(),
        |row| row.id,
        |a, b| a == b,
    )
}

#[test]
fn scenario_items_reordered_within_a_section() {
    let previous = vec![group("a", &[1, 2, 3])];
    let current = vec![group("a", &[3, 1, 2, 4])];
    let changeset = run(&previous, &current);

    assert!(changeset.sections.is_empty());
    assert_eq!(changeset.mutated_sections.len(), 1);
    let section = &changeset.mutated_sections[0];
    assert_eq!((section.source, section.destination), (0, 0));
    assert!(section.changeset.removals.is_empty());
    assert_eq!(section.changeset.inserts, vec![3]);
    let moves: Vec<(usize, usize, bool)> = section
        .changeset
        .moves
        .iter()
        .map(|m| (m.source, m.destination, m.is_mutated))
        .collect();
    assert_eq!(moves, vec![(2, 0, false), (0, 1, false), (1, 2, false)]);
}

#[test]
fn scenario_sections_swapped() {
    let previous = vec![group("a", &[1]), group("b", &[2])];
    let current = vec![group("b", &[2]), group("a", &[1])];
    let changeset = run(&previous, &current);

    assert!(changeset.sections.inserts.is_empty());
    assert!(changeset.sections.removals.is_empty());
    assert_eq!(
        changeset.sections.moves,
        vec![
            Move {
                source: 1,
                destination: 0,
                is_mutated: false
            },
            Move {
                source: 0,
                destination: 1,
                is_mutated: false
            },
        ]
    );
    assert!(changeset
        .mutated_sections
        .iter()
        .all(|section| section.changeset.is_empty()));
    assert!(!changeset.is_empty());
}

#[test]
fn scenario_item_value_changed_in_place() {
    let previous = vec![Group {
        id: "a",
        header: None,
        rows: vec![Row { id: 1, value: 1 }],
    }];
    let current = vec![Group {
        id: "a",
        header: None,
        rows: vec![Row { id: 1, value: 2 }],
    }];
    let changeset = run(&previous, &current);
    let items = &changeset.mutated_sections[0].changeset;

    assert!(items.moves.is_empty());
    assert!(items.inserts.is_empty());
    assert!(items.removals.is_empty());
    assert_eq!(items.mutations, vec![IndexPair::new(0, 0)]);
}

#[test]
fn every_surviving_section_gets_an_item_changeset() {
    let previous = vec![group("a", &[1]), group("b", &[2]), group("c", &[3])];
    let current = vec![group("c", &[3]), group("d", &[]), group("a", &[1, 5])];
    let changeset = run(&previous, &current);

    let sources: Vec<usize> = changeset
        .mutated_sections
        .iter()
        .map(|section| section.source)
        .collect();
    assert_eq!(sources, vec![2, 0]);
    let destinations: Vec<usize> = changeset
        .mutated_sections
        .iter()
        .map(|section| section.destination)
        .collect();
    assert_eq!(destinations, vec![0, 2]);
    assert_eq!(changeset.sections.inserts, vec![1]);
    assert_eq!(changeset.sections.removals, vec![1]);

    let a = changeset.items_at_destination(2).expect("section a survives");
    assert_eq!(a.changeset.inserts, vec![1]);
    assert!(changeset.items_at_destination(1).is_none());
}

#[test]
fn header_change_shows_up_in_mutation_index_pairs() {
    let mut renamed = group("b", &[2]);
    renamed.header = Some("Renamed");
    let previous = vec![group("a", &[1]), group("b", &[2])];
    let current = vec![renamed.clone(), group("a", &[1])];
    let changeset = run(&previous, &current);

    assert_eq!(changeset.mutation_index_pairs(), vec![IndexPair::new(1, 0)]);

    let previous = vec![group("a", &[1]), group("b", &[2])];
    let current = vec![group("a", &[1]), renamed];
    let changeset = run(&previous, &current);
    assert_eq!(changeset.mutation_index_pairs(), vec![IndexPair::new(1, 1)]);
    assert!(changeset.sections.moves.is_empty());
}

#[test]
fn item_changes_do_not_mark_section_metadata_mutated() {
    let previous = vec![group("a", &[1, 2])];
    let current = vec![group("a", &[2])];
    let changeset = run(&previous, &current);

    assert!(changeset.mutation_index_pairs().is_empty());
    assert_eq!(changeset.mutated_sections[0].changeset.removals, vec![0]);
}

#[test]
fn identical_trees_produce_an_empty_changeset() {
    let tree = vec![group("a", &[1, 2]), group("b", &[3])];
    let changeset = run(&tree, &tree);
    assert!(changeset.is_empty());
    assert_eq!(changeset.mutated_sections.len(), 2);
}

#[test]
fn minimal_policy_applies_to_items_too() {
    let previous = vec![group("a", &[1, 2, 3])];
    let current = vec![group("a", &[3, 1, 2])];
    let changeset = diff_sections_with(
        &previous,
        &current,
        |section| section.id,
        |a, b| a.id == b.id,
        |section| section.rows.as_slice(),
        |row| row.id,
        |a, b| a == b,
        MovePolicy::Minimal,
    );
    assert_eq!(changeset.mutated_sections[0].changeset.moves.len(), 1);
}
