//! Main-axis justification of rigid children.

use flex_layout::{LayoutTree, NodeId};
use flex_style::{Direction, FlexDirection, Justify};

const CONTAINER: f32 = 300.0;
const ITEM: f32 = 50.0;

fn three_items_in_row(justify: Justify) -> (LayoutTree, Vec<NodeId>) {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.flex_direction = FlexDirection::Row;
        style.justify_content = justify;
        style.set_width(Some(CONTAINER));
        style.set_height(Some(ITEM));
    });

    let mut children = Vec::new();
    for index in 0..3 {
        let child = tree.new_node();
        tree.update_style(child, |style| {
            style.set_width(Some(ITEM));
            style.set_height(Some(ITEM));
        });
        tree.insert_child(root, child, index);
        children.push(child);
    }

    tree.calculate_layout(root, Some(CONTAINER), Some(ITEM), Direction::Ltr);
    (tree, children)
}

fn lefts(tree: &LayoutTree, children: &[NodeId]) -> Vec<f32> {
    children.iter().map(|c| tree.layout(*c).left()).collect()
}

fn assert_lefts(got: &[f32], expected: &[f32]) {
    for (value, want) in got.iter().zip(expected) {
        assert!(
            (value - want).abs() < 0.001,
            "expected {expected:?}, got {got:?}"
        );
    }
}

#[test]
fn flex_start_packs_to_the_leading_edge() {
    let (tree, children) = three_items_in_row(Justify::FlexStart);
    assert_lefts(&lefts(&tree, &children), &[0.0, 50.0, 100.0]);
}

#[test]
fn center_splits_the_remaining_space() {
    let (tree, children) = three_items_in_row(Justify::Center);
    assert_lefts(&lefts(&tree, &children), &[75.0, 125.0, 175.0]);
}

#[test]
fn flex_end_packs_to_the_trailing_edge() {
    let (tree, children) = three_items_in_row(Justify::FlexEnd);
    assert_lefts(&lefts(&tree, &children), &[150.0, 200.0, 250.0]);
}

#[test]
fn space_between_yields_equal_gaps() {
    let (tree, children) = three_items_in_row(Justify::SpaceBetween);
    let got = lefts(&tree, &children);
    assert_lefts(&got, &[0.0, 125.0, 250.0]);

    // Both internal gaps are equal.
    let gap_a = got[1] - (got[0] + ITEM);
    let gap_b = got[2] - (got[1] + ITEM);
    assert!((gap_a - gap_b).abs() < 0.001);
}

#[test]
fn space_around_gives_half_gaps_at_the_edges() {
    let (tree, children) = three_items_in_row(Justify::SpaceAround);
    let got = lefts(&tree, &children);
    assert_lefts(&got, &[25.0, 125.0, 225.0]);

    let leading_gap = got[0];
    let internal_gap = got[1] - (got[0] + ITEM);
    let trailing_gap = CONTAINER - (got[2] + ITEM);
    assert!((leading_gap - internal_gap / 2.0).abs() < 0.001);
    assert!((trailing_gap - internal_gap / 2.0).abs() < 0.001);
}

#[test]
fn single_item_space_between_stays_at_the_start() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.flex_direction = FlexDirection::Row;
        style.justify_content = Justify::SpaceBetween;
        style.set_width(Some(CONTAINER));
        style.set_height(Some(ITEM));
    });
    let only = tree.new_node();
    tree.update_style(only, |style| {
        style.set_width(Some(ITEM));
        style.set_height(Some(ITEM));
    });
    tree.insert_child(root, only, 0);

    tree.calculate_layout(root, Some(CONTAINER), Some(ITEM), Direction::Ltr);
    assert!(tree.layout(only).left().abs() < 0.001);
}

#[test]
fn justification_applies_along_a_column_too() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.justify_content = Justify::Center;
        style.set_width(Some(100.0));
        style.set_height(Some(300.0));
    });
    let child = tree.new_node();
    tree.update_style(child, |style| {
        style.set_width(Some(100.0));
        style.set_height(Some(60.0));
    });
    tree.insert_child(root, child, 0);

    tree.calculate_layout(root, Some(100.0), Some(300.0), Direction::Ltr);
    let top = tree.layout(child).top();
    assert!((top - 120.0).abs() < 0.001, "expected 120, got {top}");
}
