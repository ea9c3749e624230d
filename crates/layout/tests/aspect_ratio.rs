//! The aspect-ratio style: deriving one axis from the other.

use flex_layout::LayoutTree;
use flex_style::{Align, Direction, FlexDirection, PositionType};

#[test]
fn row_item_derives_height_from_width() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.flex_direction = FlexDirection::Row;
        style.align_items = Align::FlexStart;
        style.set_width(Some(300.0));
        style.set_height(Some(300.0));
    });
    let child = tree.new_node();
    tree.update_style(child, |style| {
        style.set_width(Some(100.0));
        style.aspect_ratio = Some(0.5);
    });
    tree.insert_child(root, child, 0);

    tree.calculate_layout(root, Some(300.0), Some(300.0), Direction::Ltr);

    let layout = tree.layout(child);
    assert!((layout.width() - 100.0).abs() < 0.001);
    assert!((layout.height() - 50.0).abs() < 0.001);
}

#[test]
fn column_item_derives_width_from_height() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.align_items = Align::FlexStart;
        style.set_width(Some(300.0));
        style.set_height(Some(300.0));
    });
    let child = tree.new_node();
    tree.update_style(child, |style| {
        style.set_height(Some(80.0));
        style.aspect_ratio = Some(0.5);
    });
    tree.insert_child(root, child, 0);

    tree.calculate_layout(root, Some(300.0), Some(300.0), Direction::Ltr);

    let layout = tree.layout(child);
    assert!((layout.height() - 80.0).abs() < 0.001);
    assert!((layout.width() - 40.0).abs() < 0.001);
}

#[test]
fn absolute_child_completes_its_open_axis_from_the_ratio() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.set_width(Some(200.0));
        style.set_height(Some(200.0));
    });
    let child = tree.new_node();
    tree.update_style(child, |style| {
        style.position_type = PositionType::Absolute;
        style.set_width(Some(60.0));
        style.aspect_ratio = Some(2.0);
    });
    tree.insert_child(root, child, 0);

    tree.calculate_layout(root, Some(200.0), Some(200.0), Direction::Ltr);

    let layout = tree.layout(child);
    assert!((layout.width() - 60.0).abs() < 0.001);
    assert!((layout.height() - 120.0).abs() < 0.001);
}
