//! Min/max dimensions and the padding+border floor on measured sizes.

use flex_layout::LayoutTree;
use flex_style::{Direction, Edge, FlexDirection};

#[test]
fn measured_size_never_drops_below_padding_and_border() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.padding.set(Edge::All, Some(10.0));
        style.border.set(Edge::All, Some(2.0));
    });

    // No dimensions, no children, no constraints: the box is its own
    // padding and border.
    tree.calculate_layout(root, None, None, Direction::Ltr);

    let layout = tree.layout(root);
    assert!((layout.width() - 24.0).abs() < 0.001);
    assert!((layout.height() - 24.0).abs() < 0.001);
}

#[test]
fn requested_size_clamps_into_the_min_max_interval() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.set_width(Some(500.0));
        style.set_height(Some(5.0));
        style.set_max_width(Some(300.0));
        style.set_min_height(Some(50.0));
    });

    tree.calculate_layout(root, Some(500.0), Some(5.0), Direction::Ltr);

    let layout = tree.layout(root);
    assert!((layout.width() - 300.0).abs() < 0.001);
    assert!((layout.height() - 50.0).abs() < 0.001);
}

#[test]
fn max_height_bounds_content_driven_sizing() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.set_width(Some(100.0));
        style.set_max_height(Some(120.0));
    });
    for index in 0..4 {
        let child = tree.new_node();
        tree.update_style(child, |style| {
            style.set_height(Some(50.0));
        });
        tree.insert_child(root, child, index);
    }

    // 4 x 50 of content against a 120 max.
    tree.calculate_layout(root, Some(100.0), None, Direction::Ltr);

    let height = tree.layout(root).height();
    assert!((height - 120.0).abs() < 0.001, "expected 120, got {height}");
}

#[test]
fn min_height_stretches_content_driven_sizing() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.set_width(Some(100.0));
        style.set_min_height(Some(80.0));
    });
    let child = tree.new_node();
    tree.update_style(child, |style| {
        style.set_height(Some(30.0));
    });
    tree.insert_child(root, child, 0);

    tree.calculate_layout(root, Some(100.0), None, Direction::Ltr);

    let height = tree.layout(root).height();
    assert!((height - 80.0).abs() < 0.001, "expected 80, got {height}");
}

#[test]
fn child_min_max_bound_the_flexed_size() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.flex_direction = FlexDirection::Row;
        style.set_width(Some(400.0));
        style.set_height(Some(50.0));
    });

    let clamped = tree.new_node();
    tree.update_style(clamped, |style| {
        style.flex = Some(1.0);
        style.set_min_width(Some(120.0));
        style.set_max_width(Some(150.0));
    });
    let free = tree.new_node();
    tree.update_style(free, |style| {
        style.flex = Some(1.0);
    });
    tree.insert_child(root, clamped, 0);
    tree.insert_child(root, free, 1);

    tree.calculate_layout(root, Some(400.0), Some(50.0), Direction::Ltr);

    let clamped_width = tree.layout(clamped).width();
    assert!(
        clamped_width >= 120.0 - 0.001 && clamped_width <= 150.0 + 0.001,
        "width {clamped_width} escaped its bounds"
    );
    let total = clamped_width + tree.layout(free).width();
    assert!((total - 400.0).abs() < 0.001);
}

#[test]
fn entry_point_uses_max_dimensions_as_an_upper_bound() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.update_style(root, |style| {
        style.flex_direction = FlexDirection::Row;
        style.set_max_width(Some(250.0));
        style.set_height(Some(40.0));
    });
    for index in 0..2 {
        let child = tree.new_node();
        tree.update_style(child, |style| {
            style.set_width(Some(100.0));
            style.set_height(Some(40.0));
        });
        tree.insert_child(root, child, index);
    }

    // No available width given: the max dimension caps content sizing.
    tree.calculate_layout(root, None, Some(40.0), Direction::Ltr);

    let width = tree.layout(root).width();
    assert!((width - 200.0).abs() < 0.001, "expected 200, got {width}");
}
