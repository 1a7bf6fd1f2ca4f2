// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wire path editing and measurement tests

use anyhow::Result;
use approx::assert_relative_eq;
use bendprep::wire::{
    EditMode, Editor, Handle, PathCollection, Segment, SegmentKind, WirePath, PALETTE,
};
use bendprep::WireError;
use nalgebra::Point2;

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

/// Line, line, curve drawn left to right through the editor
fn drawn() -> Editor {
    let mut editor = Editor::new(PathCollection::new());

    editor.set_add_mode(SegmentKind::Line);
    assert!(editor.click(p(0.0, 0.0)));
    assert_eq!(editor.mode(), EditMode::Idle);

    editor.set_add_mode(SegmentKind::Curve);
    assert!(editor.click(p(101.0, 2.0)));

    editor.set_add_mode(SegmentKind::Line);
    assert!(editor.click(p(-3.0, 1.0)));

    editor
}

#[test]
fn test_editor_builds_connected_path() {
    let editor = drawn();
    let collection = editor.collection();
    assert_eq!(collection.len(), 1);

    let segments = collection.paths()[0].segments();
    assert_eq!(
        segments,
        &[
            Segment::line(p(-100.0, 0.0), p(0.0, 0.0)),
            Segment::line(p(0.0, 0.0), p(100.0, 0.0)),
            Segment::curve(p(100.0, 0.0), p(150.0, 50.0), p(200.0, 0.0)),
        ]
    );
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    assert_eq!(
        collection.add_points(),
        vec![p(-100.0, 0.0), p(200.0, 0.0)]
    );
}

#[test]
fn test_bend_schedule_of_drawn_path() {
    let editor = drawn();
    let schedule = editor.collection().paths()[0].bend_schedule(20);

    println!("Schedule: {:?}", schedule);
    assert_eq!(schedule.len(), 3);
    assert_relative_eq!(schedule[0].feed, 100.0);
    assert_relative_eq!(schedule[0].bend.unwrap(), 0.0, epsilon = 1e-12);
    // Curve leaves towards its control point at 45° counter-clockwise
    assert_relative_eq!(schedule[1].bend.unwrap(), 45.0, epsilon = 1e-9);
    assert!(schedule[2].feed > 100.0);
    assert!(schedule[2].bend.is_none());
}

#[test]
fn test_snip_splits_path_and_reshapes_curve() {
    let mut editor = drawn();
    editor.toggle_snip();
    assert!(editor.click(p(52.0, 3.0)));
    assert!(!editor.click(p(500.0, 500.0)));

    let collection = editor.collection();
    assert_eq!(collection.len(), 2);
    assert_eq!(
        collection.paths()[0].segments(),
        &[Segment::line(p(-100.0, 0.0), p(0.0, 0.0))]
    );
    assert_eq!(
        collection.paths()[1].segments(),
        &[Segment::curve(p(150.0, 50.0), p(175.0, 25.0), p(200.0, 0.0))]
    );
    assert_eq!(collection.paths()[0].stroke, PALETTE[0]);
    assert_eq!(collection.paths()[1].stroke, PALETTE[1]);
}

#[test]
fn test_snipping_only_segment_leaves_nothing() {
    let mut editor = Editor::new(PathCollection::new());
    editor.set_add_mode(SegmentKind::Line);
    editor.click(p(0.0, 0.0));
    editor.toggle_snip();
    assert!(editor.click(p(50.0, 0.0)));
    assert!(editor.collection().is_empty());
}

#[test]
fn test_drag_moves_shared_endpoint() -> Result<()> {
    let mut editor = drawn();
    assert!(editor.begin_drag(p(2.0, -2.0)));
    let target = editor.dragging().unwrap();
    assert_eq!((target.segment, target.handle), (0, Handle::End));

    assert!(editor.drag_to(p(0.0, 30.0)));
    editor.end_drag();
    assert!(editor.dragging().is_none());
    assert!(!editor.drag_to(p(9.0, 9.0)));

    let path = &editor.collection().paths()[0];
    assert_eq!(path.segments()[0].end(), p(0.0, 30.0));
    assert_eq!(path.segments()[1].start(), p(0.0, 30.0));
    assert_relative_eq!(path.segments()[1].length(20), (100.0f64.powi(2) + 900.0).sqrt());
    Ok(())
}

#[test]
fn test_lengths() {
    let line = Segment::line(p(0.0, 0.0), p(3.0, 4.0));
    assert_relative_eq!(line.length(20), 5.0);

    let straight_curve = Segment::curve(p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0));
    assert_relative_eq!(straight_curve.length(20), 10.0, epsilon = 1e-12);

    let bowed = Segment::curve(p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0));
    assert!(bowed.length(20) > 10.0);
    assert!(bowed.length(40) >= bowed.length(20));

    let path = WirePath::from_segments([line, Segment::line(p(3.0, 4.0), p(3.0, 10.0))]);
    assert_relative_eq!(path.length(20), 11.0);

    let collection = PathCollection::from(vec![path.clone(), path]);
    assert_relative_eq!(collection.total_length(20), 22.0);
}

#[test]
fn test_index_and_diameter_errors() {
    let mut collection = PathCollection::new();
    assert_eq!(
        collection.get(3).unwrap_err(),
        WireError::PathIndex { index: 3, count: 1 }
    );
    assert!(matches!(
        collection.split_path(0, 4),
        Err(WireError::SegmentIndex { index: 4, .. })
    ));
    assert_eq!(
        collection.set_wire_diameter(-1.0, None),
        Err(WireError::InvalidDiameter(-1.0))
    );

    collection.set_wire_diameter(1.2, Some(0)).unwrap();
    assert_eq!(collection.paths()[0].wire_diameter, 1.2);
}
