use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use egui::{pos2, Color32, Pos2, Vec2};
use shape_canvas::geometry::hit_test;
use shape_canvas::{
    factory, Affordance, Editor, EditorConfig, EditorEvent, Element, FnHandler, GestureState,
    ResizeDirection, Shape, ShapeKind,
};

fn editor() -> Editor {
    Editor::with_seed(EditorConfig::default(), 42).unwrap()
}

/// Subscribe a handler that records every event except drawing progress
fn record(editor: &Editor) -> Arc<Mutex<Vec<EditorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    editor.subscribe(Box::new(FnHandler::new(move |event: &EditorEvent| {
        if *event != EditorEvent::DrawingProgress {
            sink.lock().unwrap().push(event.clone());
        }
    })));
    events
}

fn names(events: &Arc<Mutex<Vec<EditorEvent>>>) -> Vec<&'static str> {
    events.lock().unwrap().iter().map(|e| e.name()).collect()
}

fn hover(editor: &mut Editor, pos: Pos2) {
    editor.pointer_move(pos, Vec2::ZERO);
}

fn click(editor: &mut Editor, pos: Pos2) {
    hover(editor, pos);
    editor.pointer_down(pos);
    editor.pointer_up(pos);
}

fn drag(editor: &mut Editor, from: Pos2, to: Pos2) {
    hover(editor, from);
    editor.pointer_down(from);
    editor.pointer_move(to, to - from);
    editor.pointer_up(to);
}

fn boxed(min: Pos2, max: Pos2) -> Shape {
    factory::create_box(min, max, Color32::RED)
}

#[test]
fn test_drag_on_empty_canvas_commits_box() {
    let mut editor = editor();
    let events = record(&editor);

    drag(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));

    assert_eq!(editor.len(), 1);
    let b = editor.shape(0).unwrap().as_box().unwrap();
    assert_eq!((b.x(), b.y(), b.width(), b.height()), (10.0, 10.0, 50.0, 30.0));
    assert!(b.is_selected());
    assert!(editor.gesture().is_idle());
    assert_eq!(names(&events), vec!["draw_started", "draw_ended"]);

    match &events.lock().unwrap()[1] {
        EditorEvent::DrawEnded { shape, shapes } => {
            assert_eq!(shape.kind(), ShapeKind::Box);
            assert_eq!(shapes.len(), 1);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_reverse_drag_gives_same_box() {
    let mut forward = editor();
    let mut backward = editor();
    drag(&mut forward, pos2(10.0, 10.0), pos2(60.0, 40.0));
    drag(&mut backward, pos2(60.0, 40.0), pos2(10.0, 10.0));

    let a = forward.shape(0).unwrap().as_box().unwrap().rect();
    let b = backward.shape(0).unwrap().as_box().unwrap().rect();
    assert_eq!(a, b);
}

#[test]
fn test_zero_movement_draw_adds_no_shape() {
    let mut editor = editor();
    click(&mut editor, pos2(10.0, 10.0));

    assert!(editor.is_empty());
    // The click starts a polygon instead
    assert_eq!(editor.polygon_in_progress(), &[pos2(10.0, 10.0)]);
}

#[test]
fn test_single_axis_drag_adds_no_shape() {
    let mut editor = editor();
    drag(&mut editor, pos2(10.0, 10.0), pos2(10.0, 80.0));
    assert!(editor.is_empty());
    assert!(editor.polygon_in_progress().is_empty());
}

#[test]
fn test_polygon_closes_within_vertex_radius() {
    let mut editor = editor();
    let events = record(&editor);

    click(&mut editor, pos2(0.0, 0.0));
    click(&mut editor, pos2(100.0, 0.0));
    click(&mut editor, pos2(50.0, 80.0));
    click(&mut editor, pos2(2.0, 2.0));

    assert_eq!(editor.len(), 1);
    let polygon = editor.shape(0).unwrap().as_polygon().unwrap();
    assert_eq!(
        polygon.points(),
        &[pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(50.0, 80.0)]
    );
    assert!(polygon.is_selected());
    assert!(editor.polygon_in_progress().is_empty());
    assert_eq!(names(&events), vec!["draw_started", "draw_ended"]);
}

#[test]
fn test_click_outside_vertex_radius_appends_vertex() {
    let mut editor = editor();

    click(&mut editor, pos2(0.0, 0.0));
    click(&mut editor, pos2(100.0, 0.0));
    click(&mut editor, pos2(50.0, 80.0));
    click(&mut editor, pos2(5.5, 0.0));

    assert!(editor.is_empty());
    assert_eq!(editor.polygon_in_progress().len(), 4);
}

#[test]
fn test_shapes_stay_clickable_while_polygon_is_open() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 100.0)));

    click(&mut editor, pos2(200.0, 200.0));
    let events = record(&editor);

    hover(&mut editor, pos2(50.0, 50.0));
    assert_eq!(editor.affordance(), Affordance::Move);

    editor.pointer_down(pos2(50.0, 50.0));
    assert!(matches!(editor.gesture(), GestureState::DraggingBody { index: 0, .. }));
    editor.pointer_up(pos2(50.0, 50.0));

    assert_eq!(editor.selected_index(), Some(0));
    assert_eq!(editor.polygon_in_progress(), &[pos2(200.0, 200.0)]);
    assert_eq!(names(&events), vec!["clicked", "selection_changed"]);

    // Empty canvas still extends the open polygon
    click(&mut editor, pos2(300.0, 200.0));
    assert_eq!(editor.polygon_in_progress().len(), 2);
}

#[test]
fn test_cancel_polygon() {
    let mut editor = editor();
    let events = record(&editor);
    click(&mut editor, pos2(0.0, 0.0));
    click(&mut editor, pos2(40.0, 0.0));

    assert!(editor.cancel_polygon());
    assert!(editor.polygon_in_progress().is_empty());
    assert!(!editor.cancel_polygon());
    assert!(editor.is_empty());
    assert_eq!(names(&events), vec!["draw_started", "polygon_cancelled"]);
}

#[test]
fn test_set_selected_clears_other_flags() {
    let mut editor = editor();
    for i in 0..5 {
        let x = i as f32 * 60.0;
        editor.push_shape(boxed(pos2(x, 0.0), pos2(x + 50.0, 50.0)));
    }
    editor.set_selected(0).unwrap();
    editor.set_selected(2).unwrap();

    assert_eq!(editor.selected_index(), Some(2));
    for (i, shape) in editor.shapes().iter().enumerate() {
        assert_eq!(shape.is_selected(), i == 2);
    }
}

#[test]
fn test_delete_shifts_later_shapes_down() {
    let mut editor = editor();
    let events = record(&editor);
    for i in 0..5 {
        let x = i as f32 * 60.0;
        editor.push_shape(boxed(pos2(x, 0.0), pos2(x + 50.0, 50.0)));
    }
    editor.set_selected(3).unwrap();

    let removed = editor.delete(1).unwrap();
    assert_eq!(removed.as_box().unwrap().x(), 60.0);
    assert_eq!(editor.len(), 4);
    assert_eq!(editor.shape(1).unwrap().as_box().unwrap().x(), 120.0);
    assert_eq!(editor.selected_index(), Some(2));
    assert_eq!(names(&events), vec!["selection_changed", "shape_deleted"]);

    assert!(editor.delete(4).is_err());
    assert_eq!(editor.len(), 4);
}

#[test]
fn test_body_drag_translates_all_corners() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 50.0)));
    let before: Vec<Pos2> = editor.shape(0).unwrap().points().to_vec();
    let events = record(&editor);

    hover(&mut editor, pos2(50.0, 25.0));
    editor.pointer_down(pos2(50.0, 25.0));
    editor.pointer_move(pos2(60.0, 30.0), Vec2::new(10.0, 5.0));
    editor.pointer_move(pos2(80.0, 45.0), Vec2::new(20.0, 15.0));
    editor.pointer_up(pos2(80.0, 45.0));

    let shape = editor.shape(0).unwrap();
    for (old, new) in before.iter().zip(shape.points()) {
        assert_eq!(*new, *old + Vec2::new(30.0, 20.0));
    }
    let b = shape.as_box().unwrap();
    assert_eq!((b.width(), b.height()), (100.0, 50.0));
    assert_eq!(names(&events), vec!["dragging", "dragging"]);
}

#[test]
fn test_polygon_body_drag() {
    let mut editor = editor();
    editor.push_shape(factory::create_polygon(
        vec![pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(50.0, 80.0)],
        Color32::GREEN,
    ));

    drag(&mut editor, pos2(50.0, 30.0), pos2(60.0, 40.0));

    assert_eq!(
        editor.shape(0).unwrap().points(),
        &[pos2(10.0, 10.0), pos2(110.0, 10.0), pos2(60.0, 90.0)]
    );
}

#[test]
fn test_vertex_drag_moves_one_vertex() {
    let mut editor = editor();
    editor.push_shape(factory::create_polygon(
        vec![pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(50.0, 80.0)],
        Color32::GREEN,
    ));
    let events = record(&editor);

    hover(&mut editor, pos2(101.0, 1.0));
    assert_eq!(editor.affordance(), Affordance::Vertex);
    editor.pointer_down(pos2(101.0, 1.0));
    editor.pointer_move(pos2(111.0, 6.0), Vec2::new(10.0, 5.0));
    assert!(matches!(
        editor.gesture(),
        GestureState::DraggingVertex { index: 0, vertex: 1, .. }
    ));
    editor.pointer_up(pos2(111.0, 6.0));

    assert_eq!(
        editor.shape(0).unwrap().points(),
        &[pos2(0.0, 0.0), pos2(110.0, 5.0), pos2(50.0, 80.0)]
    );
    match &events.lock().unwrap()[0] {
        EditorEvent::SizeChanged { index, vertex, .. } => {
            assert_eq!(*index, 0);
            assert_eq!(*vertex, Some(1));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_resize_crossing_flips_cursor() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 50.0)));

    hover(&mut editor, pos2(100.0, 25.0));
    assert_eq!(editor.affordance(), Affordance::Resize(ResizeDirection::East));
    editor.pointer_down(pos2(100.0, 25.0));

    editor.pointer_move(pos2(-20.0, 25.0), Vec2::new(-120.0, 0.0));
    let b = editor.shape(0).unwrap().as_box().unwrap();
    assert_eq!((b.x(), b.width(), b.height()), (-20.0, 20.0, 50.0));
    assert_eq!(editor.affordance(), Affordance::Resize(ResizeDirection::West));

    editor.pointer_move(pos2(150.0, 25.0), Vec2::new(170.0, 0.0));
    let b = editor.shape(0).unwrap().as_box().unwrap();
    assert_eq!((b.x(), b.width(), b.height()), (0.0, 150.0, 50.0));
    assert_eq!(editor.affordance(), Affordance::Resize(ResizeDirection::East));

    editor.pointer_up(pos2(150.0, 25.0));
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_corner_resize_pulled_inside_out() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 50.0)));

    hover(&mut editor, pos2(2.0, 2.0));
    assert_eq!(editor.affordance(), Affordance::Resize(ResizeDirection::NorthWest));
    editor.pointer_down(pos2(2.0, 2.0));
    editor.pointer_move(pos2(120.0, 70.0), Vec2::new(118.0, 68.0));

    let b = editor.shape(0).unwrap().as_box().unwrap();
    assert_eq!((b.x(), b.y(), b.width(), b.height()), (100.0, 50.0, 20.0, 20.0));
    assert_eq!(editor.affordance(), Affordance::Resize(ResizeDirection::SouthEast));
    editor.pointer_up(pos2(120.0, 70.0));
}

#[test]
fn test_click_on_shape_selects_it() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 100.0)));
    editor.push_shape(boxed(pos2(200.0, 0.0), pos2(300.0, 100.0)));
    editor.set_selected(1).unwrap();
    let events = record(&editor);

    click(&mut editor, pos2(50.0, 50.0));

    assert_eq!(editor.selected_index(), Some(0));
    assert!(!editor.shape(1).unwrap().is_selected());
    assert_eq!(names(&events), vec!["clicked", "selection_changed"]);
    assert!(editor.polygon_in_progress().is_empty());
}

#[test]
fn test_earliest_shape_wins_overlap() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 100.0)));
    editor.push_shape(boxed(pos2(50.0, 50.0), pos2(150.0, 150.0)));

    click(&mut editor, pos2(75.0, 75.0));
    assert_eq!(editor.selected_index(), Some(0));
}

#[test]
fn test_hit_test_is_deterministic() {
    let shapes = vec![
        boxed(pos2(0.0, 0.0), pos2(100.0, 50.0)),
        factory::create_polygon(
            vec![pos2(200.0, 0.0), pos2(300.0, 0.0), pos2(250.0, 80.0)],
            Color32::BLUE,
        ),
    ];
    for pos in [pos2(95.0, 25.0), pos2(250.0, 30.0), pos2(500.0, 500.0), pos2(300.0, 1.0)] {
        let first = hit_test(pos, &shapes, 10.0, 5.0);
        let second = hit_test(pos, &shapes, 10.0, 5.0);
        assert_eq!(first, second);
    }
}

#[test]
fn test_delete_mid_gesture_resets_state() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 100.0)));

    hover(&mut editor, pos2(50.0, 50.0));
    editor.pointer_down(pos2(50.0, 50.0));
    editor.delete(0).unwrap();
    assert!(editor.gesture().is_idle());

    editor.pointer_move(pos2(60.0, 60.0), Vec2::new(10.0, 10.0));
    editor.pointer_up(pos2(60.0, 60.0));
    assert!(editor.is_empty());
}

#[test]
fn test_clear_resets_everything() {
    let mut editor = editor();
    let events = record(&editor);
    drag(&mut editor, pos2(10.0, 10.0), pos2(60.0, 40.0));
    click(&mut editor, pos2(300.0, 300.0));
    assert_eq!(editor.polygon_in_progress().len(), 1);

    editor.clear();

    assert!(editor.is_empty());
    assert!(editor.polygon_in_progress().is_empty());
    assert_eq!(editor.affordance(), Affordance::Crosshair);
    assert_eq!(names(&events).last(), Some(&"cleared"));
}

#[test]
fn test_consecutive_shapes_get_distinct_hues() {
    let mut editor = editor();
    drag(&mut editor, pos2(0.0, 0.0), pos2(50.0, 50.0));
    drag(&mut editor, pos2(100.0, 100.0), pos2(150.0, 150.0));

    let a = editor.shape(0).unwrap().color();
    let b = editor.shape(1).unwrap().color();
    assert_ne!(a, b);
}

#[test]
fn test_resize_ending_with_zero_width_is_undone() {
    let mut editor = editor();
    editor.push_shape(boxed(pos2(0.0, 0.0), pos2(100.0, 50.0)));

    hover(&mut editor, pos2(100.0, 25.0));
    editor.pointer_down(pos2(100.0, 25.0));
    editor.pointer_move(pos2(0.0, 25.0), Vec2::new(-100.0, 0.0));
    assert_eq!(editor.shape(0).unwrap().as_box().unwrap().width(), 0.0);
    editor.pointer_up(pos2(0.0, 25.0));

    let b = editor.shape(0).unwrap().as_box().unwrap();
    assert_eq!((b.x(), b.y(), b.width(), b.height()), (0.0, 0.0, 100.0, 50.0));
    assert!(!b.is_degenerate());
}

#[test]
fn test_panicking_handler_leaves_gesture_reset() {
    let mut editor = editor();
    editor.subscribe(Box::new(FnHandler::new(|event: &EditorEvent| {
        if let EditorEvent::DrawEnded { .. } = event {
            panic!("handler failure");
        }
    })));

    hover(&mut editor, pos2(10.0, 10.0));
    editor.pointer_down(pos2(10.0, 10.0));
    editor.pointer_move(pos2(60.0, 40.0), Vec2::new(50.0, 30.0));
    let result = panic::catch_unwind(AssertUnwindSafe(|| editor.pointer_up(pos2(60.0, 40.0))));

    assert!(result.is_err());
    assert!(editor.gesture().is_idle());
    assert_eq!(editor.len(), 1);

    // The editor keeps working afterwards
    click(&mut editor, pos2(200.0, 200.0));
    assert_eq!(editor.polygon_in_progress().len(), 1);
}

#[test]
fn test_invalid_config_is_rejected_at_construction() {
    let config = EditorConfig {
        vertex_radius: -1.0,
        ..EditorConfig::default()
    };
    assert!(Editor::new(config).is_err());
}
