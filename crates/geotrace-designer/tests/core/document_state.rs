use geotrace_core::{Coordinate, EquirectangularProjection, Projection, ViewportRect};
use geotrace_designer::{DocumentState, InteractionMode, StrokeDefaults};
use std::fs;
use std::rc::Rc;

#[test]
fn test_import_draw_undo_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("coast.csv");
    fs::write(&source, "lat,lon\n\"45.0\",-122.5\n46.0,-121.0\n").unwrap();

    let mut state = DocumentState::new(StrokeDefaults::with_line_width(2.0));
    state.import_file(&source).unwrap();
    state.set_mode(InteractionMode::Drawing);
    state.add_coordinate_at_cursor(Coordinate::new(47.0, -120.0));
    state.add_coordinate_at_cursor(Coordinate::new(48.0, -119.0));
    assert!(state.undo());
    state.set_viewport(ViewportRect::new(-10.0, -10.0, 2048.0, 1024.0));

    let path = dir.path().join("coast.geotrace");
    state.save_to_file(&path).unwrap();

    let mut reopened = DocumentState::new(StrokeDefaults::with_line_width(3.0));
    reopened.load_from_file(&path).unwrap();
    let layer = reopened.collection.get(0).unwrap();
    assert_eq!(layer.name, "coast");
    assert_eq!(
        layer.coordinates(),
        &[
            Coordinate::new(45.0, -122.5),
            Coordinate::new(46.0, -121.0),
            Coordinate::new(47.0, -120.0),
        ]
    );
    assert_eq!(layer.line_width(), 3.0);
    assert_eq!(reopened.viewport.unwrap().zoom_level(), Some(2));
}

#[test]
fn test_render_paths_after_projection_attached() {
    let projection: Rc<dyn Projection> = Rc::new(EquirectangularProjection::new(360.0, 180.0));
    let mut state = DocumentState::default();
    state.set_projection(&projection);
    state.add_new_layer();
    state.set_mode(InteractionMode::Drawing);
    state.add_coordinate_at_cursor(Coordinate::new(0.0, 0.0));
    assert!(state.collection.get(0).unwrap().render_path().is_none());

    state.add_coordinate_at_cursor(Coordinate::new(10.0, 20.0));
    let polyline = state.collection.get(0).unwrap().render_path().unwrap();
    assert_eq!(polyline.points.len(), 2);
    assert_eq!(polyline.points[0].x, 180.0);
}

#[test]
fn test_export_failure_is_recoverable() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = DocumentState::default();
    state.ensure_initial_layer();

    let err = state
        .export_layer(0, dir.path().join("missing").join("out.txt"))
        .unwrap_err();
    assert!(err.is_export_error());
    assert_eq!(state.collection.len(), 1);
}

#[test]
fn test_removing_layers_clears_active_target() {
    let mut state = DocumentState::default();
    state.add_new_layer();
    state.add_new_layer();
    state.set_mode(InteractionMode::Drawing);
    assert!(state.active_drawing_layer().is_some());

    state.remove_layers(&[0]);
    assert!(state.active_drawing_layer().is_none());
    assert!(state.needs_target_indicator());
    assert!(!state.add_coordinate_at_cursor(Coordinate::new(1.0, 1.0)));
}
