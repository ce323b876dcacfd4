use geotrace_core::Coordinate;
use geotrace_designer::{
    coordinate_codec, parse_csv, DocumentState, DrawingLayer, InteractionMode, StrokeDefaults,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(Coordinate::from)
}

proptest! {
    #[test]
    fn add_then_remove_restores_path(
        initial in prop::collection::vec(coordinate(), 0..32),
        c in coordinate(),
    ) {
        let mut layer =
            DrawingLayer::with_coordinates("p", initial.clone(), &StrokeDefaults::default());
        layer.add_coordinate(c);
        layer.remove_coordinate(c);
        prop_assert_eq!(layer.coordinates(), initial.as_slice());
    }

    #[test]
    fn undo_all_then_redo_all_restores_path(
        path in prop::collection::vec(coordinate(), 1..24),
    ) {
        let mut state = DocumentState::default();
        state.add_new_layer();
        state.set_mode(InteractionMode::Drawing);
        for c in &path {
            state.add_coordinate_at_cursor(*c);
        }

        while state.undo() {}
        prop_assert!(state.collection.get(0).unwrap().is_empty());

        while state.redo() {}
        prop_assert_eq!(state.collection.get(0).unwrap().coordinates(), path.as_slice());
    }

    #[test]
    fn parser_never_panics(text in ".{0,200}") {
        let rows = parse_csv(&text);
        prop_assert!(rows.len() <= text.len() + 1);
    }

    #[test]
    fn export_then_import_is_within_resolution(
        path in prop::collection::vec(coordinate(), 0..16),
    ) {
        let decoded = coordinate_codec::decode_text(&coordinate_codec::encode(&path));
        prop_assert_eq!(decoded.len(), path.len());
        for (a, b) in path.iter().zip(&decoded) {
            prop_assert!((a.latitude - b.latitude).abs() <= 0.0005 + 1e-9);
            prop_assert!((a.longitude - b.longitude).abs() <= 0.0005 + 1e-9);
        }
    }
}
