use geotrace_core::{Coordinate, Rgba, ViewportRect};
use geotrace_designer::{DocumentFile, DrawingLayer, LayerCollection, StrokeDefaults};

fn sample_collection() -> LayerCollection {
    let mut collection = LayerCollection::new();
    let mut layer = DrawingLayer::with_coordinates(
        "A",
        vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)],
        &StrokeDefaults::default(),
    );
    layer.set_stroke_color(Rgba::RED);
    collection.add_layer(layer);
    collection
}

#[test]
fn test_collection_round_trip_is_exact() {
    let collection = sample_collection();
    let viewport = Some(ViewportRect::new(0.0, 0.0, 100.0, 100.0));
    let bytes = DocumentFile::from_collection("Walks", &collection, viewport)
        .to_bytes()
        .unwrap();

    let decoded = DocumentFile::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.viewport, viewport);

    let layers = decoded.to_layers(&StrokeDefaults::default());
    assert_eq!(layers.len(), collection.len());
    for (restored, original) in layers.iter().zip(collection.iter()) {
        assert_eq!(restored.name, original.name);
        assert_eq!(restored.coordinates(), original.coordinates());
        assert_eq!(restored.stroke_color(), original.stroke_color());
    }
}

#[test]
fn test_line_width_is_not_persisted() {
    let mut collection = sample_collection();
    collection.apply_line_width(6.0);
    let bytes = DocumentFile::from_collection("Walks", &collection, None)
        .to_bytes()
        .unwrap();

    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(!text.contains("line_width"));

    let layers = DocumentFile::from_bytes(&bytes)
        .unwrap()
        .to_layers(&StrokeDefaults::with_line_width(2.0));
    assert_eq!(layers[0].line_width(), 2.0);
}

#[test]
fn test_garbage_blob_degrades_to_empty() {
    let document = DocumentFile::decode_or_empty(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a]);
    assert!(document.layers.is_empty());
    assert!(document.viewport.is_none());
}

#[test]
fn test_missing_layer_list_is_not_a_document() {
    let json = br#"{
        "version": "1.0",
        "metadata": {
            "name": "Old",
            "created": "2024-03-01T10:00:00Z",
            "modified": "2024-03-01T10:00:00Z"
        }
    }"#;
    assert!(DocumentFile::from_bytes(json).is_err());

    let json = br#"{
        "version": "1.0",
        "metadata": {
            "name": "Old",
            "created": "2024-03-01T10:00:00Z",
            "modified": "2024-03-01T10:00:00Z"
        },
        "layers": []
    }"#;
    assert!(DocumentFile::from_bytes(json).unwrap().layers.is_empty());
}

#[test]
fn test_missing_viewport_is_none() {
    let json = br#"{
        "version": "1.0",
        "metadata": {
            "name": "Old",
            "created": "2024-03-01T10:00:00Z",
            "modified": "2024-03-01T10:00:00Z"
        },
        "layers": [
            {"name": "trail", "coordinates": [{"latitude": 45.5, "longitude": -122.25}]}
        ]
    }"#;
    let document = DocumentFile::from_bytes(json).unwrap();
    assert!(document.viewport.is_none());
    assert_eq!(document.layers[0].stroke_color, Rgba::GREEN);
    assert_eq!(document.layers[0].coordinates[0].longitude, -122.25);
}
