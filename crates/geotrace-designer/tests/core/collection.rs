use geotrace_core::{Coordinate, LayerEvent, Rgba};
use geotrace_designer::{DrawingLayer, LayerCollection, StrokeDefaults};
use std::cell::RefCell;
use std::rc::Rc;

fn layer(name: &str) -> DrawingLayer {
    DrawingLayer::with_coordinates(name, Vec::new(), &StrokeDefaults::default())
}

#[test]
fn test_added_layer_becomes_selected() {
    let mut collection = LayerCollection::new();
    let first = collection.add_layer(layer("first"));
    assert_eq!(collection.selected_id(), Some(first));

    let second = collection.add_layer(layer("second"));
    assert_eq!(collection.selected_id(), Some(second));
    assert_eq!(collection.selected_layer().unwrap().name, "second");
}

#[test]
fn test_removing_selected_layer_clears_selection() {
    let mut collection = LayerCollection::new();
    collection.add_layer(layer("a"));
    collection.add_layer(layer("b"));

    collection.remove_layers(&[1]);
    assert_eq!(collection.selected_id(), None);
    assert!(collection.selected_layer().is_none());
}

#[test]
fn test_batch_removal_never_reselects() {
    let mut collection = LayerCollection::new();
    for name in ["a", "b", "c"] {
        collection.add_layer(layer(name));
    }
    collection.select(Some(0)).unwrap();

    let removed = collection.remove_layers(&[2, 1]);
    assert_eq!(removed.len(), 2);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.selected_id(), None);
}

#[test]
fn test_selection_and_structure_events_are_distinct() {
    let mut collection = LayerCollection::new();
    let structure = Rc::new(RefCell::new(Vec::new()));
    let selection = Rc::new(RefCell::new(Vec::new()));

    let s = structure.clone();
    collection.events().subscribe(move |event| {
        if matches!(event, LayerEvent::LayerAdded(_) | LayerEvent::LayerRemoved(_)) {
            s.borrow_mut().push(*event);
        }
    });
    let s = selection.clone();
    collection.events().subscribe(move |event| {
        if let LayerEvent::SelectionChanged(selected) = event {
            s.borrow_mut().push(*selected);
        }
    });

    let id = collection.add_layer(layer("a"));
    collection.remove_layers(&[0]);

    assert_eq!(
        *structure.borrow(),
        vec![LayerEvent::LayerAdded(id), LayerEvent::LayerRemoved(id)]
    );
    assert_eq!(*selection.borrow(), vec![Some(id), None]);
}

#[test]
fn test_layer_edits_reach_collection_subscribers() {
    let mut collection = LayerCollection::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    collection.events().subscribe(move |event| s.borrow_mut().push(*event));

    let id = collection.add_layer(layer("a"));
    seen.borrow_mut().clear();

    collection
        .get_mut(0)
        .unwrap()
        .add_coordinate(Coordinate::new(1.0, 2.0));
    collection.set_stroke_color(0, Rgba::BLUE).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            LayerEvent::CoordinateMutated { layer: id, len: 1 },
            LayerEvent::RedrawRequested(id),
        ]
    );
}

#[test]
fn test_out_of_range_index_is_an_error() {
    let mut collection = LayerCollection::new();
    collection.add_layer(layer("a"));

    let err = collection.toggle_visibility(1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Layer index 1 out of range (collection has 1 layers)"
    );
    assert!(collection.set_stroke_color(7, Rgba::RED).is_err());
    assert!(collection.remove_layers(&[7]).is_empty());
    assert_eq!(collection.len(), 1);
}
