use geotrace_core::{shared, Coordinate};
use geotrace_designer::{
    DrawingLayer, LayerCollection, LayerCommand, StrokeDefaults, UndoRedoManager, UndoSink,
};
use std::cell::RefCell;
use std::rc::Rc;

fn wired_collection() -> (LayerCollection, Rc<RefCell<UndoRedoManager>>) {
    let history = shared(UndoRedoManager::new());
    let sink: Rc<RefCell<dyn UndoSink>> = history.clone();

    let mut layer = DrawingLayer::new(&StrokeDefaults::default());
    layer.set_undo_sink(Rc::downgrade(&sink));

    let mut collection = LayerCollection::new();
    collection.add_layer(layer);
    (collection, history)
}

fn undo(collection: &mut LayerCollection, history: &Rc<RefCell<UndoRedoManager>>) {
    let entry = history.borrow_mut().begin_undo().unwrap();
    entry.command.apply(collection).unwrap();
    history.borrow_mut().end();
}

fn redo(collection: &mut LayerCollection, history: &Rc<RefCell<UndoRedoManager>>) {
    let entry = history.borrow_mut().begin_redo().unwrap();
    entry.command.apply(collection).unwrap();
    history.borrow_mut().end();
}

#[test]
fn test_undo_of_add_removes_tail() {
    let (mut collection, history) = wired_collection();
    let a = Coordinate::new(10.0, 20.0);
    let b = Coordinate::new(11.0, 21.0);
    collection.get_mut(0).unwrap().add_coordinate(a);
    collection.get_mut(0).unwrap().add_coordinate(b);

    undo(&mut collection, &history);
    assert_eq!(collection.get(0).unwrap().coordinates(), &[a]);
    assert_eq!(history.borrow().redo_depth(), 1);
}

#[test]
fn test_action_names_follow_user_perception() {
    let (mut collection, history) = wired_collection();
    let c = Coordinate::new(10.0, 20.0);
    collection.get_mut(0).unwrap().add_coordinate(c);
    assert_eq!(history.borrow().undo_action_name(), Some("Add Coordinate"));

    undo(&mut collection, &history);
    assert_eq!(history.borrow().redo_action_name(), Some("Add Coordinate"));

    redo(&mut collection, &history);
    assert_eq!(history.borrow().undo_action_name(), Some("Add Coordinate"));
    assert_eq!(collection.get(0).unwrap().coordinates(), &[c]);
}

#[test]
fn test_direct_removal_is_undoable() {
    let (mut collection, history) = wired_collection();
    let c = Coordinate::new(10.0, 20.0);
    collection.get_mut(0).unwrap().add_coordinate(c);
    collection.get_mut(0).unwrap().remove_coordinate(c);
    assert_eq!(
        history.borrow().undo_action_name(),
        Some("Remove Coordinate")
    );

    undo(&mut collection, &history);
    assert_eq!(collection.get(0).unwrap().coordinates(), &[c]);
    assert_eq!(
        history.borrow().redo_action_name(),
        Some("Remove Coordinate")
    );
}

#[test]
fn test_command_for_missing_layer_fails() {
    let (mut collection, _history) = wired_collection();
    let id = collection.get(0).unwrap().id();
    collection.remove_layers(&[0]);

    let command = LayerCommand::AppendCoordinate {
        layer: id,
        coordinate: Coordinate::new(0.0, 0.0),
    };
    assert!(command.apply(&mut collection).unwrap_err().is_layer_error());
}

#[test]
fn test_style_changes_are_not_recorded() {
    let (mut collection, history) = wired_collection();
    collection.toggle_visibility(0).unwrap();
    collection.apply_line_width(3.0);
    assert_eq!(history.borrow().undo_depth(), 0);
}
