#[path = "core/collection.rs"]
mod collection;
#[path = "core/document_state.rs"]
mod document_state;
#[path = "core/history.rs"]
mod history;
#[path = "core/layer_properties.rs"]
mod layer_properties;
#[path = "core/persistence.rs"]
mod persistence;
