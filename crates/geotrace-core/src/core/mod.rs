//! Layer events, listeners and the projection collaborator

pub mod event;
pub mod listener;
pub mod projection;

pub use listener::LayerListener;
pub use projection::{EquirectangularProjection, Projection};
