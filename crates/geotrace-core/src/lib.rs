//! # GeoTrace Core
//!
//! Core types, traits, and utilities for GeoTrace.
//! Provides the fundamental abstractions shared by the designer and
//! settings crates: geographic data types, layer events, the projection
//! collaborator interface, and error types.

pub mod core;
pub mod data;
pub mod error;
pub mod types;

pub use crate::core::{
    event::{EventCategory, EventDispatcher, EventFilter, LayerEvent, SubscriptionId},
    EquirectangularProjection, LayerListener, Projection,
};

pub use data::{Coordinate, LayerId, Rgba, ScreenPoint, ViewportRect};

pub use error::{DocumentError, Error, LayerError, Result};

pub use types::{shared, Shared, WeakShared};
