//! Type aliases for commonly used complex types.
//!
//! Everything in GeoTrace runs on the UI thread, so shared state uses
//! `Rc<RefCell<T>>` and collaborator back-references use `Weak`.
//!
//! ## Usage
//!
//! ```rust
//! use geotrace_core::types::{shared, Shared, WeakShared};
//! use std::rc::Rc;
//!
//! let state: Shared<Vec<u32>> = shared(Vec::new());
//! let handle: WeakShared<Vec<u32>> = Rc::downgrade(&state);
//! state.borrow_mut().push(1);
//! assert_eq!(handle.upgrade().unwrap().borrow().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// A non-owning handle to [`Shared`] state.
///
/// Used for collaborators a value talks to but must not keep alive.
pub type WeakShared<T> = Weak<RefCell<T>>;

/// Create a new [`Shared`] value
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
