//! Cart module.
//!
//! The cart holds a single chosen skip; adding another replaces it.

mod selection;

pub use selection::{Navigator, Selection, SelectionState};
