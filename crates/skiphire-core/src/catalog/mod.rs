//! Skip catalog module.
//!
//! Contains raw offerings, derived presentation records, display text, and
//! the catalog load state.

pub mod describe;
mod derived;
mod load_state;
mod offering;

pub use derived::DerivedOffering;
pub use load_state::LoadState;
pub use offering::{offerings_from_json, Offering};
