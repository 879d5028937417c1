//! Filtering module.
//!
//! Contains the filter state, the filter-and-derive pipeline, and the
//! filtered views handed to the rendering layer.

mod filter;
mod pipeline;
mod results;

pub use filter::{FilterState, PriceRange, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
pub use pipeline::{derive_filtered, Pipeline};
pub use results::{size_facets, FilterOutcome, FilteredView, SizeFacet};
