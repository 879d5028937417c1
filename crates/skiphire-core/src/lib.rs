//! Skip-hire selection core.
//!
//! This crate holds everything about choosing a skip that does not touch the
//! network or the screen:
//!
//! - **Catalog**: raw offerings, derived presentation records, load state
//! - **Search**: filter state and the filter-and-derive pipeline
//! - **Cart**: the single-item selection and its navigation hook
//! - **Booking**: the step-by-step booking progress
//! - **Session**: one user's state, handed to the rendering layer
//!
//! # Example
//!
//! ```rust
//! use skiphire_core::prelude::*;
//!
//! let mut session = Session::new();
//! let ticket = session.begin_load().unwrap();
//! session.complete_load(
//!     ticket,
//!     Ok(vec![Offering::new(1, 6, 200.0, 20.0).with_hire_period(14)]),
//! );
//!
//! let view = session.filtered();
//! assert_eq!(view.outcome(), FilterOutcome::Matches(1));
//! assert_eq!(view.items[0].price_label(), "£240 per week");
//!
//! session.add_to_cart(OfferingId::new(1)).unwrap();
//! assert!(session.selection().is_panel_open());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod search;
pub mod session;

pub use error::{CommerceError, FetchFailure, LOAD_FAILURE_MESSAGE};
pub use ids::OfferingId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, FetchFailure};
    pub use crate::ids::OfferingId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{DerivedOffering, LoadState, Offering};

    // Search
    pub use crate::search::{
        derive_filtered, size_facets, FilterOutcome, FilterState, FilteredView, PriceRange,
        SizeFacet,
    };

    // Cart
    pub use crate::cart::{Navigator, Selection, SelectionState};

    // Booking
    pub use crate::booking::{BookingFlow, BookingStep};

    // Session
    pub use crate::session::{LoadOutcome, LoadTicket, Session};
}
