//! Core error types.

use thiserror::Error;

/// Message shown to the user whenever the catalog cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load skip data. Please try again later.";

/// Errors that can occur in skip selection operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Offering not present in the loaded catalog.
    #[error("Offering not found: {0}")]
    OfferingNotFound(i64),

    /// Catalog has not finished loading.
    #[error("Catalog is not loaded")]
    CatalogNotReady,

    /// Price range with min above max.
    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: i64, max: i64 },

    /// Invalid booking step transition.
    #[error("Invalid booking transition from {from} to {to}")]
    InvalidStepTransition { from: String, to: String },

    /// Booking cannot advance yet.
    #[error("Booking incomplete: missing {0}")]
    BookingIncomplete(String),
}

/// A failed catalog load.
///
/// `reason` carries the technical cause for logs; `message` is what the
/// rendering layer shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({reason})")]
pub struct FetchFailure {
    /// Technical cause (transport error, HTTP status, parse error).
    pub reason: String,
    /// User-facing message.
    pub message: String,
}

impl FetchFailure {
    /// Create a failure with the standard user-facing message.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: LOAD_FAILURE_MESSAGE.to_string(),
        }
    }
}
