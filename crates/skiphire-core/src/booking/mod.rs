//! Booking journey module.

mod flow;

pub use flow::{BookingFlow, BookingStep};
