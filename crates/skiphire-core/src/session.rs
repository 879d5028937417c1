//! One user's selection session.
//!
//! The session is what the rendering layer talks to: it owns the load state,
//! the filter state, the cart and the booking progress, and hands out
//! [`LoadTicket`]s so that a fetch started for one generation of the session
//! can never write into another.

use crate::booking::BookingFlow;
use crate::cart::{Selection, SelectionState};
use crate::catalog::{DerivedOffering, LoadState, Offering};
use crate::error::{CommerceError, FetchFailure};
use crate::ids::OfferingId;
use crate::search::{FilterState, FilteredView, Pipeline};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Permission to deliver one catalog fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of handing a fetch result back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was applied.
    Applied,
    /// The session was torn down; nothing changed.
    Inactive,
    /// The ticket belongs to an earlier generation; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Session {
    load_state: LoadState,
    filters: FilterState,
    selection: Selection,
    booking: BookingFlow,
    pipeline: Pipeline,
    revision: u64,
    generation: u64,
    requested: bool,
    in_flight: bool,
    active: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            load_state: LoadState::Loading,
            filters: FilterState::default(),
            selection: Selection::new(),
            booking: BookingFlow::new(),
            pipeline: Pipeline::new(),
            revision: 0,
            generation: 0,
            requested: false,
            in_flight: false,
            active: true,
        }
    }

    /// Offerings as fetched; empty until the catalog is ready.
    pub fn raw_catalog(&self) -> &[Offering] {
        self.load_state.offerings()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Bumped every time a catalog is applied.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// The filtered, derived catalog for the current filters.
    pub fn filtered(&mut self) -> &FilteredView {
        self.pipeline
            .view(self.revision, self.load_state.offerings(), &self.filters)
    }

    /// How many times the filtered view has been recomputed.
    pub fn recomputations(&self) -> u64 {
        self.pipeline.recomputations()
    }

    /// Reset filters against the current catalog.
    pub fn reset_filters(&mut self) {
        self.filters = FilterState::reset_for(self.load_state.offerings());
        debug!(sizes = self.filters.sizes().len(), "filters reset");
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn booking(&self) -> &BookingFlow {
        &self.booking
    }

    /// Put the offering with `id` into the cart, replacing any previous one.
    ///
    /// Any offering in the loaded catalog can be chosen, whether or not the
    /// current filters show it.
    pub fn add_to_cart(&mut self, id: OfferingId) -> Result<&SelectionState, CommerceError> {
        if !self.load_state.is_ready() {
            return Err(CommerceError::CatalogNotReady);
        }

        let visible = self.filtered().get(id).cloned();
        let item = match visible {
            Some(item) => item,
            None => self
                .raw_catalog()
                .iter()
                .find(|offering| offering.id == id)
                .map(DerivedOffering::from_offering)
                .ok_or(CommerceError::OfferingNotFound(id.value()))?,
        };

        self.selection.add(item);
        Ok(self.selection.state())
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.selection.clear();
    }

    /// Continue to the next booking step with the selected offering.
    ///
    /// Returns whether anything was selected.
    pub fn continue_booking(&mut self) -> Result<bool, CommerceError> {
        self.selection.continue_with(&mut self.booking)
    }

    /// Ask to start the catalog fetch.
    ///
    /// Returns `None` when the session is torn down, a fetch is already in
    /// flight, or this generation has already fetched.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.active {
            debug!("session inactive, not loading");
            return None;
        }
        if self.in_flight {
            debug!(generation = self.generation, "catalog fetch already in flight");
            return None;
        }
        if self.requested {
            debug!(generation = self.generation, "catalog already requested");
            return None;
        }

        self.requested = true;
        self.in_flight = true;
        self.load_state = LoadState::Loading;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Deliver a fetch result.
    ///
    /// Results for a torn-down session or an earlier generation are dropped.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Offering>, FetchFailure>,
    ) -> LoadOutcome {
        if !self.active {
            debug!(generation = ticket.generation, "discarding catalog for inactive session");
            return LoadOutcome::Inactive;
        }
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale catalog"
            );
            return LoadOutcome::Stale;
        }

        self.in_flight = false;
        match result {
            Ok(offerings) => {
                self.revision += 1;
                self.filters.align_to_catalog(&offerings);
                info!(count = offerings.len(), revision = self.revision, "catalog loaded");
                self.load_state = LoadState::Ready {
                    offerings,
                    fetched_at: Utc::now(),
                };
            }
            Err(failure) => {
                warn!(reason = %failure.reason, "catalog load failed");
                self.load_state = LoadState::Failed(failure);
            }
        }
        LoadOutcome::Applied
    }

    /// Full reload: back to the initial state under a new generation.
    ///
    /// Returns the ticket for the new fetch, or `None` once torn down.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        if !self.active {
            return None;
        }

        let generation = self.generation + 1;
        *self = Self {
            generation,
            revision: self.revision,
            ..Self::new()
        };
        info!(generation, "session reloaded");
        self.begin_load()
    }

    /// Tear the session down. Late fetch results are discarded.
    pub fn teardown(&mut self) {
        self.active = false;
        self.in_flight = false;
        debug!(generation = self.generation, "session torn down");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a fetch has been started and not yet delivered.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStep;
    use crate::search::PriceRange;

    fn catalog() -> Vec<Offering> {
        vec![
            Offering::new(1, 4, 200.0, 20.0),
            Offering::new(2, 6, 305.0, 20.0),
            Offering::new(3, 8, 390.0, 20.0).with_heavy_waste(true),
        ]
    }

    fn loaded() -> Session {
        let mut session = Session::new();
        let ticket = session.begin_load().unwrap();
        session.complete_load(ticket, Ok(catalog()));
        session
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new();
        assert!(session.load_state().is_loading());
        assert!(session.raw_catalog().is_empty());
        assert!(session.selection().is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn test_begin_load_is_not_reentrant() {
        let mut session = Session::new();
        let ticket = session.begin_load();
        assert!(ticket.is_some());
        assert!(session.is_in_flight());
        assert!(session.begin_load().is_none());

        session.complete_load(ticket.unwrap(), Ok(catalog()));
        assert!(!session.is_in_flight());
        assert!(session.begin_load().is_none());
    }

    #[test]
    fn test_successful_load_aligns_price_range() {
        let mut session = loaded();
        assert!(session.load_state().is_ready());
        assert_eq!(session.revision(), 1);
        // final prices 240, 366, 468
        assert_eq!(session.filters().price_range(), PriceRange::new(240, 470).unwrap());
        assert_eq!(session.filtered().len(), 3);
    }

    #[test]
    fn test_failed_load() {
        let mut session = Session::new();
        let ticket = session.begin_load().unwrap();
        session.complete_load(ticket, Err(FetchFailure::new("API error: 500")));

        let failure = session.load_state().failure().unwrap();
        assert_eq!(failure.message, crate::error::LOAD_FAILURE_MESSAGE);
        assert!(session.raw_catalog().is_empty());
        assert!(session.filtered().is_empty());
    }

    #[test]
    fn test_teardown_discards_late_result() {
        let mut session = Session::new();
        let ticket = session.begin_load().unwrap();
        session.teardown();

        assert_eq!(session.complete_load(ticket, Ok(catalog())), LoadOutcome::Inactive);
        assert!(session.load_state().is_loading());
        assert!(session.begin_load().is_none());
        assert!(session.reload().is_none());
    }

    #[test]
    fn test_reload_resets_and_invalidates_old_ticket() {
        let mut session = loaded();
        session.add_to_cart(OfferingId::new(2)).unwrap();
        session.filters_mut().set_size(6, true);

        let old = LoadTicket { generation: 0 };
        let fresh = session.reload().unwrap();
        assert_eq!(fresh.generation(), 1);
        assert!(session.load_state().is_loading());
        assert!(session.selection().is_empty());
        assert!(!session.filters().has_size_filter());

        assert_eq!(session.complete_load(old, Ok(Vec::new())), LoadOutcome::Stale);
        assert_eq!(session.complete_load(fresh, Ok(catalog())), LoadOutcome::Applied);
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_add_to_cart_requires_ready_catalog() {
        let mut session = Session::new();
        assert_eq!(
            session.add_to_cart(OfferingId::new(1)).unwrap_err(),
            CommerceError::CatalogNotReady
        );
    }

    #[test]
    fn test_add_to_cart_unknown_id() {
        let mut session = loaded();
        assert_eq!(
            session.add_to_cart(OfferingId::new(42)).unwrap_err(),
            CommerceError::OfferingNotFound(42)
        );
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_add_to_cart_ignores_filters() {
        let mut session = loaded();
        session.filters_mut().set_size(4, true);
        assert!(session.filtered().get(OfferingId::new(3)).is_none());

        session.add_to_cart(OfferingId::new(3)).unwrap();
        assert!(session.selection().is_selected(OfferingId::new(3)));
        assert!(session.selection().is_panel_open());
    }

    #[test]
    fn test_continue_booking() {
        let mut session = loaded();
        assert!(!session.continue_booking().unwrap());
        assert_eq!(session.booking().step(), BookingStep::SelectSkip);

        session.add_to_cart(OfferingId::new(1)).unwrap();
        assert!(session.continue_booking().unwrap());
        assert_eq!(session.booking().step(), BookingStep::PermitCheck);
        assert_eq!(session.booking().chosen_skip().map(|s| s.size), Some(4));
    }

    #[test]
    fn test_filtered_is_memoized() {
        let mut session = loaded();
        session.filtered();
        session.filtered();
        assert_eq!(session.recomputations(), 1);

        session.filters_mut().toggle_heavy_waste_allowed();
        assert_eq!(session.filtered().len(), 1);
        assert_eq!(session.recomputations(), 2);
    }

    #[test]
    fn test_reset_filters_uses_catalog() {
        let mut session = loaded();
        session.filters_mut().set_permit_required(true);
        session.reset_filters();

        assert_eq!(session.filters(), &FilterState::reset_for(&catalog()));
    }
}
