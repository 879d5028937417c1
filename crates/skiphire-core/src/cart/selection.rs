//! Single-item selection (the cart).

use crate::catalog::DerivedOffering;
use crate::error::CommerceError;
use crate::ids::OfferingId;
use serde::Serialize;
use tracing::debug;

/// Receives the chosen offering when the user continues.
pub trait Navigator {
    /// Move on to the next step with `item`.
    fn proceed(&mut self, item: &DerivedOffering) -> Result<(), CommerceError>;
}

/// Selection states.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "snake_case", tag = "state", content = "item")]
pub enum SelectionState {
    #[default]
    Empty,
    Selected(DerivedOffering),
}

/// At most one chosen offering, plus the visibility of the cart panel.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Selection {
    state: SelectionState,
    panel_open: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `item`, replacing any previous choice, and open the panel.
    ///
    /// Returns the replaced item, if any.
    pub fn add(&mut self, item: DerivedOffering) -> Option<DerivedOffering> {
        debug!(id = %item.id, size = item.size, "offering selected");
        let previous = std::mem::replace(&mut self.state, SelectionState::Selected(item));
        self.panel_open = true;
        match previous {
            SelectionState::Selected(old) => Some(old),
            SelectionState::Empty => None,
        }
    }

    /// Empty the selection and close the panel. Returns the removed item.
    pub fn clear(&mut self) -> Option<DerivedOffering> {
        self.panel_open = false;
        match std::mem::take(&mut self.state) {
            SelectionState::Selected(old) => {
                debug!(id = %old.id, "selection cleared");
                Some(old)
            }
            SelectionState::Empty => None,
        }
    }

    /// Hand the selected item to `navigator`. Does nothing when empty.
    ///
    /// Returns whether the navigator was called.
    pub fn continue_with<N>(&self, navigator: &mut N) -> Result<bool, CommerceError>
    where
        N: Navigator + ?Sized,
    {
        match &self.state {
            SelectionState::Selected(item) => {
                navigator.proceed(item)?;
                Ok(true)
            }
            SelectionState::Empty => Ok(false),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn item(&self) -> Option<&DerivedOffering> {
        match &self.state {
            SelectionState::Selected(item) => Some(item),
            SelectionState::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SelectionState::Empty)
    }

    /// Whether `id` is the selected offering (drives the card toggle).
    pub fn is_selected(&self, id: OfferingId) -> bool {
        self.item().map(|item| item.id == id).unwrap_or(false)
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }
}
