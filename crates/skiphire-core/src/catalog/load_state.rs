//! Catalog loading states.

use crate::catalog::Offering;
use crate::error::FetchFailure;
use chrono::{DateTime, Utc};

/// Where the catalog fetch currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Request issued (or about to be), no result yet.
    #[default]
    Loading,
    /// Catalog received.
    Ready {
        offerings: Vec<Offering>,
        fetched_at: DateTime<Utc>,
    },
    /// Request failed; only a manual reload recovers.
    Failed(FetchFailure),
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready { .. } => "ready",
            LoadState::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready { .. })
    }

    /// Loaded offerings; empty unless ready.
    pub fn offerings(&self) -> &[Offering] {
        match self {
            LoadState::Ready { offerings, .. } => offerings,
            _ => &[],
        }
    }

    /// The failure, if the load failed.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            LoadState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// When the catalog arrived, if it did.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            LoadState::Ready { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }
}
