//! Filtered views and size facets.

use crate::catalog::{DerivedOffering, Offering};
use crate::ids::OfferingId;
use crate::search::FilterState;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the rendering layer should show for a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "count")]
pub enum FilterOutcome {
    /// At least one offering passed the filters.
    Matches(usize),
    /// Nothing passed; offer reset/adjust actions.
    NoResults,
}

/// The offerings that passed the filters, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FilteredView {
    /// Matching offerings.
    pub items: Vec<DerivedOffering>,
    /// Size of the catalog the view was computed from.
    pub catalog_len: usize,
}

impl FilteredView {
    pub fn new(items: Vec<DerivedOffering>, catalog_len: usize) -> Self {
        Self { items, catalog_len }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn outcome(&self) -> FilterOutcome {
        if self.items.is_empty() {
            FilterOutcome::NoResults
        } else {
            FilterOutcome::Matches(self.items.len())
        }
    }

    /// Look up a visible offering by id.
    pub fn get(&self, id: OfferingId) -> Option<&DerivedOffering> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DerivedOffering> {
        self.items.iter()
    }
}

/// One size toggle with the number of catalog offerings of that size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeFacet {
    pub size: u32,
    pub count: usize,
    pub selected: bool,
}

/// Size toggles for the filter panel: every catalog size plus any size the
/// filter state already knows about, ascending.
pub fn size_facets(catalog: &[Offering], filters: &FilterState) -> Vec<SizeFacet> {
    let mut counts: BTreeMap<u32, usize> = filters.sizes().keys().map(|&size| (size, 0)).collect();
    for offering in catalog {
        *counts.entry(offering.size).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(size, count)| SizeFacet {
            size,
            count,
            selected: filters.sizes().get(&size).copied().unwrap_or(false),
        })
        .collect()
}
