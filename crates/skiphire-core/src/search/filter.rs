//! Filter state and the per-offering predicate.

use crate::catalog::describe::DEFAULT_SIZES;
use crate::catalog::{DerivedOffering, Offering};
use crate::error::CommerceError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Default lower price bound in whole pounds.
pub const DEFAULT_MIN_PRICE: i64 = 200;
/// Default upper price bound in whole pounds.
pub const DEFAULT_MAX_PRICE: i64 = 800;

/// Inclusive whole-pound bounds on the VAT-inclusive price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    min: i64,
    max: i64,
}

impl PriceRange {
    /// Create a range; `min` must not exceed `max`.
    pub fn new(min: i64, max: i64) -> Result<Self, CommerceError> {
        if min > max {
            return Err(CommerceError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds covering every final price in the catalog, widened to tens.
    ///
    /// Returns `None` for an empty catalog.
    pub fn from_catalog(catalog: &[Offering]) -> Option<Self> {
        let mut prices = catalog.iter().map(Offering::final_price_whole);
        let first = prices.next()?;
        let (lowest, highest) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        Some(Self {
            min: lowest.div_euclid(10).saturating_mul(10),
            max: highest.saturating_add(9).div_euclid(10).saturating_mul(10),
        })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Whether a whole-pound price lies inside the bounds.
    pub fn contains(&self, price: i64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Whether this range lies entirely inside `outer`.
    pub fn is_within(&self, outer: &PriceRange) -> bool {
        outer.min <= self.min && self.max <= outer.max
    }

    /// Whether the two ranges share at least one price.
    pub fn overlaps(&self, other: &PriceRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// The user's current filter selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    sizes: BTreeMap<u32, bool>,
    price_range: PriceRange,
    permit_required: bool,
    heavy_waste_allowed: bool,
    price_range_touched: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.iter().map(|&size| (size, false)).collect(),
            price_range: PriceRange::default(),
            permit_required: false,
            heavy_waste_allowed: false,
            price_range_touched: false,
        }
    }
}

impl FilterState {
    /// Filter state reset against a catalog.
    ///
    /// Sizes become the distinct catalog sizes, all unselected; the price
    /// range spans the catalog's final prices rounded out to tens. An empty
    /// catalog yields [`FilterState::default`].
    pub fn reset_for(catalog: &[Offering]) -> Self {
        let Some(price_range) = PriceRange::from_catalog(catalog) else {
            return Self::default();
        };

        Self {
            sizes: catalog.iter().map(|o| (o.size, false)).collect(),
            price_range,
            permit_required: false,
            heavy_waste_allowed: false,
            price_range_touched: false,
        }
    }

    /// Size toggles, ascending by size.
    pub fn sizes(&self) -> &BTreeMap<u32, bool> {
        &self.sizes
    }

    /// Sizes currently switched on.
    pub fn selected_sizes(&self) -> Vec<u32> {
        self.sizes
            .iter()
            .filter(|(_, on)| **on)
            .map(|(size, _)| *size)
            .collect()
    }

    /// Whether any size is switched on.
    pub fn has_size_filter(&self) -> bool {
        self.sizes.values().any(|&on| on)
    }

    /// Flip one size toggle. Unknown sizes start out unselected.
    pub fn toggle_size(&mut self, size: u32) {
        let entry = self.sizes.entry(size).or_insert(false);
        *entry = !*entry;
    }

    pub fn set_size(&mut self, size: u32, selected: bool) {
        self.sizes.insert(size, selected);
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// Replace both price bounds.
    pub fn set_price_range(&mut self, min: i64, max: i64) -> Result<(), CommerceError> {
        self.price_range = PriceRange::new(min, max)?;
        self.price_range_touched = true;
        Ok(())
    }

    /// Move the upper bound (the slider). The lower bound follows it down
    /// when needed so the range stays valid.
    pub fn set_max_price(&mut self, max: i64) {
        self.price_range = PriceRange {
            min: self.price_range.min.min(max),
            max,
        };
        self.price_range_touched = true;
    }

    /// Whether the user has edited the price bounds since the last reset.
    pub fn price_range_touched(&self) -> bool {
        self.price_range_touched
    }

    pub fn permit_required(&self) -> bool {
        self.permit_required
    }

    pub fn set_permit_required(&mut self, on: bool) {
        self.permit_required = on;
    }

    pub fn toggle_permit_required(&mut self) {
        self.permit_required = !self.permit_required;
    }

    pub fn heavy_waste_allowed(&self) -> bool {
        self.heavy_waste_allowed
    }

    pub fn set_heavy_waste_allowed(&mut self, on: bool) {
        self.heavy_waste_allowed = on;
    }

    pub fn toggle_heavy_waste_allowed(&mut self) {
        self.heavy_waste_allowed = !self.heavy_waste_allowed;
    }

    /// Whether an offering passes every active clause.
    pub fn matches(&self, offering: &DerivedOffering) -> bool {
        if self.has_size_filter() && !self.sizes.get(&offering.size).copied().unwrap_or(false) {
            return false;
        }

        if !self.price_range.contains(offering.price_whole()) {
            return false;
        }

        if self.permit_required && offering.allowed_on_road {
            return false;
        }

        if self.heavy_waste_allowed && !offering.allows_heavy_waste {
            return false;
        }

        true
    }

    /// Bring the price range in line with a freshly loaded catalog.
    ///
    /// Untouched bounds are re-derived from the catalog. Touched bounds are
    /// only corrected when they leave the catalog bounds: each bound is
    /// clamped into them, or the whole range is replaced when nothing
    /// overlaps. An empty catalog changes nothing. Returns whether the range
    /// changed.
    pub fn align_to_catalog(&mut self, catalog: &[Offering]) -> bool {
        let Some(bounds) = PriceRange::from_catalog(catalog) else {
            return false;
        };

        let before = self.price_range;
        self.price_range = if !self.price_range_touched {
            bounds
        } else if before.is_within(&bounds) {
            before
        } else if before.overlaps(&bounds) {
            PriceRange {
                min: before.min.clamp(bounds.min, bounds.max),
                max: before.max.clamp(bounds.min, bounds.max),
            }
        } else {
            bounds
        };

        let changed = self.price_range != before;
        if changed {
            debug!(
                from_min = before.min,
                from_max = before.max,
                to_min = self.price_range.min,
                to_max = self.price_range.max,
                "price range aligned to catalog"
            );
        }
        changed
    }
}
