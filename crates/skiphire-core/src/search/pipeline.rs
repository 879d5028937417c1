//! The filter-and-derive pipeline.

use crate::catalog::{DerivedOffering, Offering};
use crate::search::{FilterState, FilteredView};
use tracing::debug;

/// Derive every offering and keep the ones passing `filters`.
///
/// Pure and deterministic; catalog order is preserved.
pub fn derive_filtered(catalog: &[Offering], filters: &FilterState) -> FilteredView {
    let items = catalog
        .iter()
        .map(DerivedOffering::from_offering)
        .filter(|offering| filters.matches(offering))
        .collect();
    FilteredView::new(items, catalog.len())
}

#[derive(Debug, Clone)]
struct CachedView {
    revision: u64,
    filters: FilterState,
    view: FilteredView,
}

/// Memoizes [`derive_filtered`] on the catalog revision and filter state.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    cached: Option<CachedView>,
    recomputations: u64,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered view for `catalog` at `revision`, recomputed only when
    /// the revision or the filters differ from the cached run.
    pub fn view(&mut self, revision: u64, catalog: &[Offering], filters: &FilterState) -> &FilteredView {
        let stale = match &self.cached {
            Some(cached) => cached.revision != revision || cached.filters != *filters,
            None => true,
        };

        if stale {
            self.cached = None;
            self.recomputations += 1;
        }

        let cached = self.cached.get_or_insert_with(|| {
            let view = derive_filtered(catalog, filters);
            debug!(revision, matches = view.len(), catalog = catalog.len(), "recomputed filtered view");
            CachedView {
                revision,
                filters: filters.clone(),
                view,
            }
        });
        &cached.view
    }

    /// How many times the view has been recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
