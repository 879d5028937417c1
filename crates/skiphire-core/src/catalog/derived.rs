//! Presentation records computed from raw offerings.

use crate::catalog::describe::{description_for, features_for, title_for, SKIP_IMAGE};
use crate::catalog::Offering;
use crate::ids::OfferingId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// An offering enriched with its display price, description and features.
///
/// Recomputed from the raw record whenever needed; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedOffering {
    /// Catalog identifier.
    pub id: OfferingId,
    /// Capacity in yards.
    pub size: u32,
    /// Card title, e.g. "6 Yard Skip".
    pub title: String,
    /// Size description.
    pub description: String,
    /// Feature lines in display order.
    pub features: Vec<String>,
    /// VAT-inclusive price in whole pounds.
    pub final_price: Money,
    /// Whether a permit is needed (not allowed on road).
    pub permit_required: bool,
    pub allowed_on_road: bool,
    pub allows_heavy_waste: bool,
    pub hire_period_days: u32,
    pub transport_cost: Option<f64>,
    /// Thumbnail path.
    pub image: String,
}

impl DerivedOffering {
    /// Derive the presentation record for one offering.
    pub fn from_offering(offering: &Offering) -> Self {
        Self {
            id: offering.id,
            size: offering.size,
            title: title_for(offering.size),
            description: description_for(offering.size),
            features: features_for(offering),
            final_price: Money::from_whole(offering.final_price_whole(), Currency::GBP),
            permit_required: offering.permit_required(),
            allowed_on_road: offering.allowed_on_road,
            allows_heavy_waste: offering.allows_heavy_waste,
            hire_period_days: offering.hire_period_days,
            transport_cost: offering.transport_cost,
            image: SKIP_IMAGE.to_string(),
        }
    }

    /// Final price in whole pounds.
    pub fn price_whole(&self) -> i64 {
        self.final_price.whole_units()
    }

    /// Price label as shown on cards and in the cart, e.g. "£240 per week".
    pub fn price_label(&self) -> String {
        format!("{} per week", self.final_price)
    }
}

impl From<&Offering> for DerivedOffering {
    fn from(offering: &Offering) -> Self {
        Self::from_offering(offering)
    }
}
