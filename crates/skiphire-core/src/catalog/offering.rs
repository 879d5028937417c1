//! Raw offering records as returned by the remote catalog.

use crate::ids::OfferingId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A skip offering, exactly as the catalog describes it.
///
/// Optional and defaulted fields tolerate records that omit them or send
/// `null`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Catalog identifier.
    pub id: OfferingId,
    /// Capacity in yards.
    pub size: u32,
    /// Net price.
    pub price_before_vat: f64,
    /// VAT percentage (0-100).
    #[serde(default, deserialize_with = "null_as_default")]
    pub vat: f64,
    /// Hire period in days.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hire_period_days: u32,
    /// Delivery and collection cost; `None` means included in the price.
    #[serde(default)]
    pub transport_cost: Option<f64>,
    /// Whether the skip may be placed on a public road.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_on_road: bool,
    /// Whether heavy materials (soil, rubble) are accepted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub allows_heavy_waste: bool,
}

impl Offering {
    /// Create an offering with the required fields; everything else defaults.
    pub fn new(id: i64, size: u32, price_before_vat: f64, vat: f64) -> Self {
        Self {
            id: OfferingId::new(id),
            size,
            price_before_vat,
            vat,
            hire_period_days: 0,
            transport_cost: None,
            allowed_on_road: false,
            allows_heavy_waste: false,
        }
    }

    /// Set the hire period.
    pub fn with_hire_period(mut self, days: u32) -> Self {
        self.hire_period_days = days;
        self
    }

    /// Set the transport cost (`None` = included).
    pub fn with_transport_cost(mut self, cost: Option<f64>) -> Self {
        self.transport_cost = cost;
        self
    }

    /// Set road placement.
    pub fn with_allowed_on_road(mut self, allowed: bool) -> Self {
        self.allowed_on_road = allowed;
        self
    }

    /// Set heavy waste acceptance.
    pub fn with_heavy_waste(mut self, allowed: bool) -> Self {
        self.allows_heavy_waste = allowed;
        self
    }

    /// VAT-inclusive price in whole pounds, rounded half up.
    pub fn final_price_whole(&self) -> i64 {
        (self.price_before_vat * (1.0 + self.vat / 100.0) + 0.5).floor() as i64
    }

    /// Whether placing this skip needs a council permit.
    pub fn permit_required(&self) -> bool {
        !self.allowed_on_road
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Coerce a catalog response body into offerings.
///
/// A non-array body yields an empty catalog. Records that cannot be read as
/// an [`Offering`] are dropped one by one; the remaining records keep their
/// original order.
pub fn offerings_from_json(body: Value) -> Vec<Offering> {
    let records = match body {
        Value::Array(records) => records,
        other => {
            warn!(
                kind = json_kind(&other),
                "catalog response is not an array, treating as empty"
            );
            return Vec::new();
        }
    };

    let total = records.len();
    let offerings: Vec<Offering> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Offering>(record) {
            Ok(offering) => Some(offering),
            Err(e) => {
                warn!(index, error = %e, "dropping malformed catalog record");
                None
            }
        })
        .collect();

    debug!(total, kept = offerings.len(), "parsed catalog records");
    offerings
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_final_price() {
        assert_eq!(Offering::new(1, 6, 200.0, 20.0).final_price_whole(), 240);
        assert_eq!(Offering::new(2, 4, 278.0, 20.0).final_price_whole(), 334);
        assert_eq!(Offering::new(3, 8, 100.0, 0.0).final_price_whole(), 100);
    }

    #[test]
    fn test_final_price_rounds_half_up() {
        // 202.5 * 1.0 = 202.5 -> 203
        assert_eq!(Offering::new(1, 6, 202.5, 0.0).final_price_whole(), 203);
        // 202.4 -> 202
        assert_eq!(Offering::new(2, 6, 202.4, 0.0).final_price_whole(), 202);
    }

    #[test]
    fn test_deserialize_full_record_ignores_extra_fields() {
        let offering: Offering = serde_json::from_value(json!({
            "id": 17933,
            "size": 4,
            "hire_period_days": 14,
            "transport_cost": null,
            "per_tonne_cost": null,
            "price_before_vat": 278,
            "vat": 20,
            "postcode": "NR32",
            "area": "",
            "forbidden": false,
            "allowed_on_road": true,
            "allows_heavy_waste": true
        }))
        .unwrap();

        assert_eq!(offering.id, OfferingId::new(17933));
        assert_eq!(offering.size, 4);
        assert_eq!(offering.hire_period_days, 14);
        assert_eq!(offering.transport_cost, None);
        assert!(offering.allowed_on_road);
        assert!(offering.allows_heavy_waste);
    }

    #[test]
    fn test_deserialize_defaults_missing_and_null_fields() {
        let offering: Offering = serde_json::from_value(json!({
            "id": 5,
            "size": 6,
            "price_before_vat": 300.0,
            "vat": null
        }))
        .unwrap();

        assert_eq!(offering.vat, 0.0);
        assert_eq!(offering.hire_period_days, 0);
        assert_eq!(offering.transport_cost, None);
        assert!(!offering.allowed_on_road);
        assert!(!offering.allows_heavy_waste);
    }

    #[test]
    fn test_offerings_from_json_drops_malformed_records() {
        let body = json!([
            {"id": 1, "size": 4, "price_before_vat": 200, "vat": 20},
            {"id": 2, "price_before_vat": 250, "vat": 20},
            {"id": "three", "size": 8, "price_before_vat": 300},
            {"id": 4, "size": 10, "price_before_vat": 400, "vat": 20}
        ]);

        let offerings = offerings_from_json(body);
        let ids: Vec<i64> = offerings.iter().map(|o| o.id.value()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_offerings_from_json_non_array_is_empty() {
        assert!(offerings_from_json(json!({"error": "nope"})).is_empty());
        assert!(offerings_from_json(Value::Null).is_empty());
    }
}
