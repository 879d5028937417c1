//! Display text for offerings: size descriptions and feature lines.

use crate::catalog::Offering;

/// Sizes offered when no catalog is available to derive them from.
pub const DEFAULT_SIZES: [u32; 9] = [4, 6, 8, 10, 12, 14, 16, 20, 40];

/// Thumbnail shown for every skip.
pub const SKIP_IMAGE: &str = "/images/skip.jpg";

/// Description for a skip size, with a generic fallback for unknown sizes.
pub fn description_for(size: u32) -> String {
    let known = match size {
        4 => "Ideal for small domestic projects and garden waste",
        6 => "Perfect for medium home renovations and commercial use",
        8 => "Ideal for large renovation projects and building sites",
        10 => "For major construction projects and industrial waste",
        12 => "For largest construction projects",
        14 => "For industrial waste disposal",
        16 => "For large industrial waste",
        20 => "For major industrial waste",
        40 => "For largest industrial projects",
        _ => return format!("{} Yard Skip for various waste disposal needs", size),
    };
    known.to_string()
}

/// Card title for a skip size.
pub fn title_for(size: u32) -> String {
    format!("{} Yard Skip", size)
}

/// Feature lines in display order: hire period, delivery, road placement,
/// heavy materials.
pub fn features_for(offering: &Offering) -> Vec<String> {
    let mut features = Vec::with_capacity(4);

    features.push(format!("{} day hire period", offering.hire_period_days));

    match offering.transport_cost {
        None => features.push("Delivery and collection included".to_string()),
        Some(cost) => features.push(format!("Delivery and collection: \u{00a3}{}", cost)),
    }

    features.push(
        if offering.allowed_on_road {
            "Can be placed on road"
        } else {
            "Cannot be placed on road"
        }
        .to_string(),
    );

    features.push(
        if offering.allows_heavy_waste {
            "Suitable for heavy materials"
        } else {
            "Not suitable for heavy materials"
        }
        .to_string(),
    );

    features
}
