//! List the filtered catalog.

use anyhow::Result;
use serde_json::json;
use skiphire_core::search::{size_facets, FilterOutcome, FilterState};
use skiphire_core::CommerceError;

use super::{load_catalog, ListArgs};
use crate::context::Context;
use crate::output::{load_badge, yes_no};

const WIDTHS: [usize; 6] = [8, 14, 16, 8, 6, 6];

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let session = load_catalog(ctx, args.catalog_file.as_deref()).await?;
    let mut session = session.lock().await;

    apply_filters(session.filters_mut(), &args)?;
    let filters = session.filters().clone();
    let facets = size_facets(session.raw_catalog(), &filters);
    let view = session.filtered().clone();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "filters": filters,
            "outcome": view.outcome(),
            "facets": facets,
            "items": view.items,
        }));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Skips in {} {}",
        ctx.config.catalog.postcode, ctx.config.catalog.area
    ));
    ctx.output.kv("catalog", &load_badge(session.load_state()));
    ctx.output.kv(
        "price",
        &format!("£{} - £{}", filters.price_range().min(), filters.price_range().max()),
    );
    let sizes: Vec<String> = facets
        .iter()
        .map(|f| {
            let label = format!("{}yd ({})", f.size, f.count);
            if f.selected {
                console::style(label).bold().to_string()
            } else {
                label
            }
        })
        .collect();
    ctx.output.kv("sizes", &sizes.join(", "));

    match view.outcome() {
        FilterOutcome::NoResults => {
            ctx.output.warn("No skips match your filters.");
            ctx.output
                .info("Try removing a size, widening the price range or clearing the options.");
        }
        FilterOutcome::Matches(count) => {
            println!();
            ctx.output.table_row(
                &["ID", "SKIP", "PRICE", "HIRE", "ROAD", "HEAVY"],
                &WIDTHS,
            );
            for offering in view.iter() {
                let id = offering.id.to_string();
                let hire = format!("{} days", offering.hire_period_days);
                ctx.output.table_row(
                    &[
                        &id,
                        &offering.title,
                        &offering.price_label(),
                        &hire,
                        yes_no(offering.allowed_on_road),
                        yes_no(offering.allows_heavy_waste),
                    ],
                    &WIDTHS,
                );
            }
            println!();
            ctx.output
                .info(&format!("Showing {} of {} skips", count, view.catalog_len));
        }
    }

    Ok(())
}

/// Apply command line filters on top of the catalog-aligned state.
pub fn apply_filters(filters: &mut FilterState, args: &ListArgs) -> Result<(), CommerceError> {
    for &size in &args.sizes {
        filters.set_size(size, true);
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let current = filters.price_range();
        filters.set_price_range(
            args.min_price.unwrap_or(current.min()),
            args.max_price.unwrap_or(current.max()),
        )?;
    }

    filters.set_permit_required(args.permit_required);
    filters.set_heavy_waste_allowed(args.heavy_waste);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiphire_core::search::PriceRange;

    fn args() -> ListArgs {
        ListArgs {
            sizes: Vec::new(),
            min_price: None,
            max_price: None,
            permit_required: false,
            heavy_waste: false,
            catalog_file: None,
        }
    }

    #[test]
    fn test_no_args_leave_filters_alone() {
        let mut filters = FilterState::default();
        apply_filters(&mut filters, &args()).unwrap();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_sizes_and_flags() {
        let mut filters = FilterState::default();
        let args = ListArgs {
            sizes: vec![6, 8],
            permit_required: true,
            heavy_waste: true,
            ..args()
        };
        apply_filters(&mut filters, &args).unwrap();

        assert_eq!(filters.selected_sizes(), vec![6, 8]);
        assert!(filters.permit_required());
        assert!(filters.heavy_waste_allowed());
    }

    #[test]
    fn test_one_sided_price_keeps_other_bound() {
        let mut filters = FilterState::default();
        let args = ListArgs {
            max_price: Some(300),
            ..args()
        };
        apply_filters(&mut filters, &args).unwrap();
        assert_eq!(filters.price_range(), PriceRange::new(200, 300).unwrap());
    }

    #[test]
    fn test_inverted_price_rejected() {
        let mut filters = FilterState::default();
        let args = ListArgs {
            min_price: Some(500),
            max_price: Some(300),
            ..args()
        };
        assert!(apply_filters(&mut filters, &args).is_err());
    }
}
