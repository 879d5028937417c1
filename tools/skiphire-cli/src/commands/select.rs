//! Put a skip in the cart and continue the booking.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Select};
use serde_json::json;
use skiphire_core::booking::BookingStep;
use skiphire_core::catalog::DerivedOffering;
use skiphire_core::session::Session;
use skiphire_core::OfferingId;
use tracing::debug;

use super::{load_catalog, SelectArgs};
use crate::context::Context;
use crate::output::{offering_summary, yes_no};

/// Run the select command.
pub async fn run(args: SelectArgs, ctx: &Context) -> Result<()> {
    let session = load_catalog(ctx, args.catalog_file.as_deref()).await?;
    let mut session = session.lock().await;

    let interactive = args.id.is_none();
    let id = match args.id {
        Some(id) => OfferingId::new(id),
        None => pick_offering(&mut session, ctx)?,
    };

    session.add_to_cart(id)?;
    if let Some(item) = session.selection().item() {
        show_cart_panel(item, ctx);
    }

    if interactive && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Continue with this skip?")
            .default(true)
            .interact()?;

        if !confirmed {
            session.clear_cart();
            ctx.output.warn("Selection cleared");
            return Ok(());
        }
    }

    session.continue_booking()?;
    let step = session.booking().step();
    debug!(id = %id, step = step.as_str(), "booking continued");

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "selection": session.selection().state(),
            "booking": session.booking(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Continuing to {} (step {} of {}, {}% done)",
        step.display_name(),
        step.number(),
        BookingStep::ALL.len(),
        session.booking().progress_percent()
    ));

    Ok(())
}

fn pick_offering(session: &mut Session, ctx: &Context) -> Result<OfferingId> {
    if ctx.output.is_json() {
        bail!("An offering ID is required with --json");
    }

    let view = session.filtered();
    if view.is_empty() {
        bail!("No skips available to select");
    }

    let items: Vec<String> = view.iter().map(offering_summary).collect();
    let selection = Select::new()
        .with_prompt("Select a skip")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(view.items[selection].id)
}

fn show_cart_panel(item: &DerivedOffering, ctx: &Context) {
    ctx.output.header("Your selection");
    ctx.output.kv("skip", &item.title);
    ctx.output.kv("price", &item.price_label());
    ctx.output.kv("hire period", &format!("{} days", item.hire_period_days));
    ctx.output.kv("permit required", yes_no(item.permit_required));
    ctx.output.kv("image", &item.image);
    for feature in &item.features {
        ctx.output.list_item(feature);
    }
    println!();
}
