use serde_json::json;
use skiphire_core::prelude::*;
use skiphire_core::catalog::offerings_from_json;

fn loaded_session(body: serde_json::Value) -> Session {
    let mut session = Session::new();
    let ticket = session.begin_load().expect("first load gets a ticket");
    let outcome = session.complete_load(ticket, Ok(offerings_from_json(body)));
    assert_eq!(outcome, LoadOutcome::Applied);
    session
}

#[test]
fn single_skip_end_to_end() {
    let offerings = offerings_from_json(json!([{
        "id": 1,
        "size": 6,
        "price_before_vat": 200,
        "vat": 20,
        "allowed_on_road": true,
        "allows_heavy_waste": false,
        "hire_period_days": 14,
        "transport_cost": null
    }]));

    let view = derive_filtered(&offerings, &FilterState::default());
    assert_eq!(view.len(), 1);

    let skip = &view.items[0];
    assert_eq!(skip.price_whole(), 240);
    assert_eq!(skip.title, "6 Yard Skip");
    assert_eq!(
        skip.features,
        vec![
            "14 day hire period",
            "Delivery and collection included",
            "Can be placed on road",
            "Not suitable for heavy materials",
        ]
    );
    assert!(!skip.permit_required);
}

#[test]
fn browse_filter_select_continue() {
    let mut session = loaded_session(json!([
        {"id": 11, "size": 4, "price_before_vat": 211, "vat": 20, "hire_period_days": 14,
         "allowed_on_road": true, "allows_heavy_waste": true, "transport_cost": null,
         "postcode": "NR32", "area": "Lowestoft"},
        {"id": 12, "size": 6, "price_before_vat": 264, "vat": 20, "hire_period_days": 14,
         "allowed_on_road": true, "allows_heavy_waste": true, "transport_cost": null},
        {"id": 13, "size": 8, "price_before_vat": 295, "vat": 20, "hire_period_days": 14,
         "allowed_on_road": false, "allows_heavy_waste": false, "transport_cost": 30},
        {"id": 14, "size": "broken", "price_before_vat": 1}
    ]));

    assert_eq!(session.raw_catalog().len(), 3);
    assert_eq!(session.filtered().outcome(), FilterOutcome::Matches(3));

    session.filters_mut().set_permit_required(true);
    let ids: Vec<i64> = session.filtered().iter().map(|o| o.id.value()).collect();
    assert_eq!(ids, vec![13]);
    assert!(session.filtered().items[0]
        .features
        .contains(&"Delivery and collection: £30".to_string()));

    session.add_to_cart(OfferingId::new(13)).unwrap();
    assert!(session.selection().is_panel_open());

    session.add_to_cart(OfferingId::new(12)).unwrap();
    assert!(session.selection().is_selected(OfferingId::new(12)));
    assert!(!session.selection().is_selected(OfferingId::new(13)));

    assert!(session.continue_booking().unwrap());
    assert_eq!(session.booking().step(), BookingStep::PermitCheck);
    assert_eq!(
        session.booking().chosen_skip().map(|s| s.id),
        Some(OfferingId::new(12))
    );
}

#[test]
fn no_results_then_reset() {
    let mut session = loaded_session(json!([
        {"id": 1, "size": 6, "price_before_vat": 200, "vat": 20, "allowed_on_road": true},
        {"id": 2, "size": 8, "price_before_vat": 300, "vat": 20, "allowed_on_road": true}
    ]));

    session.filters_mut().set_permit_required(true);
    session.filters_mut().set_heavy_waste_allowed(true);
    assert_eq!(session.filtered().outcome(), FilterOutcome::NoResults);

    session.reset_filters();
    let first = session.filters().clone();
    session.reset_filters();
    assert_eq!(session.filters(), &first);

    assert_eq!(first.sizes().keys().copied().collect::<Vec<_>>(), vec![6, 8]);
    assert_eq!(first.price_range(), PriceRange::new(240, 360).unwrap());
    assert_eq!(session.filtered().outcome(), FilterOutcome::Matches(2));
}

#[test]
fn empty_catalog_reset_falls_back_to_defaults() {
    let mut session = loaded_session(json!({"error": "unexpected shape"}));
    assert!(session.load_state().is_ready());
    assert!(session.raw_catalog().is_empty());

    session.reset_filters();
    assert_eq!(
        session.filters().sizes().keys().copied().collect::<Vec<_>>(),
        vec![4, 6, 8, 10, 12, 14, 16, 20, 40]
    );
    assert!(!session.filters().has_size_filter());
    assert_eq!(session.filters().price_range(), PriceRange::new(200, 800).unwrap());
    assert_eq!(session.filtered().outcome(), FilterOutcome::NoResults);
}

#[test]
fn failed_load_recovers_on_reload() {
    let mut session = Session::new();
    let ticket = session.begin_load().unwrap();
    session.complete_load(ticket, Err(FetchFailure::new("API error: 503")));
    assert_eq!(
        session.load_state().failure().map(|f| f.message.as_str()),
        Some("Failed to load skip data. Please try again later.")
    );

    let retry = session.reload().unwrap();
    assert!(session.load_state().is_loading());
    session.complete_load(
        retry,
        Ok(vec![Offering::new(1, 6, 200.0, 20.0)]),
    );
    assert_eq!(session.filtered().len(), 1);
}
