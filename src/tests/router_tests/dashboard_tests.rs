// src/tests/router_tests/dashboard_tests.rs

use crate::domain::filters::{Category, SortBy};
use crate::errors::ServerError;
use crate::router::{criteria_from_query, handle};
use crate::tests::utils::{body_string, get, listing, make_app, seed_listings};

#[test]
fn dashboard_renders_seeded_listings() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            listing("a", "Two-bed flat in Ranelagh", 1800.0),
            listing("b", "Room in Phibsborough", 700.0),
        ],
    );

    let mut resp = handle(get("/dashboard"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Two-bed flat in Ranelagh"));
    assert!(body.contains("Room in Phibsborough"));
}

#[test]
fn results_fragment_respects_the_price_ceiling() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            listing("cheap", "Affordable studio", 900.0),
            listing("dear", "Penthouse on the quays", 4000.0),
        ],
    );

    let mut resp = handle(get("/dashboard/results?max_price=1200"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Affordable studio"));
    assert!(!body.contains("Penthouse on the quays"));
}

#[test]
fn results_fragment_shows_empty_state() {
    let app = make_app();
    seed_listings(&app.db, &[listing("a", "Anything", 2000.0)]);

    let mut resp = handle(get("/dashboard/results?max_price=100"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("No listings match your filters."));
}

#[test]
fn amenity_filters_are_conjunctive_end_to_end() {
    let app = make_app();

    let mut gym_only = listing("gym_only", "Gym only", 900.0);
    gym_only.amenities = vec!["Gym".to_string()];

    let mut both = listing("both", "Gym and parking", 950.0);
    both.amenities = vec!["Gym Access".to_string(), "Parking".to_string()];

    seed_listings(&app.db, &[gym_only, both]);

    let mut resp = handle(
        get("/dashboard/results?amenity=gym&amenity=parking"),
        &app,
    )
    .unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Gym and parking"));
    assert!(!body.contains("Gym only"));
}

#[test]
fn substring_search_matches_location_text() {
    let app = make_app();

    let mut rathmines = listing("a", "Bright double", 1000.0);
    rathmines.location = "Rathmines, Dublin 6".to_string();
    let mut elsewhere = listing("b", "Garden flat", 1000.0);
    elsewhere.location = "Clontarf".to_string();

    seed_listings(&app.db, &[rathmines, elsewhere]);

    // Test app geocoder is disabled, so this exercises the substring branch.
    let mut resp = handle(get("/dashboard/results?place=clontarf"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Garden flat"));
    assert!(!body.contains("Bright double"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = make_app();
    let err = handle(get("/no-such-page"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn criteria_parsing_covers_every_control() {
    let req = get(
        "/dashboard/results?max_price=1500&college=trinity&place=Rathmines&bills=on&amenity=wifi&amenity=gym&sort=price_low&category=sharing",
    );
    let criteria = criteria_from_query(&req);

    assert_eq!(criteria.max_price, 1500.0);
    assert_eq!(criteria.college.unwrap().slug, "trinity");
    assert_eq!(criteria.search_place, "Rathmines");
    assert!(criteria.bills_included);
    assert_eq!(criteria.quick_filters, vec!["wifi", "gym"]);
    assert_eq!(criteria.sort_by, SortBy::PriceLow);
    assert_eq!(criteria.category, Category::Sharing);
}

#[test]
fn malformed_criteria_fall_back_to_defaults() {
    let req = get("/dashboard/results?max_price=banana&college=oxford&sort=sideways");
    let criteria = criteria_from_query(&req);

    assert_eq!(criteria.max_price, crate::domain::filters::DEFAULT_MAX_PRICE);
    assert!(criteria.college.is_none());
    assert_eq!(criteria.sort_by, SortBy::Recommended);
}
