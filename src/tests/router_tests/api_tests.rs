use crate::router::handle;
use crate::tests::utils::{at, body_string, get, listing, make_app, seed_listings};
use serde_json::Value;

#[test]
fn api_returns_json_listings() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            listing("a", "Two-bed flat", 1800.0),
            listing("b", "Room to let", 700.0),
        ],
    );

    let mut resp = handle(get("/api/listings?sort=price_low"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let results: Vec<Value> = serde_json::from_str(&body_string(&mut resp)).unwrap();
    assert_eq!(results.len(), 2);

    // price_low ordering, camelCase field names, flattened annotations.
    assert_eq!(results[0]["id"], "b");
    assert_eq!(results[0]["price"], 700.0);
    assert_eq!(results[0]["billsIncluded"], false);
    assert!(results[0]["distanceToCollege"].is_null());
}

#[test]
fn api_annotates_campus_distance_when_selected() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            at(listing("near", "Beside the front gate", 1000.0), 53.345, -6.255),
            listing("nowhere", "No coordinates", 1000.0),
        ],
    );

    let mut resp = handle(get("/api/listings?college=trinity"), &app).unwrap();
    let results: Vec<Value> = serde_json::from_str(&body_string(&mut resp)).unwrap();

    // Recommended sort with a campus: annotated listing first.
    assert_eq!(results[0]["id"], "near");
    let d = results[0]["distanceToCollege"].as_f64().unwrap();
    assert!(d < 1.0, "unexpected distance: {d}");

    // Coordinate-less listings are annotated null and sort last.
    assert_eq!(results[1]["id"], "nowhere");
    assert!(results[1]["distanceToCollege"].is_null());
}

#[test]
fn api_applies_the_bills_filter() {
    let app = make_app();

    let mut legacy = listing("legacy", "Old record", 800.0);
    legacy.amenities = vec!["bills".to_string(), "wifi".to_string()];
    let plain = listing("plain", "No bills", 800.0);

    seed_listings(&app.db, &[legacy, plain]);

    let mut resp = handle(get("/api/listings?bills=on"), &app).unwrap();
    let results: Vec<Value> = serde_json::from_str(&body_string(&mut resp)).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "legacy");
}
