use crate::router::handle;
use crate::tests::utils::{body_bytes, get, listing, make_app, seed_listings};

#[test]
fn export_serves_a_spreadsheet() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            listing("a", "Two-bed flat", 1800.0),
            listing("b", "Room to let", 700.0),
        ],
    );

    let mut resp = handle(get("/export"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.contains("spreadsheetml"));

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("listings_dublin.xlsx"));

    // XLSX is a zip container.
    let bytes = body_bytes(&mut resp);
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn export_filename_carries_the_selected_campus() {
    let app = make_app();
    seed_listings(&app.db, &[listing("a", "Two-bed flat", 1800.0)]);

    let resp = handle(get("/export?college=ucd"), &app).unwrap();
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(disposition.contains("listings_ucd.xlsx"));
}

#[test]
fn export_respects_filters() {
    let app = make_app();
    seed_listings(
        &app.db,
        &[
            listing("cheap", "Affordable studio", 900.0),
            listing("dear", "Penthouse", 4000.0),
        ],
    );

    // An empty result set still exports a valid (header-only) sheet.
    let mut resp = handle(get("/export?max_price=100"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_bytes(&mut resp).starts_with(b"PK"));
}
