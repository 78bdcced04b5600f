use crate::db::ingest_runs;
use crate::db::listings::{count_listings, get_all_listings, save_listings};
use crate::tests::utils::{at, listing, make_db};

#[test]
fn listings_round_trip_through_sqlite() {
    let db = make_db();

    let mut a = at(listing("a", "Two-bed flat", 1800.0), 53.35, -6.26);
    a.amenities = vec!["WiFi".to_string(), "Parking".to_string()];
    a.bills_included = true;
    a.created_at = Some(1_700_000_000);
    a.sub_type = Some("Apartment".to_string());

    let mut b = listing("b", "Room to let", 0.0);
    b.price = None; // malformed upstream price

    save_listings(&db, &[a.clone(), b.clone()]).unwrap();

    let stored = get_all_listings(&db).unwrap();
    assert_eq!(stored.len(), 2);

    let got_a = stored.iter().find(|l| l.id == "a").unwrap();
    assert_eq!(got_a, &a);

    let got_b = stored.iter().find(|l| l.id == "b").unwrap();
    assert_eq!(got_b.price, None);
    assert_eq!(got_b.coord, None);
    assert!(got_b.amenities.is_empty());
}

#[test]
fn saving_twice_upserts_instead_of_duplicating() {
    let db = make_db();

    save_listings(&db, &[listing("a", "Before", 1000.0)]).unwrap();
    save_listings(&db, &[listing("a", "After", 1250.0)]).unwrap();

    assert_eq!(count_listings(&db).unwrap(), 1);

    let stored = get_all_listings(&db).unwrap();
    assert_eq!(stored[0].title, "After");
    assert_eq!(stored[0].price, Some(1250.0));
}

#[test]
fn ingest_run_bookkeeping() {
    let db = make_db();

    let run_id = db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, 1000))
        .unwrap();

    // Unfinished run has no hash yet.
    let hash = db
        .with_conn(|conn| ingest_runs::last_payload_hash(conn))
        .unwrap();
    assert_eq!(hash, None);

    db.with_conn(|conn| {
        ingest_runs::end_ingest_run(conn, run_id, 1010, 42, 3, true, false, Some("abc123"), None)
    })
    .unwrap();

    let hash = db
        .with_conn(|conn| ingest_runs::last_payload_hash(conn))
        .unwrap();
    assert_eq!(hash.as_deref(), Some("abc123"));

    let runs = db
        .with_conn(|conn| ingest_runs::get_recent_runs(conn))
        .unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].listings_seen, Some(42));
    assert_eq!(runs[0].skipped, Some(3));
    assert_eq!(runs[0].success, Some(true));
}

#[test]
fn failed_run_does_not_advance_the_payload_hash() {
    let db = make_db();

    let ok = db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, 1000))
        .unwrap();
    db.with_conn(|conn| {
        ingest_runs::end_ingest_run(conn, ok, 1010, 10, 0, true, false, Some("first"), None)
    })
    .unwrap();

    let failed = db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, 2000))
        .unwrap();
    db.with_conn(|conn| {
        ingest_runs::end_ingest_run(
            conn,
            failed,
            2010,
            0,
            0,
            false,
            false,
            None,
            Some("feed HTTP 500".to_string()),
        )
    })
    .unwrap();

    let hash = db
        .with_conn(|conn| ingest_runs::last_payload_hash(conn))
        .unwrap();
    assert_eq!(hash.as_deref(), Some("first"));
}
