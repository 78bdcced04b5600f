use crate::db::ingest_runs;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_app, post};

#[test]
fn admin_page_lists_ingest_runs() {
    let app = make_app();

    let run_id = app
        .db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, 1000))
        .unwrap();
    app.db
        .with_conn(|conn| {
            ingest_runs::end_ingest_run(conn, run_id, 1010, 25, 2, true, false, Some("hash"), None)
        })
        .unwrap();

    let mut resp = handle(get("/admin"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Recent Ingest Runs"));
    assert!(body.contains("Success"));
    assert!(body.contains("25"));
}

#[test]
fn ingest_trigger_redirects_back_to_admin() {
    let app = make_app();

    let resp = handle(post("/admin/ingest"), &app).unwrap();
    assert_eq!(resp.status(), 303);

    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/admin");
}

#[test]
fn admin_page_shows_failures() {
    let app = make_app();

    let run_id = app
        .db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, 1000))
        .unwrap();
    app.db
        .with_conn(|conn| {
            ingest_runs::end_ingest_run(
                conn,
                run_id,
                1010,
                0,
                0,
                false,
                false,
                None,
                Some("feed HTTP 500".to_string()),
            )
        })
        .unwrap();

    let mut resp = handle(get("/admin"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Failed"));
    assert!(body.contains("feed HTTP 500"));
}
