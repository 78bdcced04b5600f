use crate::app::App;
use crate::db::connection::{init_db, Database};
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod app;
mod db;
mod domain;
mod errors;
mod feed;
mod geocode;
mod geos;
mod ingest;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Create the database handle and apply the schema
    let db_path = std::env::var("DIGS_DB").unwrap_or_else(|_| "digs.sqlite3".to_string());
    let db = Database::new(db_path);

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }
    println!("✅ Database ready");

    // 2️⃣ Wire up the app context (geocoder, change feed)
    let app = match App::new(db) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("❌ App initialization failed: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Log feed refreshes as they land
    let refreshes = app.feed.subscribe();
    std::thread::spawn(move || {
        for event in refreshes {
            match event {
                crate::feed::FeedEvent::Refreshed { listings } => {
                    println!("🔄 Listing set refreshed ({listings} listings)");
                }
            }
        }
    });

    // 4️⃣ Pull the feed once on boot, when configured
    if std::env::var(crate::ingest::FEED_URL_VAR).is_ok() {
        crate::ingest::run_ingest(&app.db, app.feed.clone());
    } else {
        println!("ℹ️ {} not set, serving stored listings only", crate::ingest::FEED_URL_VAR);
    }

    // 5️⃣ Start the server
    let addr: SocketAddr = std::env::var("DIGS_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("❌ Bad DIGS_ADDR: {e}");
            std::process::exit(1);
        });
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    // 6️⃣ Serve requests, passing the app context into the closure
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
