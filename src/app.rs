// src/app.rs

use crate::db::connection::Database;
use crate::errors::ServerError;
use crate::feed::ListingFeed;
use crate::geocode::Geocoder;
use std::sync::Arc;

/// Everything a request handler needs, built once in `main` and passed down
/// explicitly. No module-level singletons.
pub struct App {
    pub db: Database,
    pub geocoder: Geocoder,
    pub feed: Arc<ListingFeed>,
}

impl App {
    pub fn new(db: Database) -> Result<Self, ServerError> {
        // DIGS_OFFLINE keeps the dashboard usable without outbound lookups;
        // area searches fall back to substring matching.
        let geocoder = if std::env::var("DIGS_OFFLINE").is_ok() {
            Geocoder::disabled()?
        } else {
            Geocoder::new()?
        };

        Ok(App {
            db,
            geocoder,
            feed: Arc::new(ListingFeed::new()),
        })
    }
}
