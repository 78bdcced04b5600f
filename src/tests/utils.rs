use crate::app::App;
use crate::db::connection::{init_db, Database};
use crate::db::listings::save_listings;
use crate::domain::listing::Listing;
use crate::feed::ListingFeed;
use crate::geocode::Geocoder;
use crate::geos::Coord;
use std::io::Read;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns a fresh test database using the production schema.
/// Connections are thread-local, so each test gets its own file.
pub fn make_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "digs_test_{}_{}.sqlite",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql").expect("Failed to initialize DB");
    db
}

/// App context with outbound geocoding disabled; place searches take the
/// substring-match path deterministically.
pub fn make_app() -> App {
    App {
        db: make_db(),
        geocoder: Geocoder::disabled().expect("Failed to build geocoder"),
        feed: Arc::new(ListingFeed::new()),
    }
}

/// Minimal valid listing; tests override the fields they care about.
pub fn listing(id: &str, title: &str, price: f64) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        location: String::new(),
        address: String::new(),
        property_type: String::new(),
        sub_type: None,
        price: Some(price),
        coord: None,
        amenities: Vec::new(),
        bills_included: false,
        created_at: None,
    }
}

pub fn at(mut l: Listing, lat: f64, lng: f64) -> Listing {
    l.coord = Some(Coord { lat, lng });
    l
}

pub fn seed_listings(db: &Database, listings: &[Listing]) {
    save_listings(db, listings).expect("Failed to seed listings");
}

pub fn get(path: &str) -> astra::Request {
    http::Request::builder()
        .method("GET")
        .uri(path)
        .body(astra::Body::empty())
        .expect("Failed to build request")
}

pub fn post(path: &str) -> astra::Request {
    http::Request::builder()
        .method("POST")
        .uri(path)
        .body(astra::Body::empty())
        .expect("Failed to build request")
}

pub fn body_string(resp: &mut astra::Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("Failed to read response body");
    String::from_utf8(bytes).expect("Response body was not UTF-8")
}

pub fn body_bytes(resp: &mut astra::Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("Failed to read response body");
    bytes
}
