use crate::db::connection::Database;
use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::geos::Coord;
use chrono::Utc;
use rusqlite::{params, Row};

/// Upserts the normalized listing set in one transaction. Existing rows keep
/// their `first_seen_at`; everything else mirrors the latest feed state.
pub fn save_listings(db: &Database, listings: &[Listing]) -> Result<(), ServerError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        for listing in listings {
            let amenities = serde_json::to_string(&listing.amenities)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let (latitude, longitude) = match listing.coord {
                Some(Coord { lat, lng }) => (Some(lat), Some(lng)),
                None => (None, None),
            };

            tx.execute(
                r#"
                INSERT INTO listings (
                    id, title, location, address,
                    property_type, sub_type,
                    price, latitude, longitude,
                    amenities, bills_included, created_at,
                    first_seen_at, last_seen_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    location = excluded.location,
                    address = excluded.address,
                    property_type = excluded.property_type,
                    sub_type = excluded.sub_type,
                    price = excluded.price,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    amenities = excluded.amenities,
                    bills_included = excluded.bills_included,
                    created_at = excluded.created_at,
                    last_seen_at = excluded.last_seen_at
                "#,
                params![
                    listing.id,
                    listing.title,
                    listing.location,
                    listing.address,
                    listing.property_type,
                    listing.sub_type,
                    listing.price,
                    latitude,
                    longitude,
                    amenities,
                    listing.bills_included as i32,
                    listing.created_at,
                    now,
                    now,
                ],
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        Ok(())
    })
}

/// Loads the full normalized set for the pipeline. Newest feed records first
/// so the dashboard has a sensible order before any sort applies.
pub fn get_all_listings(db: &Database) -> Result<Vec<Listing>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                    id,             -- 0
                    title,          -- 1
                    location,       -- 2
                    address,        -- 3
                    property_type,  -- 4
                    sub_type,       -- 5
                    price,          -- 6
                    latitude,       -- 7
                    longitude,      -- 8
                    amenities,      -- 9
                    bills_included, -- 10
                    created_at      -- 11
                FROM listings
                ORDER BY created_at DESC, id
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_listing)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }

        Ok(results)
    })
}

pub fn count_listings(db: &Database) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))
            .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

fn row_to_listing(row: &Row) -> rusqlite::Result<Listing> {
    let latitude: Option<f64> = row.get(7)?;
    let longitude: Option<f64> = row.get(8)?;

    let amenities_json: String = row.get(9)?;
    // Rows are only ever written by save_listings, so bad JSON here means
    // the column was edited by hand; treat it as an empty tag list.
    let amenities = serde_json::from_str(&amenities_json).unwrap_or_default();

    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        address: row.get(3)?,
        property_type: row.get(4)?,
        sub_type: row.get(5)?,
        price: row.get(6)?,
        coord: match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(Coord { lat, lng }),
            _ => None,
        },
        amenities,
        bills_included: row.get::<_, i64>(10)? != 0,
        created_at: row.get(11)?,
    })
}
