// src/geocode.rs

use crate::errors::ServerError;
use crate::geos::Coord;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "digs/0.1 (rental dashboard)";

// Nominatim's usage policy caps anonymous clients at roughly one request
// per second; repeated keystrokes mostly hit the cache anyway.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Resolves free-text place names to coordinates. Every lookup is scoped to
/// Dublin by suffix convention. Lookups that fail (network trouble, no match,
/// junk coordinates) resolve to None and the caller falls back to substring
/// search; geocoding is never a user-visible error.
pub struct Geocoder {
    client: reqwest::blocking::Client,
    cache: Mutex<HashMap<String, Option<Coord>>>,
    last_request: Mutex<Option<Instant>>,
    offline: bool,
}

impl Geocoder {
    pub fn new() -> Result<Self, ServerError> {
        Self::build(false)
    }

    /// Never issues lookups: every place resolves to None, so callers take
    /// their substring-search fallback. For tests and offline environments.
    pub fn disabled() -> Result<Self, ServerError> {
        Self::build(true)
    }

    fn build(offline: bool) -> Result<Self, ServerError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::GeocodeError(e.to_string()))?;

        Ok(Geocoder {
            client,
            cache: Mutex::new(HashMap::new()),
            last_request: Mutex::new(None),
            offline,
        })
    }

    /// Resolve a search-box string to a point, or None.
    pub fn resolve(&self, place: &str) -> Option<Coord> {
        let place = place.trim();
        if place.is_empty() || self.offline {
            return None;
        }

        let key = place.to_lowercase();
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return *hit;
            }
        }

        self.throttle();

        let resolved = match self.lookup(place) {
            Ok(coord) => coord,
            Err(e) => {
                eprintln!("⚠️ Geocoding '{place}' failed: {e}");
                None
            }
        };

        // A miss is cached too; retyping the same nonsense shouldn't
        // re-query the service.
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, resolved);
        }

        resolved
    }

    fn lookup(&self, place: &str) -> Result<Option<Coord>, ServerError> {
        let query = format!("{place}, Dublin");
        let url = url::Url::parse_with_params(
            NOMINATIM_URL,
            &[("q", query.as_str()), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| ServerError::GeocodeError(e.to_string()))?;

        let places: Vec<NominatimPlace> = self
            .client
            .get(url)
            .send()
            .map_err(|e| ServerError::GeocodeError(e.to_string()))?
            .json()
            .map_err(|e| ServerError::GeocodeError(e.to_string()))?;

        let Some(first) = places.first() else {
            return Ok(None);
        };

        match (first.lat.parse::<f64>(), first.lon.parse::<f64>()) {
            (Ok(lat), Ok(lng)) if lat.is_finite() && lng.is_finite() => {
                Ok(Some(Coord { lat, lng }))
            }
            _ => Ok(None),
        }
    }

    fn throttle(&self) {
        let Ok(mut last) = self.last_request.lock() else {
            return;
        };
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                std::thread::sleep(MIN_REQUEST_INTERVAL - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}
