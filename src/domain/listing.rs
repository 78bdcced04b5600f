// src/domain/listing.rs

use crate::geos::Coord;
use crate::ingest::models::RawListing;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// A rental listing as normalized, flattened, and validated, ready for the
/// relevance pipeline. This acts as an anti-corruption layer between the
/// dynamic upstream documents and the rest of the application: string-or-number
/// prices, split `amenities`/`tags` arrays and absent booleans are all resolved
/// here, once, and nowhere else.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub location: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub sub_type: Option<String>,
    /// Monthly rent in euro. None when the upstream value was missing or malformed.
    pub price: Option<f64>,
    pub coord: Option<Coord>,
    /// Union of the upstream `amenities` and legacy `tags` arrays,
    /// deduplicated case-insensitively, first spelling wins.
    pub amenities: Vec<String>,
    pub bills_included: bool,
    /// Upstream creation time, epoch seconds.
    pub created_at: Option<i64>,
}

impl Listing {
    /// Creates a clean `Listing` from the raw upstream document.
    /// Only the id is required; everything else degrades to a default
    /// rather than rejecting the record.
    pub fn from_raw(raw: &RawListing) -> Result<Self, String> {
        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("Missing or empty listing id")?
            .to_string();

        let coord = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coord { lat, lng })
            }
            _ => None,
        };

        let mut amenities = Vec::new();
        let mut seen = HashSet::new();
        for tag in raw.amenities.iter().flatten().chain(raw.tags.iter().flatten()) {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            if seen.insert(tag.to_lowercase()) {
                amenities.push(tag.to_string());
            }
        }

        Ok(Listing {
            id,
            title: raw.title.clone().unwrap_or_default(),
            location: raw.location.clone().unwrap_or_default(),
            address: raw.address.clone().unwrap_or_default(),
            property_type: raw.property_type.clone().unwrap_or_default(),
            sub_type: raw.sub_type.clone(),
            price: coerce_price(raw.price.as_ref()),
            coord,
            amenities,
            bills_included: raw.bills_included.unwrap_or(false),
            created_at: raw.created_at.as_ref().map(|t| t.seconds),
        })
    }
}

/// Upstream prices arrive as JSON numbers or numeric strings, occasionally as
/// garbage. Anything that doesn't parse to a finite, non-negative float is None.
pub fn coerce_price(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if n.is_finite() && n >= 0.0 {
        Some(n)
    } else {
        None
    }
}

/// A listing annotated by the pipeline for one particular set of criteria.
/// The distances are derived per computation and never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedListing {
    #[serde(flatten)]
    pub listing: Listing,
    /// Kilometers from the resolved search point, when one was resolved.
    pub distance_to_search: Option<f64>,
    /// Kilometers from the selected campus, when one is selected.
    pub distance_to_college: Option<f64>,
}

impl RankedListing {
    pub fn new(listing: Listing) -> Self {
        RankedListing {
            listing,
            distance_to_search: None,
            distance_to_college: None,
        }
    }
}
