use serde::Deserialize;
use serde_json::Value;

// listing
//  ├── id
//  ├── title / location / address
//  ├── type / subType
//  ├── price            (number OR numeric string, occasionally junk)
//  ├── latitude / longitude
//  ├── amenities        (current schema)
//  ├── tags             (legacy schema, may coexist with amenities)
//  ├── billsIncluded    (absent on old records)
//  └── createdAt        ({ seconds } or legacy { _seconds })

/// A listing document exactly as the upstream feed serves it. Every field
/// beyond the id is optional; normalization into `domain::Listing` decides
/// what survives.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub id: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub sub_type: Option<String>,
    pub price: Option<Value>,
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    pub amenities: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub bills_included: Option<bool>,
    pub created_at: Option<RawTimestamp>,
}

#[derive(Debug, Deserialize)]
pub struct RawTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
}
