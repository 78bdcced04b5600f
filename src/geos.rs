// src/geos.rs

use serde::Serialize;

/// A WGS84 point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

/// A campus from the fixed college table. Compiled in, not user-editable.
#[derive(Debug, Clone, Copy)]
pub struct Campus {
    pub slug: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Campus {
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Listings further than this from a resolved search point are dropped.
pub const SEARCH_RADIUS_KM: f64 = 3.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DUBLIN_COLLEGES: &[Campus] = &[
    Campus { slug: "trinity", name: "Trinity College Dublin", lat: 53.3438, lng: -6.2546 },
    Campus { slug: "ucd", name: "University College Dublin", lat: 53.3065, lng: -6.2255 },
    Campus { slug: "dcu", name: "Dublin City University", lat: 53.3854, lng: -6.2566 },
    Campus { slug: "tud", name: "TU Dublin (Grangegorman)", lat: 53.3552, lng: -6.2802 },
    Campus { slug: "rcsi", name: "RCSI", lat: 53.3390, lng: -6.2620 },
    Campus { slug: "ncad", name: "NCAD", lat: 53.3420, lng: -6.2780 },
    Campus { slug: "griffith", name: "Griffith College", lat: 53.3312, lng: -6.2788 },
    Campus { slug: "iadt", name: "IADT Dún Laoghaire", lat: 53.2942, lng: -6.1508 },
];

pub fn find_campus(slug: &str) -> Option<Campus> {
    DUBLIN_COLLEGES.iter().find(|c| c.slug == slug).copied()
}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
