// src/domain/pipeline.rs

use crate::domain::filters::{Category, FilterCriteria, SortBy};
use crate::domain::listing::{Listing, RankedListing};
use crate::geos::{haversine_km, Coord, SEARCH_RADIUS_KM};

/// Produces the ordered, annotated view of `listings` for one set of criteria.
///
/// Pure function of its inputs: no I/O, the source slice is never mutated, and
/// re-running it on every filter change yields the same result for the same
/// inputs. `search_coords` is the already-resolved search point; geocoding
/// (and its debounce) happens upstream in the geocode client.
///
/// Stage order matters: the location stage annotates `distance_to_search` and
/// pre-sorts by it, which the recommended sort relies on when no campus is
/// selected.
pub fn compute(
    listings: &[Listing],
    criteria: &FilterCriteria,
    search_coords: Option<Coord>,
) -> Vec<RankedListing> {
    let mut results: Vec<RankedListing> = listings
        .iter()
        .filter(|l| within_price(l, criteria.max_price))
        .filter(|l| !criteria.bills_included || includes_bills(l))
        .cloned()
        .map(RankedListing::new)
        .collect();

    // Location narrowing. A resolved search point wins over raw text;
    // unresolved text degrades to substring matching.
    if let Some(origin) = search_coords {
        for r in &mut results {
            r.distance_to_search = r.listing.coord.map(|c| haversine_km(origin, c));
        }
        // A listing without coordinates can't be within range.
        results.retain(|r| r.distance_to_search.is_some_and(|d| d <= SEARCH_RADIUS_KM));
        results.sort_by(|a, b| {
            nearest(a.distance_to_search).total_cmp(&nearest(b.distance_to_search))
        });
    } else {
        let needle = criteria.search_place.trim().to_lowercase();
        if !needle.is_empty() {
            results.retain(|r| {
                let l = &r.listing;
                l.title.to_lowercase().contains(&needle)
                    || l.location.to_lowercase().contains(&needle)
                    || l.address.to_lowercase().contains(&needle)
            });
        }
    }

    if criteria.category != Category::All {
        results.retain(|r| matches_category(&r.listing, criteria.category));
    }

    if !criteria.quick_filters.is_empty() {
        results.retain(|r| {
            criteria
                .quick_filters
                .iter()
                .all(|tag| has_amenity(&r.listing, tag))
        });
    }

    // Campus annotation is unconditional so every result carries the field,
    // selected campus or not.
    for r in &mut results {
        r.distance_to_college = match criteria.college {
            Some(campus) => r.listing.coord.map(|c| haversine_km(campus.coord(), c)),
            None => None,
        };
    }

    match criteria.sort_by {
        SortBy::PriceLow => {
            results.sort_by(|a, b| price_or_inf(&a.listing).total_cmp(&price_or_inf(&b.listing)));
        }
        SortBy::PriceHigh => {
            // Missing prices still sort last, hence the negated sentinel.
            results.sort_by(|a, b| {
                price_or_neg_inf(&b.listing).total_cmp(&price_or_neg_inf(&a.listing))
            });
        }
        SortBy::Newest => {
            // No timestamp sorts as epoch 0, i.e. oldest.
            results.sort_by_key(|r| std::cmp::Reverse(r.listing.created_at.unwrap_or(0)));
        }
        SortBy::Recommended => {
            if criteria.college.is_some() {
                results.sort_by(|a, b| {
                    nearest(a.distance_to_college).total_cmp(&nearest(b.distance_to_college))
                });
            } else if search_coords.is_some() {
                results.sort_by(|a, b| {
                    nearest(a.distance_to_search).total_cmp(&nearest(b.distance_to_search))
                });
            }
            // No location anchor: keep whatever order filtering left behind.
        }
    }

    results
}

fn within_price(listing: &Listing, max_price: f64) -> bool {
    match listing.price {
        // NaN never passes the comparison, so a poisoned value self-excludes.
        Some(p) => p <= max_price,
        // An unpriced listing only survives an unbounded ceiling.
        None => max_price.is_infinite(),
    }
}

/// Old records carry a literal "bills" tag instead of the boolean field.
fn includes_bills(listing: &Listing) -> bool {
    listing.bills_included || listing.amenities.iter().any(|t| t == "bills")
}

/// Free-text category heuristic. A listing can match neither category, or
/// (rarely) both; that ambiguity is inherited from the listing data itself.
fn matches_category(listing: &Listing, category: Category) -> bool {
    let ty = listing.property_type.to_lowercase();
    let title = listing.title.to_lowercase();

    match category {
        Category::All => true,
        Category::Sharing => {
            ty.contains("sharing") || ty.contains("room") || title.contains("room")
        }
        Category::EntireHome => ["entire home", "flat", "apartment"]
            .iter()
            .any(|k| ty.contains(k) || title.contains(k)),
    }
}

/// Substring match, so a "Gym Access" amenity satisfies a "gym" filter.
fn has_amenity(listing: &Listing, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    listing
        .amenities
        .iter()
        .any(|a| a.to_lowercase().contains(&tag))
}

fn nearest(distance: Option<f64>) -> f64 {
    distance.unwrap_or(f64::INFINITY)
}

fn price_or_inf(listing: &Listing) -> f64 {
    listing.price.unwrap_or(f64::INFINITY)
}

fn price_or_neg_inf(listing: &Listing) -> f64 {
    listing.price.unwrap_or(f64::NEG_INFINITY)
}
