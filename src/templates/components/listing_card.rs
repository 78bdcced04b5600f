use crate::domain::listing::RankedListing;
use maud::{html, Markup};

/// One result card on the dashboard. Distances only render when the
/// pipeline annotated them for this particular search.
pub fn listing_card(result: &RankedListing) -> Markup {
    let l = &result.listing;

    html! {
        article class="card listing-card" {
            div class="listing-head" style="display: flex; justify-content: space-between; align-items: baseline;" {
                h3 style="margin: 0;" {
                    @if l.title.is_empty() { "Untitled listing" } @else { (l.title) }
                }
                strong {
                    @match l.price {
                        Some(p) => (format!("€{p:.0}/mo")),
                        None => "Price on request",
                    }
                }
            }

            p style="color: #6b7280; margin: 4px 0;" {
                @if !l.location.is_empty() { (l.location) }
                @if !l.location.is_empty() && !l.address.is_empty() { " · " }
                @if !l.address.is_empty() { (l.address) }
            }

            p style="margin: 4px 0;" {
                @if !l.property_type.is_empty() {
                    span style="background: #e5e7eb; padding: 2px 6px; border-radius: 4px; font-size: 0.85em;" {
                        (l.property_type)
                    }
                }
                @if let Some(sub) = &l.sub_type {
                    " "
                    span style="background: #f3f4f6; padding: 2px 6px; border-radius: 4px; font-size: 0.85em;" {
                        (sub)
                    }
                }
                @if l.bills_included {
                    " "
                    span style="background: #d1fae5; color: #065f46; padding: 2px 6px; border-radius: 4px; font-size: 0.85em;" {
                        "Bills included"
                    }
                }
            }

            @if !l.amenities.is_empty() {
                p style="font-size: 0.9em; color: #374151; margin: 4px 0;" {
                    (l.amenities.join(" · "))
                }
            }

            @if result.distance_to_search.is_some() || result.distance_to_college.is_some() {
                p style="font-size: 0.9em; color: #2563eb; margin: 4px 0;" {
                    @if let Some(d) = result.distance_to_search {
                        (format!("{d:.1} km from your search"))
                    }
                    @if result.distance_to_search.is_some() && result.distance_to_college.is_some() {
                        " · "
                    }
                    @if let Some(d) = result.distance_to_college {
                        (format!("{d:.1} km from campus"))
                    }
                }
            }
        }
    }
}
