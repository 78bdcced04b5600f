use crate::domain::filters::FilterCriteria;
use crate::domain::listing::RankedListing;
use crate::templates::components::listing_card;
use maud::{html, Markup};

/// The swappable result list. An empty set is a normal outcome, not an error.
pub fn results_fragment(
    criteria: &FilterCriteria,
    results: &[RankedListing],
    search_resolved: bool,
) -> Markup {
    html! {
        @if results.is_empty() {
            div class="card" style="text-align: center; color: #6b7280;" {
                p { "No listings match your filters." }
                p { "Try raising the price ceiling or clearing the area search." }
            }
        } @else {
            p style="color: #6b7280;" {
                (results.len())
                @if results.len() == 1 { " listing" } @else { " listings" }
                @if search_resolved {
                    " within 3 km of \"" (criteria.search_place) "\""
                } @else if !criteria.search_place.trim().is_empty() {
                    " matching \"" (criteria.search_place) "\""
                }
            }

            @for result in results {
                (listing_card(result))
            }
        }
    }
}
