// templates/pages/home.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(total_listings: i64) -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Find your next place in Dublin" }

                (card("Browse listings", html! {
                    p { strong { (total_listings) } " listings currently live." }
                    p { a href="/dashboard" { "Open the dashboard" } " to filter by price, campus, and amenities." }
                }))
            }
        },
    )
}
