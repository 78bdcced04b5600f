use crate::domain::filters::{Category, FilterCriteria, SortBy, QUICK_FILTERS};
use crate::domain::listing::RankedListing;
use crate::templates::desktop_layout;
use crate::templates::pages::results_fragment;
use maud::{html, Markup};

pub fn dashboard_page(criteria: &FilterCriteria, results: &[RankedListing]) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            main class="container" {
                h1 { "Listings" }

                (filter_form(criteria))

                div id="results" {
                    // Initial render; htmx swaps this on every filter change.
                    (results_fragment(criteria, results, false))
                }
            }
        },
    )
}

/// Every control re-submits the whole form, so the query string always
/// carries the complete filter state. The place box gets its own delayed
/// trigger so we're not geocoding every keystroke.
fn filter_form(criteria: &FilterCriteria) -> Markup {
    let selected_college = criteria.college.map(|c| c.slug);

    html! {
        form
            id="filter-form"
            action="/dashboard"
            method="get"
            hx-get="/dashboard/results"
            hx-target="#results"
            hx-swap="innerHTML"
            hx-trigger="change, submit"
        {
            section class="card" {
                div style="display: flex; gap: 16px; flex-wrap: wrap; align-items: flex-end;" {
                    div {
                        label for="max_price" { "Max price (€/mo)" }
                        br;
                        input
                            type="number"
                            name="max_price"
                            id="max_price"
                            min="0"
                            step="50"
                            value=(format!("{:.0}", criteria.max_price))
                            style="padding: 8px; width: 120px;";
                    }

                    div {
                        label for="college" { "Near campus" }
                        br;
                        select name="college" id="college" style="padding: 8px;" {
                            option value="" selected[selected_college.is_none()] { "Any campus" }
                            @for campus in crate::geos::DUBLIN_COLLEGES {
                                option value=(campus.slug) selected[selected_college == Some(campus.slug)] {
                                    (campus.name)
                                }
                            }
                        }
                    }

                    div {
                        label for="place" { "Area" }
                        br;
                        input
                            type="text"
                            name="place"
                            id="place"
                            placeholder="e.g. Rathmines"
                            value=(criteria.search_place)
                            hx-get="/dashboard/results"
                            hx-target="#results"
                            hx-swap="innerHTML"
                            hx-trigger="keyup changed delay:400ms"
                            hx-include="#filter-form"
                            style="padding: 8px;";
                    }

                    div {
                        label for="sort" { "Sort" }
                        br;
                        select name="sort" id="sort" style="padding: 8px;" {
                            @for (sort, label) in [
                                (SortBy::Recommended, "Recommended"),
                                (SortBy::Newest, "Newest"),
                                (SortBy::PriceLow, "Price: low to high"),
                                (SortBy::PriceHigh, "Price: high to low"),
                            ] {
                                option value=(sort.as_param()) selected[criteria.sort_by == sort] { (label) }
                            }
                        }
                    }
                }

                div style="display: flex; gap: 16px; flex-wrap: wrap; margin-top: 12px; align-items: center;" {
                    div {
                        @for category in [Category::All, Category::Sharing, Category::EntireHome] {
                            label style="margin-right: 10px;" {
                                input
                                    type="radio"
                                    name="category"
                                    value=(category.as_param())
                                    checked[criteria.category == category];
                                " " (category.label())
                            }
                        }
                    }

                    label {
                        input type="checkbox" name="bills" checked[criteria.bills_included];
                        " Bills included"
                    }

                    div {
                        @for (value, label) in QUICK_FILTERS {
                            label style="margin-right: 10px;" {
                                input
                                    type="checkbox"
                                    name="amenity"
                                    value=(value)
                                    checked[criteria.quick_filters.iter().any(|f| f == value)];
                                " " (label)
                            }
                        }
                    }

                    button type="submit" style="padding: 8px 16px; cursor: pointer;" { "Apply" }
                    a href="/export" style="font-size: 0.9em;" { "Export results" }
                }
            }
        }
    }
}
