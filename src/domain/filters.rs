// src/domain/filters.rs

use crate::geos::Campus;

/// Price ceiling applied when the tenant hasn't touched the slider.
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

/// Amenity toggles offered on the dashboard: (query value, display label).
/// Matching is substring-based, so "gym" also matches a "Gym Access" tag.
pub const QUICK_FILTERS: &[(&str, &str)] = &[
    ("wifi", "WiFi"),
    ("parking", "Parking"),
    ("gym", "Gym"),
    ("furnished", "Furnished"),
    ("pets", "Pets"),
    ("garden", "Garden"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Recommended,
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortBy {
    /// Query parameter → sort mode; anything unrecognized falls back to the default.
    pub fn from_param(value: &str) -> Self {
        match value {
            "newest" => SortBy::Newest,
            "price_low" => SortBy::PriceLow,
            "price_high" => SortBy::PriceHigh,
            _ => SortBy::Recommended,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Recommended => "recommended",
            SortBy::Newest => "newest",
            SortBy::PriceLow => "price_low",
            SortBy::PriceHigh => "price_high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Sharing,
    EntireHome,
}

impl Category {
    pub fn from_param(value: &str) -> Self {
        match value {
            "sharing" => Category::Sharing,
            "entire_home" => Category::EntireHome,
            _ => Category::All,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Sharing => "sharing",
            Category::EntireHome => "entire_home",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Sharing => "Sharing",
            Category::EntireHome => "Entire Home",
        }
    }
}

/// One tenant's filter state, rebuilt from the query string on every request.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub max_price: f64,
    pub college: Option<Campus>,
    /// Free-text search box contents. Resolved to coordinates by the geocoder
    /// when possible; used for substring matching otherwise.
    pub search_place: String,
    pub bills_included: bool,
    pub quick_filters: Vec<String>,
    pub sort_by: SortBy,
    pub category: Category,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            max_price: DEFAULT_MAX_PRICE,
            college: None,
            search_place: String::new(),
            bills_included: false,
            quick_filters: Vec::new(),
            sort_by: SortBy::default(),
            category: Category::default(),
        }
    }
}
