use crate::app::App;
use crate::db::listings::{count_listings, get_all_listings};
use crate::db::{ingest_runs, Database};
use crate::domain::filters::FilterCriteria;
use crate::domain::listing::RankedListing;
use crate::domain::pipeline::compute;
use crate::errors::{ResultResp, ServerError};
use crate::geos::{find_campus, Coord};
use crate::ingest::run_ingest;
use crate::responses::{html_response, json_response, redirect_response};
use crate::spreadsheets::export_listings_xlsx;
use crate::templates;
use astra::Request;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => {
            let total = count_listings(&app.db)?;
            html_response(templates::pages::home_page(total))
        }

        ("GET", "/dashboard") => dashboard_page(&req, app),
        ("GET", "/dashboard/results") => results_fragment(&req, app),
        ("GET", "/api/listings") => api_listings(&req, app),
        ("GET", "/export") => export_xlsx(&req, app),

        ("GET", "/admin") => admin_page(&app.db),
        ("POST", "/admin/ingest") => {
            run_ingest(&app.db, app.feed.clone());
            redirect_response("/admin")
        }

        _ => Err(ServerError::NotFound),
    }
}

fn dashboard_page(req: &Request, app: &App) -> ResultResp {
    let criteria = criteria_from_query(req);
    let (results, _) = run_pipeline(app, &criteria)?;

    html_response(templates::pages::dashboard_page(&criteria, &results))
}

/// htmx fragment swapped into the dashboard on every filter change.
fn results_fragment(req: &Request, app: &App) -> ResultResp {
    let criteria = criteria_from_query(req);
    let (results, search_coords) = run_pipeline(app, &criteria)?;

    html_response(templates::pages::results_fragment(
        &criteria,
        &results,
        search_coords.is_some(),
    ))
}

/// The same computation as the dashboard, as JSON, for list/map clients.
fn api_listings(req: &Request, app: &App) -> ResultResp {
    let criteria = criteria_from_query(req);
    let (results, _) = run_pipeline(app, &criteria)?;

    json_response(&results)
}

fn export_xlsx(req: &Request, app: &App) -> ResultResp {
    let criteria = criteria_from_query(req);
    let (results, _) = run_pipeline(app, &criteria)?;

    let label = criteria
        .college
        .map(|c| c.slug)
        .unwrap_or("dublin");

    export_listings_xlsx(&results, label)
}

fn admin_page(db: &Database) -> ResultResp {
    let runs = db.with_conn(|conn| ingest_runs::get_recent_runs(conn))?;
    let total = count_listings(db)?;

    html_response(templates::pages::admin_page(&runs, total))
}

/// Load → resolve → compute. Geocoding failure simply yields no coordinates,
/// which downgrades the location filter to substring matching.
fn run_pipeline(
    app: &App,
    criteria: &FilterCriteria,
) -> Result<(Vec<RankedListing>, Option<Coord>), ServerError> {
    let listings = get_all_listings(&app.db)?;
    let search_coords = app.geocoder.resolve(&criteria.search_place);

    Ok((compute(&listings, criteria, search_coords), search_coords))
}

/// Query-string pairs, decoded. Order preserved so repeated keys
/// (amenity checkboxes) survive.
fn parse_query(req: &Request) -> Vec<(String, String)> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Criteria from the query string. Anything missing or malformed falls back
/// to the default rather than rejecting the request.
pub fn criteria_from_query(req: &Request) -> FilterCriteria {
    let params = parse_query(req);
    let mut criteria = FilterCriteria::default();

    if let Some(raw) = first(&params, "max_price") {
        if let Ok(price) = raw.trim().parse::<f64>() {
            if price.is_finite() && price > 0.0 {
                criteria.max_price = price;
            }
        }
    }

    criteria.college = first(&params, "college").and_then(find_campus);

    if let Some(place) = first(&params, "place") {
        criteria.search_place = place.trim().to_string();
    }

    criteria.bills_included = matches!(first(&params, "bills"), Some("on" | "true" | "1"));

    criteria.quick_filters = params
        .iter()
        .filter(|(k, _)| k == "amenity")
        .map(|(_, v)| v.clone())
        .filter(|v| !v.trim().is_empty())
        .collect();

    if let Some(sort) = first(&params, "sort") {
        criteria.sort_by = crate::domain::filters::SortBy::from_param(sort);
    }

    if let Some(category) = first(&params, "category") {
        criteria.category = crate::domain::filters::Category::from_param(category);
    }

    criteria
}
