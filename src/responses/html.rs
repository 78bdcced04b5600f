use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    let body = markup.into_string();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// 303 so a POST action lands back on a plain GET.
pub fn redirect_response(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
