// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// Serialize any value as a JSON response.
pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
