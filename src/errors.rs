use astra::Response;
// errors.rs
use std::fmt;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, geocoding, export).
/// Malformed query input never errors; it degrades to default criteria instead.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    DbError(String),
    GeocodeError(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::GeocodeError(msg) => write!(f, "Geocoding Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
