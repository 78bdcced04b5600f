pub mod html;
pub mod json;
pub mod xlsx;

// Normal HTML response
pub use html::{html_response, redirect_response};
pub use json::json_response;
pub use xlsx::xlsx_response;
