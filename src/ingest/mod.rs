mod feed_client;
mod ingest_error;
pub mod models;

pub use feed_client::{run_ingest, FeedClient, IngestOutcome, FEED_URL_VAR};
pub use ingest_error::IngestError;
