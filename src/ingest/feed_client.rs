// feed_client.rs
use crate::db::connection::Database;
use crate::db::ingest_runs;
use crate::db::listings::save_listings;
use crate::domain::listing::Listing;
use crate::feed::{FeedEvent, ListingFeed};
use crate::ingest::models::RawListing;
use crate::ingest::IngestError;
use rand::Rng;
use reqwest::blocking::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "digs/0.1 (listings sync)";

/// Name of the env var holding the upstream listings feed URL.
pub const FEED_URL_VAR: &str = "LISTINGS_FEED_URL";

pub struct FeedClient {
    client: Client,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub listings: usize,
    pub skipped: usize,
    /// True when the feed payload was byte-identical to the previous
    /// successful run and nothing was written.
    pub unchanged: bool,
}

impl FeedClient {
    pub fn new() -> Result<Self, IngestError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn fetch_raw(&self) -> Result<String, IngestError> {
        const MAX_ATTEMPTS: u64 = 4;
        const MAX_BACKOFF_SECS: u64 = 8;
        const JITTER_MAX_SECS: u64 = 2;

        let url = std::env::var(FEED_URL_VAR)
            .map_err(|_| IngestError::Config(format!("{FEED_URL_VAR} environment variable not set")))?;

        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch(&url) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    eprintln!("⚠️ Feed fetch attempt {attempt} failed: {e}");
                    last_err = Some(e);

                    // backoff
                    let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    std::thread::sleep(Duration::from_secs(base + jitter));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| IngestError::Network("feed retry loop failed".into())))
    }

    fn try_fetch(&self, url: &str) -> Result<String, IngestError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(IngestError::Network(format!("feed HTTP {status}: {text}")));
        }

        Ok(text)
    }

    /// The feed historically served a bare array; the current API wraps it
    /// in `{"listings": [...]}`. Accept both.
    pub fn parse(text: &str) -> Result<Vec<RawListing>, IngestError> {
        let data: Value =
            serde_json::from_str(text).map_err(|e| IngestError::JsonParse(e.to_string()))?;

        let arr = match &data {
            Value::Array(arr) => arr,
            Value::Object(map) => map
                .get("listings")
                .and_then(Value::as_array)
                .ok_or_else(|| IngestError::UnexpectedShape("listings array missing".into()))?,
            _ => return Err(IngestError::UnexpectedShape("expected array or object".into())),
        };

        let listings: Result<Vec<_>, _> = arr
            .iter()
            .map(|v| serde_json::from_value(v.clone()))
            .collect();

        listings.map_err(|e| IngestError::Deserialize(e.to_string()))
    }
}

/// Kicks off a feed refresh on a background thread; progress lands in
/// `ingest_runs` and subscribers hear about new data through the feed.
pub fn run_ingest(db: &Database, feed: Arc<ListingFeed>) {
    let db = db.clone(); // cheap clone (path only)

    std::thread::spawn(move || {
        eprintln!("🧵 Ingest thread started");

        match ingest_once(&db, &feed) {
            Ok(outcome) if outcome.unchanged => {
                eprintln!("🔁 Feed unchanged, nothing written");
            }
            Ok(outcome) => {
                eprintln!(
                    "✅ Ingest complete: {} listings saved, {} skipped",
                    outcome.listings, outcome.skipped
                );
            }
            Err(e) => eprintln!("❌ Ingest failed: {e}"),
        }
    });
}

/// One full refresh: fetch, short-circuit on an unchanged payload, normalize,
/// save, notify. Run bookkeeping is written even on failure.
pub fn ingest_once(db: &Database, feed: &ListingFeed) -> Result<IngestOutcome, IngestError> {
    let started = now_unix();
    let run_id = db
        .with_conn(|conn| ingest_runs::start_ingest_run(conn, started))
        .map_err(|e| IngestError::Db(e.to_string()))?;

    let result = ingest_inner(db, feed);
    let finished = now_unix();

    let end = match &result {
        Ok(outcome) => db.with_conn(|conn| {
            ingest_runs::end_ingest_run(
                conn,
                run_id,
                finished,
                outcome.listings,
                outcome.skipped,
                true,
                outcome.unchanged,
                outcome.payload_hash.as_deref(),
                None,
            )
        }),
        Err(e) => db.with_conn(|conn| {
            ingest_runs::end_ingest_run(
                conn,
                run_id,
                finished,
                0,
                0,
                false,
                false,
                None,
                Some(e.to_string()),
            )
        }),
    };
    if let Err(e) = end {
        eprintln!("⚠️ Failed to record ingest run {run_id}: {e}");
    }

    result.map(|o| IngestOutcome {
        listings: o.listings,
        skipped: o.skipped,
        unchanged: o.unchanged,
    })
}

struct InnerOutcome {
    listings: usize,
    skipped: usize,
    unchanged: bool,
    payload_hash: Option<String>,
}

fn ingest_inner(db: &Database, feed: &ListingFeed) -> Result<InnerOutcome, IngestError> {
    let client = FeedClient::new()?;
    let payload = client.fetch_raw()?;
    let hash = payload_hash(&payload);

    let previous = db
        .with_conn(|conn| ingest_runs::last_payload_hash(conn))
        .map_err(|e| IngestError::Db(e.to_string()))?;

    if previous.as_deref() == Some(hash.as_str()) {
        return Ok(InnerOutcome {
            listings: 0,
            skipped: 0,
            unchanged: true,
            payload_hash: Some(hash),
        });
    }

    let raw = FeedClient::parse(&payload)?;

    let mut listings = Vec::new();
    let mut skipped = 0;
    for doc in &raw {
        match Listing::from_raw(doc) {
            Ok(l) => listings.push(l),
            Err(reason) => {
                skipped += 1;
                eprintln!("⚠️ Skipping feed record: {reason}");
            }
        }
    }

    save_listings(db, &listings).map_err(|e| IngestError::Db(e.to_string()))?;

    feed.publish(FeedEvent::Refreshed {
        listings: listings.len(),
    });

    Ok(InnerOutcome {
        listings: listings.len(),
        skipped,
        unchanged: false,
        payload_hash: Some(hash),
    })
}

/// SHA-256 of the raw payload text, used to detect a feed that hasn't moved
/// since the last successful run.
pub fn payload_hash(payload: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(payload.as_bytes());
    format!("{digest:x}")
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
