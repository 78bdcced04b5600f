use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug)]
pub struct IngestRun {
    pub id: i64,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub listings_seen: Option<i64>,
    pub skipped: Option<i64>,
    pub success: Option<bool>,
    pub unchanged: bool,
    pub error_message: Option<String>,
}

pub fn start_ingest_run(conn: &Connection, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        "INSERT INTO ingest_runs (started_at, success) VALUES (?, 0)",
        params![now],
    )
    .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn end_ingest_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    listings: usize,
    skipped: usize,
    success: bool,
    unchanged: bool,
    payload_hash: Option<&str>,
    error: Option<String>,
) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE ingest_runs SET finished_at = ?, listings_seen = ?, skipped = ?, success = ?, unchanged = ?, payload_hash = ?, error_message = ? WHERE id = ?",
        params![now, listings, skipped, success, unchanged, payload_hash, error, run_id],
    ).map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(())
}

/// Hash recorded by the most recent successful run, used to skip a refresh
/// when the feed hasn't moved.
pub fn last_payload_hash(conn: &Connection) -> Result<Option<String>, ServerError> {
    conn.query_row(
        "SELECT payload_hash FROM ingest_runs WHERE success = 1 AND payload_hash IS NOT NULL ORDER BY started_at DESC, id DESC LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(e.to_string()))
    .map(Option::flatten)
}

pub fn get_recent_runs(conn: &Connection) -> Result<Vec<IngestRun>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT id, started_at, finished_at, listings_seen, skipped, success, unchanged, error_message FROM ingest_runs ORDER BY started_at DESC, id DESC LIMIT 50")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(IngestRun {
                id: row.get(0)?,
                started_at: row.get(1)?,
                finished_at: row.get(2)?,
                listings_seen: row.get(3)?,
                skipped: row.get(4)?,
                success: row.get(5)?,
                unchanged: row.get::<_, i64>(6)? != 0,
                error_message: row.get(7)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
