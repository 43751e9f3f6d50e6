use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::error::Result;

/// Default data directory for cached API responses.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arbiter")
}

/// Path of the cached events listing.
pub fn events_path(data_dir: &Path) -> PathBuf {
    data_dir.join("events.ndjson")
}

/// Path of the cached results file for one tournament.
pub fn results_path(data_dir: &Path, tournament_id: &str) -> PathBuf {
    data_dir.join("events").join(format!("{tournament_id}.ndjson"))
}

/// Path of the downloaded game dump for one swiss tournament.
pub fn swiss_games_path(swiss_dir: &Path, swiss_id: &str) -> PathBuf {
    swiss_dir.join(format!("{swiss_id}.ndjson"))
}

/// Whether a cached NDJSON file is complete enough to reuse: it exists and
/// holds at least `min_lines` non-empty lines. A short file usually means
/// an earlier run fetched with a smaller `nb`.
pub async fn is_fresh(path: &Path, min_lines: usize) -> bool {
    match fs::read_to_string(path).await {
        Ok(content) => content.lines().filter(|l| !l.trim().is_empty()).count() >= min_lines,
        Err(_) => false,
    }
}

/// Parse every non-empty line of an NDJSON file.
pub async fn read_ndjson<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).await?;
    let mut records = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}

/// Write records as one JSON object per line.
pub async fn write_ndjson<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        lines.push(serde_json::to_string(record)?);
    }
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).await?;
    Ok(())
}

/// Persist a raw API response body as-is.
pub async fn write_text(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).await?;
    Ok(())
}
