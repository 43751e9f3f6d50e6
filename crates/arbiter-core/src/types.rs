use serde::{Deserialize, Serialize};

/// Arena tournament metadata as listed by the created-tournaments endpoint.
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "startsAt")]
    pub starts_at: i64,
    #[serde(rename = "finishesAt")]
    pub finishes_at: i64,
}

impl Tournament {
    pub fn is_finished(&self, now_ms: i64) -> bool {
        self.finishes_at <= now_ms
    }
}

/// One line of the tournament results endpoint, best finisher first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingEntry {
    #[serde(default)]
    pub rank: Option<u32>,
    pub username: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

/// A user profile as returned by the bulk users endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub profile: Option<ProfileInfo>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, rename = "tosViolation")]
    pub tos_violation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default)]
    pub country: Option<String>,
}

/// Slim per-arena totals from the tournament info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaStats {
    pub stats: ArenaTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaTotals {
    pub games: u64,
    pub moves: u64,
}

/// One entry of a swiss tournaments listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwissEvent {
    pub id: String,
    pub name: String,
}

/// One exported game line from an NDJSON game dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: String,
    #[serde(rename = "initialFen")]
    pub initial_fen: String,
}
