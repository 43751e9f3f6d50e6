//! Arbiter Core Library
//!
//! Core functionality for checking qualification standings across a series
//! of lichess arena tournaments and aggregating statistics over archived
//! tournament games.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod partition;
pub mod stats;
pub mod types;

// Re-export commonly used items at crate root
pub use aggregate::{
    Aggregation, EventReport, EventStandings, QualifiedEntry, aggregate, untitled_or_lm,
};
pub use api::{LICHESS_BASE_URL, Lichess};
pub use cache::{
    default_data_dir, events_path, is_fresh, read_ndjson, results_path, swiss_games_path,
    write_ndjson, write_text,
};
pub use config::{CheckParams, load_token};
pub use error::{ArbiterError, Result};
pub use format::{format_event_header, format_event_report, format_partition, format_start_time};
pub use partition::{Partition, PartitionOptions, ProfileLookup, partition_profiles};
pub use stats::GameStats;
pub use types::{
    ArenaStats, ArenaTotals, GameRecord, Profile, ProfileInfo, StandingEntry, SwissEvent,
    Tournament,
};
