use std::time::Duration;

use async_trait::async_trait;

use crate::{error::Result, types::Profile};

/// Batched profile lookup. Implemented by the lichess client; tests use an
/// in-memory stand-in.
#[async_trait]
pub trait ProfileLookup {
    async fn fetch_profiles(&self, usernames: &[String]) -> Result<Vec<Profile>>;
}

#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Usernames per bulk request; the lichess endpoint caps at 300.
    pub batch_size: usize,
    /// Courtesy delay between batch requests.
    pub pace: Duration,
    /// Country codes that mark a profile for manual review.
    pub watchlist: Vec<String>,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            batch_size: 300,
            pace: Duration::from_secs(2),
            watchlist: vec!["RU".to_string(), "BY".to_string()],
        }
    }
}

/// Flagged and banned usernames, each sorted case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub flagged: Vec<String>,
    pub banned: Vec<String>,
}

/// Look up profiles in fixed-size batches and split the usernames into
/// watchlist-flagged and disabled/ToS-banned sets.
pub async fn partition_profiles(
    usernames: &[String],
    lookup: &dyn ProfileLookup,
    opts: &PartitionOptions,
) -> Result<Partition> {
    let mut flagged = Vec::new();
    let mut banned = Vec::new();

    for (i, chunk) in usernames.chunks(opts.batch_size).enumerate() {
        if i > 0 && !opts.pace.is_zero() {
            tokio::time::sleep(opts.pace).await;
        }
        for profile in lookup.fetch_profiles(chunk).await? {
            let country = profile
                .profile
                .as_ref()
                .and_then(|p| p.country.as_deref())
                .unwrap_or("");
            if opts.watchlist.iter().any(|c| c == country) {
                flagged.push(profile.username.clone());
            }
            if profile.disabled || profile.tos_violation {
                banned.push(profile.username.clone());
            }
        }
    }

    flagged.sort_by_key(|u| u.to_lowercase());
    banned.sort_by_key(|u| u.to_lowercase());

    Ok(Partition { flagged, banned })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::ProfileInfo;

    struct FakeLookup {
        profiles: Vec<Profile>,
        batch_sizes: Mutex<Vec<usize>>,
    }

    impl FakeLookup {
        fn new(profiles: Vec<Profile>) -> Self {
            Self {
                profiles,
                batch_sizes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProfileLookup for FakeLookup {
        async fn fetch_profiles(&self, usernames: &[String]) -> Result<Vec<Profile>> {
            self.batch_sizes.lock().unwrap().push(usernames.len());
            Ok(self
                .profiles
                .iter()
                .filter(|p| usernames.contains(&p.username))
                .cloned()
                .collect())
        }
    }

    fn profile(username: &str, country: Option<&str>, disabled: bool, tos: bool) -> Profile {
        Profile {
            username: username.to_string(),
            profile: country.map(|c| ProfileInfo {
                country: Some(c.to_string()),
            }),
            disabled,
            tos_violation: tos,
        }
    }

    fn opts(batch_size: usize) -> PartitionOptions {
        PartitionOptions {
            batch_size,
            pace: Duration::ZERO,
            ..PartitionOptions::default()
        }
    }

    #[tokio::test]
    async fn splits_flagged_and_banned() {
        let lookup = FakeLookup::new(vec![
            profile("alice", Some("RU"), false, false),
            profile("bob", Some("DE"), true, false),
            profile("carol", Some("BY"), false, true),
            profile("dave", None, false, false),
        ]);
        let usernames: Vec<String> = ["alice", "bob", "carol", "dave"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let partition = partition_profiles(&usernames, &lookup, &opts(300))
            .await
            .unwrap();

        assert_eq!(partition.flagged, vec!["alice", "carol"]);
        // carol is both flagged and banned
        assert_eq!(partition.banned, vec!["bob", "carol"]);
    }

    #[tokio::test]
    async fn respects_batch_size() {
        let lookup = FakeLookup::new(vec![profile("u3", Some("RU"), false, false)]);
        let usernames: Vec<String> = (0..5).map(|i| format!("u{i}")).collect();

        let partition = partition_profiles(&usernames, &lookup, &opts(2))
            .await
            .unwrap();

        assert_eq!(*lookup.batch_sizes.lock().unwrap(), vec![2, 2, 1]);
        assert_eq!(partition.flagged, vec!["u3"]);
    }

    #[tokio::test]
    async fn output_sorted_case_insensitively() {
        let lookup = FakeLookup::new(vec![
            profile("Zorro", Some("RU"), false, false),
            profile("anna", Some("BY"), false, false),
            profile("Boris", Some("RU"), false, false),
        ]);
        let usernames: Vec<String> = ["Zorro", "anna", "Boris"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let partition = partition_profiles(&usernames, &lookup, &opts(300))
            .await
            .unwrap();

        assert_eq!(partition.flagged, vec!["anna", "Boris", "Zorro"]);
    }

    #[tokio::test]
    async fn empty_input_makes_no_requests() {
        let lookup = FakeLookup::new(vec![]);
        let partition = partition_profiles(&[], &lookup, &opts(300)).await.unwrap();
        assert!(partition.flagged.is_empty());
        assert!(partition.banned.is_empty());
        assert!(lookup.batch_sizes.lock().unwrap().is_empty());
    }
}
