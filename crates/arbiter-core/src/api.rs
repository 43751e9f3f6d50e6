use async_trait::async_trait;

use crate::{
    error::Result,
    partition::ProfileLookup,
    types::{ArenaStats, Profile, Tournament},
};

pub const LICHESS_BASE_URL: &str = "https://lichess.org";

/// Thin client over the lichess public API. A token is only needed for
/// endpoints with stricter rate limits; anonymous access works otherwise.
#[derive(Debug, Clone)]
pub struct Lichess {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Lichess {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(LICHESS_BASE_URL, token)
    }

    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_ndjson(&self, url: String) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url).header("Accept", "application/x-ndjson");
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    /// Arena tournaments created by `creator` whose full name contains
    /// `name_filter`, in the order the API lists them.
    pub async fn created_tournaments(
        &self,
        creator: &str,
        name_filter: &str,
    ) -> Result<Vec<Tournament>> {
        let url = format!("{}/api/user/{creator}/tournament/created", self.base_url);
        let body = self
            .get_ndjson(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let mut tournaments = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let tournament: Tournament = serde_json::from_str(line)?;
            if tournament.full_name.contains(name_filter) {
                tournaments.push(tournament);
            }
        }
        Ok(tournaments)
    }

    /// Raw NDJSON text of the top `nb` results for one tournament. Returned
    /// unparsed so the caller can persist it verbatim.
    pub async fn tournament_results(&self, tournament_id: &str, nb: usize) -> Result<String> {
        let url = format!(
            "{}/api/tournament/{tournament_id}/results?nb={nb}",
            self.base_url
        );
        let body = self
            .get_ndjson(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    /// Raw NDJSON text of every game of one swiss tournament. Returned
    /// unparsed so the caller can persist it verbatim.
    pub async fn swiss_games(&self, swiss_id: &str) -> Result<String> {
        let url = format!("{}/api/swiss/{swiss_id}/games", self.base_url);
        let body = self
            .get_ndjson(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    /// Tournament metadata including the games/moves totals.
    pub async fn tournament_info(&self, tournament_id: &str) -> Result<ArenaStats> {
        let url = format!("{}/api/tournament/{tournament_id}", self.base_url);
        let stats = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<ArenaStats>()
            .await?;
        Ok(stats)
    }

    /// Bulk profile lookup. The endpoint accepts up to 300 usernames,
    /// comma-joined in the request body.
    pub async fn user_profiles(&self, usernames: &[String]) -> Result<Vec<Profile>> {
        let url = format!("{}/api/users", self.base_url);
        let profiles = self
            .http
            .post(url)
            .body(usernames.join(","))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Profile>>()
            .await?;
        Ok(profiles)
    }
}

#[async_trait]
impl ProfileLookup for Lichess {
    async fn fetch_profiles(&self, usernames: &[String]) -> Result<Vec<Profile>> {
        self.user_profiles(usernames).await
    }
}
