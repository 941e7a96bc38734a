//! Waypoint data client: batched fan-out and pagination over the envelope.
//!
//! Single-request endpoints are wrapped into multi-principal or all-pages
//! operations here. Chunks and pages are issued serially on one envelope;
//! a soft-failed call contributes an empty page and the rest of the batch
//! proceeds.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::model::halo::{CareerRankDto, CsrSummary};
use crate::server::{
    error::AppError,
    util::{parse::wrap_xuid, time::parse_upstream_timestamp},
};

use super::chain::ChainSettings;
use super::envelope::ApiEnvelope;
use super::rank::{shape_career_rank_entries, shape_csr_entries};
use super::transport::Transport;

const SKILL_HOST: &str = "https://skill.svc.halowaypoint.com";
const ECONOMY_HOST: &str = "https://economy.svc.halowaypoint.com";
const STATS_HOST: &str = "https://halostats.svc.halowaypoint.com";
const GAMECMS_HOST: &str = "https://gamecms-hacs.svc.halowaypoint.com";
const DISCOVERY_HOST: &str = "https://discovery-infiniteugc.svc.halowaypoint.com";

/// The curated project listing recommended map and mode content.
const RECOMMENDED_PROJECT_ID: &str = "a9dc0785-2a99-4fec-ba6e-0216feaaf041";

/// Upstream cap on principal ids per multi-principal call.
pub const PRINCIPALS_PER_CALL: usize = 30;

/// Page size used by the date-windowed match enumeration.
const MATCH_PAGE_SIZE: usize = 25;

/// Match type filter for match-list requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchType {
    All,
    Matchmaking,
    Custom,
}

impl MatchType {
    /// Parses the query-parameter spelling of a match type.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All" => Some(Self::All),
            "Matchmaking" => Some(Self::Matchmaking),
            "Custom" => Some(Self::Custom),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Matchmaking => "Matchmaking",
            Self::Custom => "Custom",
        }
    }
}

pub struct HaloClient<'a> {
    envelope: ApiEnvelope<'a>,
}

impl<'a> HaloClient<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        transport: &'a dyn Transport,
        settings: &'a ChainSettings,
    ) -> Self {
        Self {
            envelope: ApiEnvelope::new(db, transport, settings),
        }
    }

    /// Looks up CSR summaries for a set of players in one playlist.
    ///
    /// Input is split into 30-id chunks, one upstream call each. Soft-failed
    /// chunks contribute nothing; the rest of the batch still lands.
    pub async fn get_csrs(
        &self,
        xuids: &[u64],
        playlist_id: &str,
    ) -> Result<HashMap<u64, CsrSummary>, AppError> {
        let mut shaped = HashMap::new();

        for chunk in xuids.chunks(PRINCIPALS_PER_CALL) {
            let url = format!(
                "{}/hi/playlist/{}/csrs?players={}",
                SKILL_HOST,
                playlist_id,
                player_list(chunk)
            );
            let body = self.envelope.get(&url, true, true).await?;

            if let Some(entries) = body["Value"].as_array() {
                shaped.extend(shape_csr_entries(entries));
            }
        }

        Ok(shaped)
    }

    /// Looks up career ranks for a set of players, decorated with ladder
    /// labels. Result order follows input chunk order.
    pub async fn get_career_ranks(&self, xuids: &[u64]) -> Result<Vec<CareerRankDto>, AppError> {
        let mut entries: Vec<Value> = Vec::new();

        for chunk in xuids.chunks(PRINCIPALS_PER_CALL) {
            let url = format!(
                "{}/hi/careerranks/careerRank1?players={}",
                ECONOMY_HOST,
                player_list(chunk)
            );
            let body = self.envelope.get(&url, true, true).await?;

            if let Some(tracks) = body["RewardTracks"].as_array() {
                entries.extend(tracks.iter().cloned());
            }
        }

        Ok(shape_career_rank_entries(&entries))
    }

    /// Gets the lifetime match count document for a player.
    pub async fn get_match_count(&self, xuid: u64) -> Result<Value, AppError> {
        let url = format!(
            "{}/hi/players/{}/matches/count",
            STATS_HOST,
            wrap_xuid(xuid)
        );
        self.envelope.get(&url, true, false).await
    }

    /// Gets one page of a player's match history.
    pub async fn get_matches(
        &self,
        xuid: u64,
        count: usize,
        start: usize,
        match_type: MatchType,
    ) -> Result<Value, AppError> {
        let url = format!(
            "{}/hi/players/{}/matches?count={}&start={}&type={}",
            STATS_HOST,
            wrap_xuid(xuid),
            count,
            start,
            match_type.as_str()
        );
        self.envelope.get(&url, true, false).await
    }

    /// Enumerates all matches a player started inside a time window.
    ///
    /// Pages through the match list relying on the upstream's (undocumented
    /// but observed) time-descending order: enumeration stops at the first
    /// match older than the window start or at an empty page, then the
    /// accumulated list is filtered to the window. An out-of-order response
    /// is logged and tolerated.
    pub async fn get_matches_between(
        &self,
        xuid: u64,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        match_type: MatchType,
    ) -> Result<Vec<Value>, AppError> {
        let mut collected: Vec<Value> = Vec::new();
        let mut start = 0;

        'pages: loop {
            let page = self
                .get_matches(xuid, MATCH_PAGE_SIZE, start, match_type)
                .await?;

            let results = match page["Results"].as_array() {
                Some(results) if !results.is_empty() => results.clone(),
                _ => break,
            };

            let mut previous: Option<DateTime<Utc>> = None;
            for entry in results {
                let Some(start_time) = match_start_time(&entry) else {
                    continue;
                };

                if let Some(previous) = previous {
                    if start_time > previous {
                        tracing::warn!(
                            xuid,
                            "match list page not in descending StartTime order"
                        );
                    }
                }
                previous = Some(start_time);

                let past_window = start_time < window_start;
                collected.push(entry);
                if past_window {
                    break 'pages;
                }
            }

            start += MATCH_PAGE_SIZE;
        }

        Ok(collected
            .into_iter()
            .filter(|entry| {
                match_start_time(entry)
                    .map(|start_time| start_time >= window_start && start_time <= window_end)
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Gets the full stats document for one match.
    pub async fn get_match_stats(&self, match_id: &str) -> Result<Value, AppError> {
        let url = format!("{}/hi/matches/{}/stats", STATS_HOST, match_id);
        self.envelope.get(&url, true, false).await
    }

    /// Gets a player's matchmade service record.
    pub async fn get_service_record(&self, xuid: u64) -> Result<Value, AppError> {
        let url = format!(
            "{}/hi/players/{}/matchmade/servicerecord",
            STATS_HOST,
            wrap_xuid(xuid)
        );
        self.envelope.get(&url, true, false).await
    }

    /// Gets the content-management asset for a playlist.
    pub async fn get_playlist_info(&self, playlist_id: &str) -> Result<Value, AppError> {
        let url = format!(
            "{}/hi/multiplayer/file/playlists/assets/{}.json",
            GAMECMS_HOST, playlist_id
        );
        self.envelope.get(&url, true, false).await
    }

    /// Gets one version of a playlist asset.
    pub async fn get_playlist_version(
        &self,
        playlist_id: &str,
        version_id: &str,
    ) -> Result<Value, AppError> {
        let url = format!(
            "{}/hi/playlists/{}/versions/{}",
            DISCOVERY_HOST, playlist_id, version_id
        );
        self.envelope.get(&url, true, false).await
    }

    /// Searches user-generated content by author, accumulating every page.
    ///
    /// Advances `start` by the returned `Count` until it reaches
    /// `EstimatedTotal`. A soft-failed page reads as empty and terminates the
    /// walk; pages are never retried.
    pub async fn search_ugc_by_author(
        &self,
        author_xuid: u64,
        page_size: usize,
    ) -> Result<Vec<Value>, AppError> {
        let mut results: Vec<Value> = Vec::new();
        let mut start = 0;

        loop {
            let url = format!(
                "{}/hi/search?author={}&count={}&start={}",
                DISCOVERY_HOST,
                wrap_xuid(author_xuid),
                page_size,
                start
            );
            let body = self.envelope.get(&url, true, false).await?;

            let count = body["Count"].as_u64().unwrap_or(0) as usize;
            let estimated_total = body["EstimatedTotal"].as_u64().unwrap_or(0) as usize;

            if let Some(page) = body["Results"].as_array() {
                results.extend(page.iter().cloned());
            }

            if count == 0 {
                break;
            }
            start += count;
            if start >= estimated_total {
                break;
            }
        }

        Ok(results)
    }

    /// Gets the curated recommended-content project.
    pub async fn get_recommended_projects(&self) -> Result<Value, AppError> {
        let url = format!("{}/hi/projects/{}", DISCOVERY_HOST, RECOMMENDED_PROJECT_ID);
        self.envelope.get(&url, true, false).await
    }

    /// Gets a map-mode pair asset, optionally pinned to a version.
    pub async fn get_map_mode_pair(
        &self,
        asset_id: &str,
        version_id: Option<&str>,
    ) -> Result<Value, AppError> {
        let url = match version_id {
            Some(version_id) => format!(
                "{}/hi/mapModePairs/{}/versions/{}",
                DISCOVERY_HOST, asset_id, version_id
            ),
            None => format!("{}/hi/mapModePairs/{}", DISCOVERY_HOST, asset_id),
        };
        self.envelope.get(&url, true, true).await
    }
}

fn player_list(xuids: &[u64]) -> String {
    xuids
        .iter()
        .map(|xuid| wrap_xuid(*xuid))
        .collect::<Vec<_>>()
        .join(",")
}

fn match_start_time(entry: &Value) -> Option<DateTime<Utc>> {
    entry["MatchInfo"]["StartTime"]
        .as_str()
        .and_then(|raw| parse_upstream_timestamp(raw).ok())
}
