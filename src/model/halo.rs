//! DTOs for data derived from the Halo Waypoint service.

use serde::Serialize;

/// Shaped CSR summary for one player in one playlist.
///
/// Flattens the upstream `Current` / `SeasonMax` / `AllTimeMax` triples into
/// the field names the bot consumes. Subtiers are exposed 1-based (the
/// upstream reports them 0-based) and the season maximum is labelled
/// `current_reset_max` to match the rest of the community tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsrSummary {
    pub current_csr: i64,
    pub current_tier: String,
    pub current_subtier: i64,
    pub current_tier_description: String,
    pub current_reset_max_csr: i64,
    pub current_reset_max_tier: String,
    pub current_reset_max_subtier: i64,
    pub current_reset_max_tier_description: String,
    pub all_time_max_csr: i64,
    pub all_time_max_tier: String,
    pub all_time_max_subtier: i64,
    pub all_time_max_tier_description: String,
}

/// Career rank summary for one player, decorated with the static ladder label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerRankDto {
    pub xuid: u64,
    /// Current rank number on the career ladder (0 = Recruit, 272 = Hero).
    pub rank: i64,
    /// Human-readable label for the rank, e.g. `"Cadet Bronze 1"`.
    pub label: String,
    pub partial_progress: i64,
}

/// A known client build id.
#[derive(Debug, Clone, Serialize)]
pub struct BuildDto {
    pub id: i32,
    pub build_id: String,
    pub build_date: chrono::DateTime<chrono::Utc>,
}
