//! Thin handlers over the Waypoint data client.
//!
//! Handlers validate query input, call the fan-out client, and serialize the
//! result. Soft-failed upstream calls surface as empty domain responses;
//! only token chain failures produce error statuses.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::server::{
    error::AppError,
    service::halo::client::{HaloClient, MatchType},
    state::AppState,
    util::parse::{parse_xuid, parse_xuid_list},
};

#[derive(Deserialize)]
pub struct CsrParams {
    pub playlist_id: String,
    pub xuids: String,
}

#[derive(Deserialize)]
pub struct CareerRankParams {
    pub xuids: String,
}

#[derive(Deserialize)]
pub struct MatchListParams {
    pub count: Option<usize>,
    pub start: Option<usize>,
    pub match_type: Option<String>,
}

#[derive(Deserialize)]
pub struct UgcSearchParams {
    pub author: String,
    pub count: Option<usize>,
}

#[derive(Deserialize)]
pub struct MatchWindowParams {
    pub from: chrono::DateTime<chrono::Utc>,
    pub to: chrono::DateTime<chrono::Utc>,
    pub match_type: Option<String>,
}

#[derive(Deserialize)]
pub struct MapModePairParams {
    pub version: Option<String>,
}

fn client(state: &AppState) -> HaloClient<'_> {
    HaloClient::new(&state.db, state.transport.as_ref(), &state.chain_settings)
}

fn parse_path_xuid(raw: &str) -> Result<u64, AppError> {
    parse_xuid(raw).ok_or_else(|| AppError::BadRequest(format!("Invalid xuid: '{}'", raw)))
}

fn parse_match_type(raw: Option<&str>) -> Result<MatchType, AppError> {
    match raw {
        None => Ok(MatchType::All),
        Some(raw) => MatchType::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid match type: '{}'", raw))),
    }
}

pub async fn get_csrs(
    State(state): State<AppState>,
    params: Query<CsrParams>,
) -> Result<impl IntoResponse, AppError> {
    let xuids = parse_xuid_list(&params.xuids)?;

    let csrs = client(&state).get_csrs(&xuids, &params.playlist_id).await?;

    Ok(Json(csrs))
}

pub async fn get_career_ranks(
    State(state): State<AppState>,
    params: Query<CareerRankParams>,
) -> Result<impl IntoResponse, AppError> {
    let xuids = parse_xuid_list(&params.xuids)?;

    let ranks = client(&state).get_career_ranks(&xuids).await?;

    Ok(Json(ranks))
}

pub async fn get_matches(
    State(state): State<AppState>,
    Path(xuid): Path<String>,
    params: Query<MatchListParams>,
) -> Result<impl IntoResponse, AppError> {
    let xuid = parse_path_xuid(&xuid)?;
    let match_type = parse_match_type(params.match_type.as_deref())?;

    let page = client(&state)
        .get_matches(
            xuid,
            params.count.unwrap_or(25),
            params.start.unwrap_or(0),
            match_type,
        )
        .await?;

    Ok(Json(page))
}

pub async fn get_match_count(
    State(state): State<AppState>,
    Path(xuid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let xuid = parse_path_xuid(&xuid)?;

    let count = client(&state).get_match_count(xuid).await?;

    Ok(Json(count))
}

pub async fn get_service_record(
    State(state): State<AppState>,
    Path(xuid): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let xuid = parse_path_xuid(&xuid)?;

    let record = client(&state).get_service_record(xuid).await?;

    Ok(Json(record))
}

pub async fn get_match_stats(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stats = client(&state).get_match_stats(&match_id).await?;

    Ok(Json(stats))
}

pub async fn get_matches_between(
    State(state): State<AppState>,
    Path(xuid): Path<String>,
    params: Query<MatchWindowParams>,
) -> Result<impl IntoResponse, AppError> {
    let xuid = parse_path_xuid(&xuid)?;
    let match_type = parse_match_type(params.match_type.as_deref())?;

    let matches = client(&state)
        .get_matches_between(xuid, params.from, params.to, match_type)
        .await?;

    Ok(Json(matches))
}

pub async fn get_playlist_info(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let info = client(&state).get_playlist_info(&playlist_id).await?;

    Ok(Json(info))
}

pub async fn get_playlist_version(
    State(state): State<AppState>,
    Path((playlist_id, version_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let version = client(&state)
        .get_playlist_version(&playlist_id, &version_id)
        .await?;

    Ok(Json(version))
}

pub async fn get_recommended_projects(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let projects = client(&state).get_recommended_projects().await?;

    Ok(Json(projects))
}

pub async fn get_map_mode_pair(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    params: Query<MapModePairParams>,
) -> Result<impl IntoResponse, AppError> {
    let pair = client(&state)
        .get_map_mode_pair(&asset_id, params.version.as_deref())
        .await?;

    Ok(Json(pair))
}

pub async fn search_ugc(
    State(state): State<AppState>,
    params: Query<UgcSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let author = parse_path_xuid(&params.author)?;

    let results = client(&state)
        .search_ugc_by_author(author, params.count.unwrap_or(25))
        .await?;

    Ok(Json(results))
}
