use axum::{routing::get, Router};

use crate::server::{
    controller::{
        auth::{callback, login},
        build::{create_build, get_builds},
        halo::{
            get_career_ranks, get_csrs, get_map_mode_pair, get_match_count, get_match_stats,
            get_matches, get_matches_between, get_playlist_info, get_playlist_version,
            get_recommended_projects, get_service_record, search_ugc,
        },
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", get(login))
        .route("/api/auth/callback", get(callback))
        .route("/api/halo/csrs", get(get_csrs))
        .route("/api/halo/career-ranks", get(get_career_ranks))
        .route("/api/halo/players/{xuid}/matches", get(get_matches))
        .route("/api/halo/players/{xuid}/matches/count", get(get_match_count))
        .route(
            "/api/halo/players/{xuid}/service-record",
            get(get_service_record),
        )
        .route(
            "/api/halo/players/{xuid}/matches/between",
            get(get_matches_between),
        )
        .route("/api/halo/matches/{match_id}/stats", get(get_match_stats))
        .route("/api/halo/playlists/{playlist_id}", get(get_playlist_info))
        .route(
            "/api/halo/playlists/{playlist_id}/versions/{version_id}",
            get(get_playlist_version),
        )
        .route(
            "/api/halo/map-mode-pairs/{asset_id}",
            get(get_map_mode_pair),
        )
        .route("/api/halo/ugc", get(search_ugc))
        .route("/api/halo/ugc/recommended", get(get_recommended_projects))
        .route("/api/builds", get(get_builds).post(create_build))
}
