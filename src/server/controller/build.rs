use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::halo::BuildDto,
    server::{data::build::BuildRepository, error::AppError, state::AppState},
};

/// Request body for recording a new client build.
///
/// # Fields
/// - `build_id` - Client build string, e.g. `"6.10025.13343"`
/// - `build_date` - Release date of the build; the newest date is the one
///   clearance issuance uses
#[derive(Deserialize)]
pub struct CreateBuildParams {
    pub build_id: String,
    pub build_date: DateTime<Utc>,
}

pub async fn get_builds(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let builds = BuildRepository::new(&state.db).get_all().await?;

    let dtos: Vec<BuildDto> = builds
        .into_iter()
        .map(|build| BuildDto {
            id: build.id,
            build_id: build.build_id,
            build_date: build.build_date,
        })
        .collect();

    Ok(Json(dtos))
}

pub async fn create_build(
    State(state): State<AppState>,
    Json(params): Json<CreateBuildParams>,
) -> Result<impl IntoResponse, AppError> {
    if params.build_id.trim().is_empty() {
        return Err(AppError::BadRequest("build_id must not be empty".to_string()));
    }

    let build = BuildRepository::new(&state.db)
        .create(params.build_id, params.build_date, None)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BuildDto {
            id: build.id,
            build_id: build.build_id,
            build_date: build.build_date,
        }),
    ))
}
