use axum::{extract::State, http::StatusCode};

use anishelf_model::{Anime, AnimePatch, AnimeSummary, NewAnime};

use super::parse_anime_id;
use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{AppJson, AppPath},
};

/// `GET /animes`: every anime without its seasons.
pub async fn list_animes(
    State(state): State<AppState>,
) -> AppResult<AppJson<Vec<AnimeSummary>>> {
    Ok(AppJson(state.catalog().list_animes().await?))
}

pub async fn get_anime(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<AppJson<Anime>> {
    let id = parse_anime_id(&id)?;
    Ok(AppJson(state.catalog().get_anime(id).await?))
}

pub async fn create_anime(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewAnime>,
) -> AppResult<(StatusCode, AppJson<Anime>)> {
    let anime = state.catalog().create_anime(payload).await?;
    Ok((StatusCode::CREATED, AppJson(anime)))
}

pub async fn update_anime(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(patch): AppJson<AnimePatch>,
) -> AppResult<AppJson<Anime>> {
    let id = parse_anime_id(&id)?;
    Ok(AppJson(state.catalog().update_anime(id, patch).await?))
}

pub async fn delete_anime(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<StatusCode> {
    let id = parse_anime_id(&id)?;
    state.catalog().delete_anime(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
