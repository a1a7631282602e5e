use axum::{extract::State, http::StatusCode};

use anishelf_model::{NewSeason, Season, SeasonPatch};

use super::{parse_anime_id, parse_season_number};
use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{AppJson, AppPath},
};

/// Seasons in stored order, not sorted by number.
pub async fn list_seasons(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<AppJson<Vec<Season>>> {
    let id = parse_anime_id(&id)?;
    Ok(AppJson(state.catalog().list_seasons(id).await?))
}

pub async fn get_season(
    State(state): State<AppState>,
    AppPath((id, season)): AppPath<(String, String)>,
) -> AppResult<AppJson<Season>> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    Ok(AppJson(catalog.get_season(id, season).await?))
}

pub async fn add_season(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<NewSeason>,
) -> AppResult<(StatusCode, AppJson<Season>)> {
    let id = parse_anime_id(&id)?;
    let season = state.catalog().add_season(id, payload).await?;
    Ok((StatusCode::CREATED, AppJson(season)))
}

pub async fn update_season(
    State(state): State<AppState>,
    AppPath((id, season)): AppPath<(String, String)>,
    AppJson(patch): AppJson<SeasonPatch>,
) -> AppResult<AppJson<Season>> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    Ok(AppJson(catalog.update_season(id, season, patch).await?))
}

pub async fn delete_season(
    State(state): State<AppState>,
    AppPath((id, season)): AppPath<(String, String)>,
) -> AppResult<StatusCode> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    catalog.delete_season(id, season).await?;
    Ok(StatusCode::NO_CONTENT)
}
