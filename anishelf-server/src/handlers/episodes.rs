use axum::{extract::State, http::StatusCode};

use anishelf_model::{Episode, EpisodePatch, EpisodeView, NewEpisode};

use super::{parse_anime_id, parse_episode_number, parse_season_number};
use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{AppJson, AppPath},
};

/// Episodes of one season, in stored order.
pub async fn list_episodes(
    State(state): State<AppState>,
    AppPath((id, season)): AppPath<(String, String)>,
) -> AppResult<AppJson<Vec<Episode>>> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    let season = catalog.get_season(id, season).await?;
    Ok(AppJson(season.episodes.into_vec()))
}

/// Episode fields plus the titles of the anime and season holding it.
pub async fn get_episode(
    State(state): State<AppState>,
    AppPath((id, season, episode)): AppPath<(String, String, String)>,
) -> AppResult<AppJson<EpisodeView>> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    let episode = parse_episode_number(catalog, id, season, &episode).await?;
    Ok(AppJson(catalog.get_episode(id, season, episode).await?))
}

pub async fn add_episode(
    State(state): State<AppState>,
    AppPath((id, season)): AppPath<(String, String)>,
    AppJson(payload): AppJson<NewEpisode>,
) -> AppResult<(StatusCode, AppJson<Episode>)> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    let episode = catalog.add_episode(id, season, payload).await?;
    Ok((StatusCode::CREATED, AppJson(episode)))
}

pub async fn update_episode(
    State(state): State<AppState>,
    AppPath((id, season, episode)): AppPath<(String, String, String)>,
    AppJson(patch): AppJson<EpisodePatch>,
) -> AppResult<AppJson<Episode>> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    let episode = parse_episode_number(catalog, id, season, &episode).await?;
    Ok(AppJson(
        catalog.update_episode(id, season, episode, patch).await?,
    ))
}

pub async fn delete_episode(
    State(state): State<AppState>,
    AppPath((id, season, episode)): AppPath<(String, String, String)>,
) -> AppResult<StatusCode> {
    let catalog = state.catalog();
    let id = parse_anime_id(&id)?;
    let season = parse_season_number(catalog, id, &season).await?;
    let episode = parse_episode_number(catalog, id, season, &episode).await?;
    catalog.delete_episode(id, season, episode).await?;
    Ok(StatusCode::NO_CONTENT)
}
