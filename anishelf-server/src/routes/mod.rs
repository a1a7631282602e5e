use axum::{Router, routing::get};

use crate::handlers::{animes, episodes, seasons};
use crate::infra::app_state::AppState;

pub mod paths {
    pub const ANIMES: &str = "/animes";
    pub const ANIME: &str = "/animes/{id}";
    pub const SEASONS: &str = "/animes/{id}/seasons";
    pub const SEASON: &str = "/animes/{id}/seasons/{season}";
    pub const EPISODES: &str = "/animes/{id}/seasons/{season}/episodes";
    pub const EPISODE: &str =
        "/animes/{id}/seasons/{season}/episodes/{episode}";
}

/// Anime collection plus its season and episode sub-resources.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            paths::ANIMES,
            get(animes::list_animes).post(animes::create_anime),
        )
        .route(
            paths::ANIME,
            get(animes::get_anime)
                .put(animes::update_anime)
                .delete(animes::delete_anime),
        )
        .route(
            paths::SEASONS,
            get(seasons::list_seasons).post(seasons::add_season),
        )
        .route(
            paths::SEASON,
            get(seasons::get_season)
                .put(seasons::update_season)
                .delete(seasons::delete_season),
        )
        .route(
            paths::EPISODES,
            get(episodes::list_episodes).post(episodes::add_episode),
        )
        .route(
            paths::EPISODE,
            get(episodes::get_episode)
                .put(episodes::update_episode)
                .delete(episodes::delete_episode),
        )
}
