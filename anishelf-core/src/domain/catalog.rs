use std::{any::type_name_of_val, fmt, sync::Arc};

use anishelf_model::{
    Anime, AnimeID, AnimePatch, AnimeSummary, Episode, EpisodeNumber,
    EpisodePatch, EpisodeView, KeyedListError, NewAnime, NewEpisode,
    NewSeason, Season, SeasonNumber, SeasonPatch, ValidationError,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{database::ports::animes::AnimeRepository, error::StoreError};

/// Catalog operations over anime aggregates.
///
/// Every nested mutation loads the whole anime, changes it in memory and
/// writes it back with a compare-and-swap on the version read at the start.
pub struct AnimeCatalog<R = dyn AnimeRepository>
where
    R: AnimeRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> Clone for AnimeCatalog<R>
where
    R: AnimeRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> fmt::Debug for AnimeCatalog<R>
where
    R: AnimeRepository + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimeCatalog")
            .field("repository", &type_name_of_val(self.repository.as_ref()))
            .finish()
    }
}

impl<R> AnimeCatalog<R>
where
    R: AnimeRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn list_animes(&self) -> Result<Vec<AnimeSummary>, CatalogError> {
        Ok(self.repository.list_summaries().await?)
    }

    pub async fn get_anime(&self, id: AnimeID) -> Result<Anime, CatalogError> {
        self.load(id).await
    }

    pub async fn create_anime(
        &self,
        payload: NewAnime,
    ) -> Result<Anime, CatalogError> {
        let document = payload.into_document()?;
        let anime = Anime::new(document, Utc::now());
        let stored = self.repository.insert(&anime).await?;
        info!(anime_id = %stored.id, title = %stored.document.title, "Anime created");
        Ok(stored)
    }

    pub async fn update_anime(
        &self,
        id: AnimeID,
        patch: AnimePatch,
    ) -> Result<Anime, CatalogError> {
        let mut anime = self.load(id).await?;
        anime.document = patch.merge_onto(&anime.document)?;
        let stored = self.commit(&anime).await?;
        info!(anime_id = %id, version = stored.version, "Anime updated");
        Ok(stored)
    }

    pub async fn delete_anime(&self, id: AnimeID) -> Result<(), CatalogError> {
        if !self.repository.delete(id).await? {
            debug!(anime_id = %id, "Delete requested for unknown anime");
            return Err(CatalogError::AnimeNotFound);
        }
        info!(anime_id = %id, "Anime deleted");
        Ok(())
    }

    pub async fn list_seasons(
        &self,
        id: AnimeID,
    ) -> Result<Vec<Season>, CatalogError> {
        Ok(self.load(id).await?.document.seasons.into_vec())
    }

    pub async fn get_season(
        &self,
        id: AnimeID,
        number: SeasonNumber,
    ) -> Result<Season, CatalogError> {
        let anime = self.load(id).await?;
        anime
            .seasons()
            .get(number)
            .cloned()
            .ok_or(CatalogError::SeasonNotFound)
    }

    pub async fn add_season(
        &self,
        id: AnimeID,
        payload: NewSeason,
    ) -> Result<Season, CatalogError> {
        let mut anime = self.load(id).await?;
        let number = payload.number.ok_or(CatalogError::SeasonNumberRequired)?;
        if anime.seasons().contains(number) {
            debug!(anime_id = %id, season = %number, "Season number already in use");
            return Err(CatalogError::SeasonExists);
        }

        let season = Season {
            number,
            episodes: payload.episodes,
        };
        season.validate()?;

        anime
            .document
            .seasons
            .insert(season)
            .map_err(|_| CatalogError::SeasonExists)?;
        anime.document.recount_seasons()?;

        let stored = self.commit(&anime).await?;
        info!(anime_id = %id, season = %number, "Season added");
        Self::season_of(&stored, number)
    }

    pub async fn update_season(
        &self,
        id: AnimeID,
        number: SeasonNumber,
        patch: SeasonPatch,
    ) -> Result<Season, CatalogError> {
        let mut anime = self.load(id).await?;
        let current = anime
            .seasons()
            .get(number)
            .ok_or(CatalogError::SeasonNotFound)?;

        let updated = patch.merge_onto(current);
        let next = updated.number;
        if next != number && anime.seasons().contains(next) {
            debug!(anime_id = %id, season = %number, target = %next, "Season renumber collides");
            return Err(CatalogError::SeasonNumberTaken);
        }
        updated.validate()?;

        anime
            .document
            .seasons
            .replace(number, updated)
            .map_err(|err| match err {
                KeyedListError::Duplicate(_) => CatalogError::SeasonNumberTaken,
                KeyedListError::Missing(_) => CatalogError::SeasonNotFound,
            })?;
        anime.document.recount_seasons()?;

        let stored = self.commit(&anime).await?;
        info!(anime_id = %id, season = %next, "Season updated");
        Self::season_of(&stored, next)
    }

    pub async fn delete_season(
        &self,
        id: AnimeID,
        number: SeasonNumber,
    ) -> Result<(), CatalogError> {
        let mut anime = self.load(id).await?;
        anime
            .document
            .seasons
            .remove(number)
            .map_err(|_| CatalogError::SeasonNotFound)?;
        anime.document.recount_seasons()?;

        self.commit(&anime).await?;
        info!(anime_id = %id, season = %number, "Season deleted");
        Ok(())
    }

    pub async fn get_episode(
        &self,
        id: AnimeID,
        season: SeasonNumber,
        number: EpisodeNumber,
    ) -> Result<EpisodeView, CatalogError> {
        let anime = self.load(id).await?;
        let found = anime
            .seasons()
            .get(season)
            .ok_or(CatalogError::SeasonNotFound)?;
        let episode = found
            .episodes
            .get(number)
            .cloned()
            .ok_or(CatalogError::EpisodeNotFound)?;

        let season = found.number;

        Ok(EpisodeView {
            anime: anime.document.title,
            season,
            episode,
        })
    }

    pub async fn add_episode(
        &self,
        id: AnimeID,
        season: SeasonNumber,
        payload: NewEpisode,
    ) -> Result<Episode, CatalogError> {
        let mut anime = self.load(id).await?;
        let target = Self::season_mut(&mut anime, season)?;
        let episode = payload
            .into_episode()
            .ok_or(CatalogError::EpisodeFieldsRequired)?;
        let number = episode.number;

        target.episodes.insert(episode).map_err(|_| {
            debug!(anime_id = %id, season = %season, episode = %number, "Episode number already in use");
            CatalogError::EpisodeExists
        })?;

        let stored = self.commit(&anime).await?;
        info!(anime_id = %id, season = %season, episode = %number, "Episode added");
        Self::episode_of(&stored, season, number)
    }

    pub async fn update_episode(
        &self,
        id: AnimeID,
        season: SeasonNumber,
        number: EpisodeNumber,
        patch: EpisodePatch,
    ) -> Result<Episode, CatalogError> {
        let mut anime = self.load(id).await?;
        let target = Self::season_mut(&mut anime, season)?;
        let current = target
            .episodes
            .get(number)
            .ok_or(CatalogError::EpisodeNotFound)?;

        let updated = patch.merge_onto(current);
        let next = updated.number;
        if next != number && target.episodes.contains(next) {
            debug!(anime_id = %id, season = %season, episode = %number, target = %next, "Episode renumber collides");
            return Err(CatalogError::EpisodeNumberTaken);
        }
        updated.validate()?;

        target
            .episodes
            .replace(number, updated)
            .map_err(|err| match err {
                KeyedListError::Duplicate(_) => CatalogError::EpisodeNumberTaken,
                KeyedListError::Missing(_) => CatalogError::EpisodeNotFound,
            })?;

        let stored = self.commit(&anime).await?;
        info!(anime_id = %id, season = %season, episode = %next, "Episode updated");
        Self::episode_of(&stored, season, next)
    }

    pub async fn delete_episode(
        &self,
        id: AnimeID,
        season: SeasonNumber,
        number: EpisodeNumber,
    ) -> Result<(), CatalogError> {
        let mut anime = self.load(id).await?;
        Self::season_mut(&mut anime, season)?
            .episodes
            .remove(number)
            .map_err(|_| CatalogError::EpisodeNotFound)?;

        self.commit(&anime).await?;
        info!(anime_id = %id, season = %season, episode = %number, "Episode deleted");
        Ok(())
    }

    /// Probe the backing store.
    pub async fn health(&self) -> Result<(), CatalogError> {
        Ok(self.repository.ping().await?)
    }

    async fn load(&self, id: AnimeID) -> Result<Anime, CatalogError> {
        self.repository
            .get(id)
            .await?
            .ok_or(CatalogError::AnimeNotFound)
    }

    async fn commit(&self, anime: &Anime) -> Result<Anime, CatalogError> {
        match self.repository.replace(anime, anime.version).await {
            Ok(stored) => Ok(stored),
            Err(StoreError::StaleVersion {
                id,
                expected,
                found,
            }) => {
                warn!(anime_id = %id, expected, found, "Rejected stale write");
                Err(CatalogError::ConcurrentModification)
            }
            Err(StoreError::NotFound(_)) => Err(CatalogError::AnimeNotFound),
            Err(err) => Err(err.into()),
        }
    }

    fn season_mut(
        anime: &mut Anime,
        number: SeasonNumber,
    ) -> Result<&mut Season, CatalogError> {
        anime
            .document
            .seasons
            .get_mut(number)
            .ok_or(CatalogError::SeasonNotFound)
    }

    // Re-read from the stored document rather than the value that was inserted.
    fn season_of(
        anime: &Anime,
        number: SeasonNumber,
    ) -> Result<Season, CatalogError> {
        anime
            .seasons()
            .get(number)
            .cloned()
            .ok_or(CatalogError::SeasonNotFound)
    }

    fn episode_of(
        anime: &Anime,
        season: SeasonNumber,
        number: EpisodeNumber,
    ) -> Result<Episode, CatalogError> {
        anime
            .seasons()
            .get(season)
            .ok_or(CatalogError::SeasonNotFound)?
            .episodes
            .get(number)
            .cloned()
            .ok_or(CatalogError::EpisodeNotFound)
    }
}

/// Coarse classification used to pick an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    NotFound,
    Conflict,
    BadRequest,
    Validation,
    Internal,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Anime not found")]
    AnimeNotFound,
    #[error("Season not found")]
    SeasonNotFound,
    #[error("Episode not found")]
    EpisodeNotFound,
    #[error("Season number is required")]
    SeasonNumberRequired,
    #[error("Episode number, title, and videoUrl are required")]
    EpisodeFieldsRequired,
    #[error("Season already exists")]
    SeasonExists,
    #[error("Another season already has this number")]
    SeasonNumberTaken,
    #[error("Episode already exists")]
    EpisodeExists,
    #[error("Another episode already uses this number in the season")]
    EpisodeNumberTaken,
    #[error("Anime was modified by another request, retry with fresh data")]
    ConcurrentModification,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            Self::AnimeNotFound | Self::SeasonNotFound | Self::EpisodeNotFound => {
                CatalogErrorKind::NotFound
            }
            Self::SeasonNumberRequired | Self::EpisodeFieldsRequired => {
                CatalogErrorKind::BadRequest
            }
            Self::SeasonExists
            | Self::SeasonNumberTaken
            | Self::EpisodeExists
            | Self::EpisodeNumberTaken
            | Self::ConcurrentModification => CatalogErrorKind::Conflict,
            Self::Validation(_) => CatalogErrorKind::Validation,
            Self::Storage(StoreError::NotFound(_)) => CatalogErrorKind::NotFound,
            Self::Storage(StoreError::StaleVersion { .. }) => {
                CatalogErrorKind::Conflict
            }
            Self::Storage(_) => CatalogErrorKind::Internal,
        }
    }
}
