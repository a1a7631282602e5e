pub mod animes;
pub mod episodes;
pub mod seasons;
pub mod system;

use anishelf_core::{AnimeCatalog, CatalogError};
use anishelf_model::{AnimeID, EpisodeNumber, SeasonNumber};

use crate::infra::errors::{AppError, AppResult};

// Path segments that do not parse can never match a stored key, so they
// resolve to the not-found error of the first level that is actually missing.

pub(crate) fn parse_anime_id(raw: &str) -> AppResult<AnimeID> {
    raw.parse()
        .map_err(|_| AppError::from(CatalogError::AnimeNotFound))
}

pub(crate) async fn parse_season_number(
    catalog: &AnimeCatalog,
    id: AnimeID,
    raw: &str,
) -> AppResult<SeasonNumber> {
    match raw.parse() {
        Ok(number) => Ok(number),
        Err(_) => {
            catalog.get_anime(id).await?;
            Err(CatalogError::SeasonNotFound.into())
        }
    }
}

pub(crate) async fn parse_episode_number(
    catalog: &AnimeCatalog,
    id: AnimeID,
    season: SeasonNumber,
    raw: &str,
) -> AppResult<EpisodeNumber> {
    match raw.parse() {
        Ok(number) => Ok(number),
        Err(_) => {
            catalog.get_season(id, season).await?;
            Err(CatalogError::EpisodeNotFound.into())
        }
    }
}
