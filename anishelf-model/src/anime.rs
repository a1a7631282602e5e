use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    ids::AnimeID,
    keyed::{Keyed, KeyedList},
    numbers::{EpisodeNumber, SeasonNumber},
};

/// Episode embedded in a [`Season`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub number: EpisodeNumber,
    pub title: String,
    pub video_url: String,
}

impl Keyed for Episode {
    type Key = EpisodeNumber;

    fn key(&self) -> EpisodeNumber {
        self.number
    }
}

impl Episode {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("videoUrl", &self.video_url)
    }
}

/// Season embedded in an [`Anime`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub number: SeasonNumber,
    #[serde(default)]
    pub episodes: KeyedList<Episode>,
}

impl Keyed for Season {
    type Key = SeasonNumber;

    fn key(&self) -> SeasonNumber {
        self.number
    }
}

impl Season {
    pub fn new(number: SeasonNumber) -> Self {
        Self {
            number,
            episodes: KeyedList::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(episode) = self.episodes.first_duplicate() {
            return Err(ValidationError::DuplicateEpisode {
                season: self.number,
                episode,
            });
        }
        self.episodes.iter().try_for_each(Episode::validate)
    }
}

/// Client-visible body of an anime, persisted as one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDocument {
    pub title: String,
    pub image_url: String,
    /// Recomputed on every season mutation; otherwise whatever the client sent.
    pub season_count: i64,
    /// Advisory only.
    pub episodes_per_season: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_trailer_url: Option<String>,
    pub published_by: String,
    #[serde(default)]
    pub seasons: KeyedList<Season>,
}

impl AnimeDocument {
    /// Full schema validation, run on anime create and update.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("imageUrl", &self.image_url)?;
        require_min("seasonCount", self.season_count, 1)?;
        require_min("episodesPerSeason", self.episodes_per_season, 1)?;
        require_text("publishedBy", &self.published_by)?;

        if let Some(number) = self.seasons.first_duplicate() {
            return Err(ValidationError::DuplicateSeason(number));
        }
        self.seasons.iter().try_for_each(Season::validate)
    }

    /// Set `seasonCount` to the number of seasons. An anime keeps at least
    /// one season, so emptying the list fails the `seasonCount` minimum.
    pub fn recount_seasons(&mut self) -> Result<(), ValidationError> {
        let count = self.seasons.len() as i64;
        require_min("seasonCount", count, 1)?;
        self.season_count = count;
        Ok(())
    }
}

/// Stored anime: the document plus server-managed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: AnimeID,
    #[serde(flatten)]
    pub document: AnimeDocument,
    /// Optimistic concurrency token, bumped on every write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Anime {
    pub fn new(document: AnimeDocument, now: DateTime<Utc>) -> Self {
        Self {
            id: AnimeID::new(),
            document,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn seasons(&self) -> &KeyedList<Season> {
        &self.document.seasons
    }

    pub fn summary(&self) -> AnimeSummary {
        AnimeSummary::from_document(self.id, &self.document)
    }
}

/// List projection of an anime; nested seasons are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: AnimeID,
    pub title: String,
    pub image_url: String,
    pub season_count: i64,
    pub episodes_per_season: i64,
    pub published_by: String,
}

impl AnimeSummary {
    pub fn from_document(id: AnimeID, document: &AnimeDocument) -> Self {
        Self {
            id,
            title: document.title.clone(),
            image_url: document.image_url.clone(),
            season_count: document.season_count,
            episodes_per_season: document.episodes_per_season,
            published_by: document.published_by.clone(),
        }
    }
}

/// Episode returned with the titles of the anime and season containing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeView {
    pub anime: String,
    pub season: SeasonNumber,
    #[serde(flatten)]
    pub episode: Episode,
}

fn require_text(
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn require_min(
    field: &'static str,
    actual: i64,
    min: i64,
) -> Result<(), ValidationError> {
    if actual < min {
        Err(ValidationError::BelowMinimum { field, min, actual })
    } else {
        Ok(())
    }
}
