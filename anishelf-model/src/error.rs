use thiserror::Error;

use crate::numbers::{EpisodeNumber, SeasonNumber};

/// Schema constraint violations found while validating a document or payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Anime validation failed: `{field}` is required")]
    Required { field: &'static str },

    #[error(
        "Anime validation failed: `{field}` ({actual}) is less than minimum allowed value ({min})"
    )]
    BelowMinimum {
        field: &'static str,
        min: i64,
        actual: i64,
    },

    #[error("Anime validation failed: season {0} appears more than once")]
    DuplicateSeason(SeasonNumber),

    #[error(
        "Anime validation failed: episode {episode} appears more than once in season {season}"
    )]
    DuplicateEpisode {
        season: SeasonNumber,
        episode: EpisodeNumber,
    },
}
