use anishelf_model::AnimeID;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Anime not found: {0}")]
    NotFound(AnimeID),

    #[error(
        "Stale write for anime {id}: expected version {expected}, found {found}"
    )]
    StaleVersion {
        id: AnimeID,
        expected: i64,
        found: i64,
    },

    #[error("Unsupported connection string: {0}")]
    UnsupportedConnection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
