use anishelf_model::{Anime, AnimeID, AnimeSummary};
use async_trait::async_trait;

use crate::error::Result;

/// Whole-document persistence for anime aggregates.
///
/// Seasons and episodes are never stored on their own; callers load an
/// [`Anime`], change it in memory and hand the complete document back.
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// Every stored anime in insertion order, without nested seasons.
    async fn list_summaries(&self) -> Result<Vec<AnimeSummary>>;

    async fn get(&self, id: AnimeID) -> Result<Option<Anime>>;

    /// Persist a new document and return it as stored.
    async fn insert(&self, anime: &Anime) -> Result<Anime>;

    /// Overwrite the stored document if its version still equals
    /// `expected_version`. The stored version is incremented and `updated_at`
    /// refreshed; the stored record is returned.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when the
    /// anime no longer exists and with
    /// [`StoreError::StaleVersion`](crate::StoreError::StaleVersion) when another
    /// write landed first.
    async fn replace(&self, anime: &Anime, expected_version: i64)
    -> Result<Anime>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: AnimeID) -> Result<bool>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
