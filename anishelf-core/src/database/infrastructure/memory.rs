use std::collections::HashMap;

use anishelf_model::{Anime, AnimeID, AnimeSummary};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::database::ports::animes::AnimeRepository;
use crate::error::{Result, StoreError};

/// Process-local [`AnimeRepository`] with the same versioning rules as the
/// Postgres adapter.
#[derive(Debug, Default)]
pub struct InMemoryAnimeRepository {
    animes: Mutex<HashMap<AnimeID, Anime>>,
}

impl InMemoryAnimeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepository {
    async fn list_summaries(&self) -> Result<Vec<AnimeSummary>> {
        let guard = self.animes.lock().await;
        let mut animes: Vec<&Anime> = guard.values().collect();
        animes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(animes.into_iter().map(Anime::summary).collect())
    }

    async fn get(&self, id: AnimeID) -> Result<Option<Anime>> {
        Ok(self.animes.lock().await.get(&id).cloned())
    }

    async fn insert(&self, anime: &Anime) -> Result<Anime> {
        let mut guard = self.animes.lock().await;
        if guard.contains_key(&anime.id) {
            return Err(StoreError::Internal(format!(
                "Anime {} already exists",
                anime.id
            )));
        }
        guard.insert(anime.id, anime.clone());
        Ok(anime.clone())
    }

    async fn replace(
        &self,
        anime: &Anime,
        expected_version: i64,
    ) -> Result<Anime> {
        let mut guard = self.animes.lock().await;
        let stored = guard
            .get_mut(&anime.id)
            .ok_or(StoreError::NotFound(anime.id))?;

        if stored.version != expected_version {
            return Err(StoreError::StaleVersion {
                id: anime.id,
                expected: expected_version,
                found: stored.version,
            });
        }

        stored.document = anime.document.clone();
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: AnimeID) -> Result<bool> {
        Ok(self.animes.lock().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
