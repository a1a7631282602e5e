use anishelf_model::{Anime, AnimeDocument, AnimeID, AnimeSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use uuid::Uuid;

use crate::database::ports::animes::AnimeRepository;
use crate::error::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct PostgresAnimeRepository {
    pool: PgPool,
}

impl PostgresAnimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Anime> {
        let id: Uuid = row.try_get("id").map_err(|e| {
            StoreError::Internal(format!("Failed to read anime id: {e}"))
        })?;
        let Json(document): Json<AnimeDocument> =
            row.try_get("document").map_err(|e| {
                StoreError::Internal(format!(
                    "Failed to decode anime document {id}: {e}"
                ))
            })?;
        let version: i64 = row.try_get("version").map_err(|e| {
            StoreError::Internal(format!("Failed to read version: {e}"))
        })?;
        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(|e| {
                StoreError::Internal(format!("Failed to read created_at: {e}"))
            })?;
        let updated_at: DateTime<Utc> =
            row.try_get("updated_at").map_err(|e| {
                StoreError::Internal(format!("Failed to read updated_at: {e}"))
            })?;

        Ok(Anime {
            id: AnimeID(id),
            document,
            version,
            created_at,
            updated_at,
        })
    }

    fn map_summary_row(row: &PgRow) -> Result<AnimeSummary> {
        let id: Uuid = row.try_get("id").map_err(|e| {
            StoreError::Internal(format!("Failed to read anime id: {e}"))
        })?;
        // `seasons` is stripped in SQL and defaults to empty on decode.
        let Json(document): Json<AnimeDocument> =
            row.try_get("document").map_err(|e| {
                StoreError::Internal(format!(
                    "Failed to decode anime summary {id}: {e}"
                ))
            })?;

        Ok(AnimeSummary::from_document(AnimeID(id), &document))
    }

    async fn current_version(&self, id: AnimeID) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT version FROM animes WHERE id = $1")
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                StoreError::Internal(format!(
                    "Failed to load anime version: {e}"
                ))
            })?;

        row.map(|row| {
            row.try_get::<i64, _>("version").map_err(|e| {
                StoreError::Internal(format!("Failed to read version: {e}"))
            })
        })
        .transpose()
    }
}

#[async_trait]
impl AnimeRepository for PostgresAnimeRepository {
    async fn list_summaries(&self) -> Result<Vec<AnimeSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, document - 'seasons' AS document
            FROM animes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to list animes: {e}"))
        })?;

        rows.iter().map(Self::map_summary_row).collect()
    }

    async fn get(&self, id: AnimeID) -> Result<Option<Anime>> {
        let row = sqlx::query(
            r#"
            SELECT id, document, version, created_at, updated_at
            FROM animes
            WHERE id = $1
            "#,
        )
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to load anime {id}: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn insert(&self, anime: &Anime) -> Result<Anime> {
        let row = sqlx::query(
            r#"
            INSERT INTO animes (id, document, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, document, version, created_at, updated_at
            "#,
        )
        .bind(anime.id.to_uuid())
        .bind(Json(&anime.document))
        .bind(anime.version)
        .bind(anime.created_at)
        .bind(anime.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!("Failed to insert anime: {e}"))
        })?;

        Self::map_row(&row)
    }

    async fn replace(
        &self,
        anime: &Anime,
        expected_version: i64,
    ) -> Result<Anime> {
        let row = sqlx::query(
            r#"
            UPDATE animes
            SET document = $2,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1
              AND version = $3
            RETURNING id, document, version, created_at, updated_at
            "#,
        )
        .bind(anime.id.to_uuid())
        .bind(Json(&anime.document))
        .bind(expected_version)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            StoreError::Internal(format!(
                "Failed to update anime {}: {e}",
                anime.id
            ))
        })?;

        match row {
            Some(row) => Self::map_row(&row),
            None => match self.current_version(anime.id).await? {
                Some(found) => Err(StoreError::StaleVersion {
                    id: anime.id,
                    expected: expected_version,
                    found,
                }),
                None => Err(StoreError::NotFound(anime.id)),
            },
        }
    }

    async fn delete(&self, id: AnimeID) -> Result<bool> {
        let result = sqlx::query("DELETE FROM animes WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                StoreError::Internal(format!(
                    "Failed to delete anime {id}: {e}"
                ))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| {
                StoreError::Internal(format!("Database ping failed: {e}"))
            })?;
        Ok(())
    }
}
