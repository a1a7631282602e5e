use std::{fmt, time::Duration};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

use crate::{
    MIGRATOR,
    database::infrastructure::postgres::animes::PostgresAnimeRepository,
    error::{Result, StoreError},
};

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    settings: PoolSettings,
    animes: PostgresAnimeRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.settings.max_connections)
            .field("min_connections", &self.settings.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(
        connection_string: &str,
        settings: PoolSettings,
    ) -> Result<Self> {
        let connect_options = Self::build_connect_options(connection_string)?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                StoreError::Internal(format!(
                    "Database connection failed: {e}"
                ))
            })?;

        info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "Database pool initialized"
        );

        Ok(Self::with_settings(pool, settings))
    }

    /// Wrap an existing pool, e.g. one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::with_settings(pool, PoolSettings::default())
    }

    fn with_settings(pool: PgPool, settings: PoolSettings) -> Self {
        let animes = PostgresAnimeRepository::new(pool.clone());
        Self {
            pool,
            settings,
            animes,
        }
    }

    fn build_connect_options(
        connection_string: &str,
    ) -> Result<PgConnectOptions> {
        connection_string
            .trim()
            .parse::<PgConnectOptions>()
            .map_err(|e| {
                StoreError::Internal(format!(
                    "Invalid PostgreSQL connection string: {e}"
                ))
            })
    }

    pub fn animes(&self) -> PostgresAnimeRepository {
        self.animes.clone()
    }

    /// Apply pending migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.map_err(|e| {
            StoreError::Internal(format!("Migration failed: {e}"))
        })?;
        Ok(())
    }
}
