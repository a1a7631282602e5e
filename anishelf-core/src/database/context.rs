use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::database::{
    infrastructure::memory::InMemoryAnimeRepository,
    ports::animes::AnimeRepository,
    postgres::{PoolSettings, PostgresDatabase},
};
use crate::error::{Result, StoreError};

/// Storage selected by the scheme of the connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local store, lost on restart.
    Memory,
}

impl StorageBackend {
    pub fn from_connection_string(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let scheme = trimmed
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase());

        match scheme.as_deref() {
            Some("postgres" | "postgresql") => Ok(Self::Postgres),
            Some("memory") => Ok(Self::Memory),
            _ => Err(StoreError::UnsupportedConnection(redact(trimmed))),
        }
    }
}

/// Bundles the chosen repository with the adapter it came from, so callers can
/// still run Postgres-specific setup such as migrations.
#[derive(Clone)]
pub struct StorageContext {
    backend: StorageBackend,
    postgres: Option<Arc<PostgresDatabase>>,
    animes: Arc<dyn AnimeRepository>,
}

impl fmt::Debug for StorageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageContext")
            .field("backend", &self.backend)
            .field("postgres", &self.postgres)
            .finish()
    }
}

impl StorageContext {
    pub async fn connect(url: &str, settings: PoolSettings) -> Result<Self> {
        match StorageBackend::from_connection_string(url)? {
            StorageBackend::Postgres => {
                let postgres =
                    Arc::new(PostgresDatabase::new(url, settings).await?);
                Ok(Self::from_postgres(postgres))
            }
            StorageBackend::Memory => {
                warn!(
                    "Using in-memory storage; catalog data will not survive a restart"
                );
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            postgres: None,
            animes: Arc::new(InMemoryAnimeRepository::new()),
        }
    }

    pub fn from_postgres(postgres: Arc<PostgresDatabase>) -> Self {
        let animes: Arc<dyn AnimeRepository> = Arc::new(postgres.animes());
        Self {
            backend: StorageBackend::Postgres,
            postgres: Some(postgres),
            animes,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub fn postgres(&self) -> Option<Arc<PostgresDatabase>> {
        self.postgres.clone()
    }

    pub fn animes(&self) -> Arc<dyn AnimeRepository> {
        Arc::clone(&self.animes)
    }

    /// Run migrations; nothing to do for the in-memory store.
    pub async fn initialize_schema(&self) -> Result<()> {
        match &self.postgres {
            Some(postgres) => postgres.initialize_schema().await,
            None => Ok(()),
        }
    }
}

/// Drop credentials before a connection string ends up in an error message.
fn redact(url: &str) -> String {
    match (url.split_once("://"), url.rfind('@')) {
        (Some((scheme, _)), Some(at)) => format!("{scheme}://***{}", &url[at..]),
        _ => url.to_string(),
    }
}
