//! # Anishelf Core
//!
//! Storage and business logic for the Anishelf anime catalog.
//!
//! - [`database`]: the [`AnimeRepository`](database::ports::animes::AnimeRepository)
//!   port with PostgreSQL (JSONB document) and in-memory implementations
//! - [`domain`]: the [`AnimeCatalog`](domain::catalog::AnimeCatalog) service, which
//!   treats each anime as an aggregate root and mutates embedded seasons and
//!   episodes through whole-document compare-and-swap writes
//! - [`error`]: storage error types
#![allow(missing_docs)]

/// Database ports and implementations
pub mod database;

/// Catalog operations over anime documents
pub mod domain;

/// Error types and error handling utilities
pub mod error;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use database::{
    context::{StorageBackend, StorageContext},
    infrastructure::memory::InMemoryAnimeRepository,
    ports::animes::AnimeRepository,
    postgres::{PoolSettings, PostgresDatabase},
};
pub use domain::catalog::{AnimeCatalog, CatalogError, CatalogErrorKind};
pub use error::{Result, StoreError};
