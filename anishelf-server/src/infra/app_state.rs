use std::fmt;

use anishelf_core::{AnimeCatalog, StorageBackend, StorageContext};

#[derive(Clone)]
pub struct AppState {
    pub catalog: AnimeCatalog,
    pub backend: StorageBackend,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(catalog: AnimeCatalog, backend: StorageBackend) -> Self {
        Self { catalog, backend }
    }

    pub fn from_storage(storage: &StorageContext) -> Self {
        Self::new(AnimeCatalog::new(storage.animes()), storage.backend())
    }

    pub fn catalog(&self) -> &AnimeCatalog {
        &self.catalog
    }
}
