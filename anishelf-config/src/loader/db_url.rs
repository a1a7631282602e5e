use std::{fs::read_to_string, path::Path};

use url::Url;

use crate::{
    ConfigLoadError,
    models::sources::{EnvConfig, FileDatabaseConfig},
};

/// Source of the effective connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseUrlSource {
    /// `DATABASE_URL`
    Env,
    /// File named by `DATABASE_URL_FILE`
    SecretFile,
    /// `[database] url` in the config file
    ConfigFile,
}

/// Pick the connection URL: `DATABASE_URL`, then `DATABASE_URL_FILE`, then the
/// config file. The chosen value must parse as a URL.
pub fn resolve_database_url(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<(String, DatabaseUrlSource)>, ConfigLoadError> {
    let candidate = if let Some(url) = env.database_url.clone() {
        Some((url, DatabaseUrlSource::Env))
    } else if let Some(path) = env.database_url_file.as_ref()
        && let Some(url) = read_secret_file(path)?
    {
        Some((url, DatabaseUrlSource::SecretFile))
    } else {
        file_database
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| (url.to_string(), DatabaseUrlSource::ConfigFile))
    };

    if let Some((url, _)) = candidate.as_ref() {
        Url::parse(url)
            .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    }
    Ok(candidate)
}

pub fn read_secret_file(
    path: &Path,
) -> Result<Option<String>, ConfigLoadError> {
    let contents = read_to_string(path).map_err(|source| {
        ConfigLoadError::SecretFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
