pub mod db_url;
pub mod error;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    models::{
        Config, ConfigMetadata, DatabaseConfig, ServerConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{ConfigWarning, ConfigWarnings},
};

use db_url::resolve_database_url;
use error::ConfigLoadError;

/// Files probed, in order, when no config path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] =
    ["anishelf.toml", "config/anishelf.toml"];

/// Composed configuration plus anything worth warning the operator about.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone, Default)]
enum EnvFileMode {
    #[default]
    WorkingDirectory,
    Explicit(PathBuf),
    Skip,
}

/// Builder that composes `.env`, the TOML file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: EnvFileMode,
    env: Option<EnvConfig>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this TOML file; it must exist.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load this `.env` file instead of the one in the working directory.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = EnvFileMode::Explicit(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.env_file = EnvFileMode::Skip;
        self
    }

    /// Use pre-gathered variables instead of reading the process environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn load(self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = load_env_file(&self.env_file)?;
        let env = self.env.unwrap_or_else(EnvConfig::gather);
        let mut warnings = ConfigWarnings::default();

        let explicit = self.config_path.or_else(|| env.config_path.clone());
        let config_path = match explicit {
            Some(path) if path.is_file() => Some(path),
            Some(path) => {
                return Err(ConfigLoadError::MissingConfigFile { path });
            }
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .find(|path| path.is_file()),
        };

        let file = match config_path.as_deref() {
            Some(path) => read_file_config(path)?,
            None => {
                warnings.push(
                    ConfigWarning::new("no config file found; using environment and defaults")
                        .with_hint("create anishelf.toml or set ANISHELF_CONFIG"),
                );
                FileConfig::default()
            }
        };

        for var in &env.unparsed {
            warnings.push(
                ConfigWarning::new(format!(
                    "ignoring {}={:?}: not a valid number",
                    var.name, var.raw
                ))
                .with_hint("unset it or provide a non-negative integer"),
            );
        }

        let url = resolve_database_url(&env, &file.database)?;
        if let Some((_, source)) = url.as_ref() {
            debug!(?source, "database url resolved");
        }

        let defaults = DatabaseConfig::default();
        let mut database = DatabaseConfig {
            url: url.map(|(url, _)| url),
            max_connections: env
                .database_max_connections
                .or(file.database.max_connections)
                .unwrap_or(defaults.max_connections),
            min_connections: env
                .database_min_connections
                .or(file.database.min_connections)
                .unwrap_or(defaults.min_connections),
            acquire_timeout_secs: env
                .database_acquire_timeout_secs
                .or(file.database.acquire_timeout_secs)
                .unwrap_or(defaults.acquire_timeout_secs),
        };

        if database.max_connections == 0 {
            warnings.push(ConfigWarning::new(
                "database max_connections is 0; using 1",
            ));
            database.max_connections = 1;
        }
        if database.min_connections > database.max_connections {
            warnings.push(ConfigWarning::new(format!(
                "database min_connections ({}) exceeds max_connections ({}); clamping",
                database.min_connections, database.max_connections
            )));
            database.min_connections = database.max_connections;
        }

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env
                .server_host
                .or(file.server.host)
                .unwrap_or(server_defaults.host),
            port: env
                .server_port
                .or(file.server.port)
                .unwrap_or(server_defaults.port),
        };

        Ok(ConfigLoad {
            config: Config {
                server,
                database,
                metadata: ConfigMetadata {
                    config_path,
                    env_file_loaded,
                },
            },
            warnings,
        })
    }
}

fn load_env_file(mode: &EnvFileMode) -> Result<bool, ConfigLoadError> {
    match mode {
        EnvFileMode::Skip => Ok(false),
        EnvFileMode::Explicit(path) => dotenvy::from_path(path)
            .map(|()| true)
            .map_err(|source| ConfigLoadError::EnvFile {
                path: path.clone(),
                source,
            }),
        EnvFileMode::WorkingDirectory => match dotenvy::dotenv() {
            Ok(_) => Ok(true),
            Err(err) if err.not_found() => Ok(false),
            Err(source) => Err(ConfigLoadError::EnvFile {
                path: PathBuf::from(".env"),
                source,
            }),
        },
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn loader(env: EnvConfig) -> ConfigLoader {
        ConfigLoader::new().without_env_file().with_env(env)
    }

    #[test]
    fn env_overrides_file_which_overrides_defaults() {
        let file = toml_file(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://toml/anime"
            max_connections = 4
            "#,
        );
        let env = EnvConfig {
            server_port: Some(9090),
            database_url: Some("memory://".into()),
            ..EnvConfig::default()
        };

        let ConfigLoad { config, warnings } =
            loader(env).with_config_path(file.path()).load().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url.as_deref(), Some("memory://"));
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.acquire_timeout_secs, 30);
        assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
        assert!(!config.metadata.env_file_loaded);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader(EnvConfig::default())
            .with_config_path(dir.path().join("absent.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfigFile { .. }));
    }

    #[test]
    fn config_path_from_env_is_honoured() {
        let file = toml_file("[server]\nport = 4100\n");
        let env = EnvConfig {
            config_path: Some(file.path().to_path_buf()),
            ..EnvConfig::default()
        };
        let load = loader(env).load().unwrap();
        assert_eq!(load.config.server.port, 4100);
    }

    #[test]
    fn malformed_toml_reports_path() {
        let file = toml_file("[server\nport = ");
        let err = loader(EnvConfig::default())
            .with_config_path(file.path())
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn inconsistent_pool_sizes_are_clamped_with_warning() {
        let file = toml_file(
            "[database]\nmax_connections = 2\nmin_connections = 5\n",
        );
        let env = EnvConfig {
            unparsed: vec![crate::models::sources::UnparsedVar {
                name: "PORT",
                raw: "http".into(),
            }],
            ..EnvConfig::default()
        };
        let ConfigLoad { config, warnings } =
            loader(env).with_config_path(file.path()).load().unwrap();

        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.server.port, 3000);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.message.contains("PORT")));
    }

    #[test]
    fn explicit_env_file_is_loaded() {
        let mut env_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(env_file, "ANISHELF_TEST_ONLY_MARKER=1").unwrap();
        let file = toml_file("");

        let load = ConfigLoader::new()
            .with_env_file(env_file.path())
            .with_env(EnvConfig::default())
            .with_config_path(file.path())
            .load()
            .unwrap();
        assert!(load.config.metadata.env_file_loaded);
    }
}
