use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};

use crate::util::{Parsed, non_empty, parse_value};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_connections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquire_timeout_secs: Option<u64>,
}

/// Variable that was set but could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedVar {
    pub name: &'static str,
    pub raw: String,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_url_file: Option<PathBuf>,
    pub database_max_connections: Option<u32>,
    pub database_min_connections: Option<u32>,
    pub database_acquire_timeout_secs: Option<u64>,
    pub unparsed: Vec<UnparsedVar>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut unparsed = Vec::new();

        // SERVER_PORT wins over the PaaS-style PORT.
        let server_port = typed(&lookup, &mut unparsed, "SERVER_PORT")
            .or_else(|| typed(&lookup, &mut unparsed, "PORT"));
        let database_max_connections =
            typed(&lookup, &mut unparsed, "DATABASE_MAX_CONNECTIONS");
        let database_min_connections =
            typed(&lookup, &mut unparsed, "DATABASE_MIN_CONNECTIONS");
        let database_acquire_timeout_secs =
            typed(&lookup, &mut unparsed, "DATABASE_ACQUIRE_TIMEOUT_SECS");

        Self {
            config_path: non_empty(lookup("ANISHELF_CONFIG")).map(PathBuf::from),
            server_host: non_empty(lookup("SERVER_HOST")),
            server_port,
            database_url: non_empty(lookup("DATABASE_URL")),
            database_url_file: non_empty(lookup("DATABASE_URL_FILE"))
                .map(PathBuf::from),
            database_max_connections,
            database_min_connections,
            database_acquire_timeout_secs,
            unparsed,
        }
    }
}

fn typed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    unparsed: &mut Vec<UnparsedVar>,
    name: &'static str,
) -> Option<T> {
    match parse_value(lookup(name)) {
        Parsed::Invalid(raw) => {
            unparsed.push(UnparsedVar { name, raw });
            None
        }
        parsed => parsed.value(),
    }
}
