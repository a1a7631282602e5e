//! Configuration loading for Anishelf.
//!
//! Values are composed from an optional `.env` file, an optional TOML file and
//! the process environment, in that order of increasing precedence. The
//! server binary applies its CLI overrides on top of the returned [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    Config, ConfigMetadata, DatabaseConfig, ServerConfig,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigWarning, ConfigWarnings};
