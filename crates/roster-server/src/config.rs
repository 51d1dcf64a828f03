//! Configuration loading for the Roster server.
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults (`0.0.0.0:5000`)
//! 2. An optional config file: `roster.toml` / `roster.yaml` in the working
//!    directory, or the path named by `ROSTER_CONFIG`
//! 3. Environment variables prefixed `ROSTER_`, with `__` between nested
//!    keys (e.g. `ROSTER_SERVER__PORT=8080`)

use ::config::{Config, Environment, File, FileFormat};
use roster_api::ServerConfig;
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "ROSTER_CONFIG";

/// Config file base name looked up when `ROSTER_CONFIG` is unset.
const DEFAULT_CONFIG_NAME: &str = "roster";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ROSTER";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or the merged values did not match
    /// the expected shape.
    #[error("failed to load configuration: {source}")]
    Load {
        /// The underlying `config` crate error.
        #[from]
        source: ::config::ConfigError,
    },
}

/// Top-level Roster configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    ServerConfig::default().host
}

fn default_port() -> u16 {
    ServerConfig::default().port
}

impl RosterConfig {
    /// Load configuration from the optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file exists but cannot be
    /// parsed, or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_owned());

        let config = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(env_source())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text, then apply `env` on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the text is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml(text: &str, env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// The listener settings in the form the API crate expects.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

/// The environment source: `ROSTER_SERVER__PORT` maps to `server.port`.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
