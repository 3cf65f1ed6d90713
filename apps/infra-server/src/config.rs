//! Layered server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the optional YAML
//! file, `APP__*` environment variables (`__` separates nesting levels), CLI
//! flags.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use infra_registry::DatabaseConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `infra_registry=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Zero leaves `Access-Control-Max-Age` unset.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let any = || vec!["*".to_owned()];
        Self {
            enabled: true,
            allowed_origins: any(),
            allowed_methods: any(),
            allowed_headers: any(),
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub mock: bool,
}

impl AppConfig {
    /// Merge defaults, the YAML file (when given) and the environment.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or holds unknown keys.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load configuration")
    }

    /// # Errors
    /// Returns an error if `--port` is given and `server.bind_addr` is not a
    /// socket address.
    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) -> Result<()> {
        if let Some(port) = cli.port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        if cli.mock {
            self.database = DatabaseConfig::in_memory();
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if `server.bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.server.bind_addr))
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}
