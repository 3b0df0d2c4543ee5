//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line flags (each flag can also come from a `COURSEDB_*` environment
//! variable).

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use coursedb::id::{IdPolicy, IdProtection};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "coursedb.toml";

/// Where the course document is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// A JSON file on disk (`data_file`).
    #[default]
    Json,
    /// Process memory; contents are lost on exit.
    Memory,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Path of the JSON document when `backend = "json"`
    pub data_file: PathBuf,
    pub backend: BackendKind,
    /// Pretty-print the stored JSON
    pub pretty: bool,
    /// Create `{"Cursos":[]}` at startup if `data_file` does not exist
    pub create_if_missing: bool,
    pub id_policy: IdPolicy,
    pub id_protection: IdProtection,
    /// Default tracing filter, used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_file: PathBuf::from("db.json"),
            backend: BackendKind::Json,
            pretty: false,
            create_if_missing: true,
            id_policy: IdPolicy::default(),
            id_protection: IdProtection::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Command-line interface of `coursedb-server`.
#[derive(Debug, Default, Parser)]
#[command(name = "coursedb-server", version, about = "Serve the course collection over HTTP")]
pub struct Cli {
    /// TOML config file (defaults to ./coursedb.toml when present)
    #[arg(long, env = "COURSEDB_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "COURSEDB_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "COURSEDB_PORT")]
    pub port: Option<u16>,

    /// JSON document holding the courses
    #[arg(long, env = "COURSEDB_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[arg(long, env = "COURSEDB_BACKEND", value_enum)]
    pub backend: Option<BackendKind>,
}

impl ServerConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Builds the effective configuration for `cli`.
    ///
    /// Returns the config together with the file it was read from, if any. An
    /// explicitly named config file must exist; the default one is optional.
    pub fn load(cli: &Cli) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let source = match &cli.config {
            Some(path) => Some(path.clone()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(cli);

        Ok((config, source))
    }

    /// Applies flags that were given on the command line or through the environment.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(data_file) = &cli.data_file {
            self.data_file = data_file.clone();
        }
        if let Some(backend) = cli.backend {
            self.backend = backend;
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
