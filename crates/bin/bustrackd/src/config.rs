//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `bustrack.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;

use bustrack_adapter_supabase::SupabaseConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend selection and local database settings.
    pub database: DatabaseConfig,
    /// Hosted database credentials.
    pub supabase: SupabaseSection,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which storage adapter serves the requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local `SQLite` file, schema managed by embedded migrations.
    #[default]
    Sqlite,
    /// Hosted Supabase project over its REST API.
    Supabase,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "supabase" => Ok(Self::Supabase),
            other => Err(ConfigError::Validation(format!("unknown backend {other:?}"))),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Storage adapter to use.
    pub backend: Backend,
    /// `SQLite` connection URL or file path (ignored for Supabase).
    pub url: String,
}

/// Supabase project settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SupabaseSection {
    /// Project base URL.
    pub url: String,
    /// Service-role key.
    pub service_role_key: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `bustrack.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("bustrack.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("BUSTRACK_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("BUSTRACK_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = lookup("BUSTRACK_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BUSTRACK_BACKEND") {
            self.database.backend = val.parse()?;
        }
        if let Some(val) = lookup("BUSTRACK_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = lookup("SUPABASE_URL") {
            self.supabase.url = val;
        }
        if let Some(val) = lookup("SUPABASE_SERVICE_ROLE_KEY") {
            self.supabase.service_role_key = val;
        }
        if let Some(val) = lookup("BUSTRACK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.database.backend == Backend::Supabase {
            if self.supabase.url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "SUPABASE_URL is required for the supabase backend".to_string(),
                ));
            }
            if self.supabase.service_role_key.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "SUPABASE_SERVICE_ROLE_KEY is required for the supabase backend".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Credentials for the Supabase adapter.
    #[must_use]
    pub fn supabase(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: self.supabase.url.clone(),
            service_role_key: self.supabase.service_role_key.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            url: "sqlite:bustrack.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "bustrackd=info,bustrack=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
