//! # Application Configuration
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `agrimart.toml` (or the file given with `--config`)
//! 3. `AGRIMART_*` environment variables
//! 4. CLI flags (applied by the command that uses them)
//!
//! ```toml
//! [pricing]
//! price_floor = 0
//! price_ceiling = 1000
//! currency_symbol = "₹"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//! ```

use agrimart_core::{MarketError, QueryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "agrimart.toml";

/// Requests per second when none is configured.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: QueryConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, MarketError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| MarketError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.pricing.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from `agrimart.toml` if it exists.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, MarketError> {
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(MarketError::ConfigError(format!(
                    "Config file '{}' not found",
                    path.display()
                )));
            }
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| MarketError::IoError(format!("Cannot read config metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(MarketError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| MarketError::IoError(format!("Read config: {}", e)))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `AGRIMART_*` environment overrides.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(rate) = env_parse::<u32>("AGRIMART_RATE_LIMIT") {
            self.server.rate_limit = rate;
        }
        if let Some(port) = env_parse::<u16>("AGRIMART_PORT") {
            self.server.port = port;
        }
        if let Some(host) = std::env::var("AGRIMART_HOST")
            .ok()
            .filter(|h| !h.is_empty())
        {
            self.server.host = host;
        }
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_tables_fill_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [pricing]
            price_ceiling = 500

            [server]
            port = 9000
            "#,
        )
        .expect("parse");
        assert_eq!(config.pricing.price_ceiling, 500);
        assert_eq!(config.pricing.price_floor, 0);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.rate_limit, DEFAULT_RATE_LIMIT);
    }

    #[test]
    fn inverted_price_bounds_rejected() {
        let result = AppConfig::from_toml_str("[pricing]\nprice_floor = 900\nprice_ceiling = 100\n");
        assert!(matches!(result, Err(MarketError::ConfigError(_))));
    }

    #[test]
    fn demo_config_parses() {
        let config = AppConfig::from_toml_str(include_str!("../../../demos/agrimart.toml"))
            .expect("demo config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/agrimart.toml")));
        assert!(matches!(result, Err(MarketError::ConfigError(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("agrimart.toml");
        std::fs::write(&path, "[server]\nrate_limit = 0\n").expect("write");

        let config = AppConfig::load(Some(path.as_path())).expect("load");
        assert_eq!(config.server.rate_limit, 0);
    }

    #[test]
    fn malformed_toml_rejected() {
        assert!(AppConfig::from_toml_str("[pricing\n").is_err());
    }
}
