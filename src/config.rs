/// Service configuration.
///
/// Loaded from a TOML file, with the bearer token overridable from the
/// environment (a `.env` file is honored via `dotenv` in `main`). The rest
/// of the service only reads this - nothing mutates configuration after
/// load.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// CDDIS products directory; overridable per config for mirrors.
pub const DEFAULT_ARCHIVE_BASE: &str = "https://cddis.nasa.gov/archive/gnss/products";

/// Environment variable that overrides `bearer_token` when set.
pub const TOKEN_ENV_VAR: &str = "EARTHDATA_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory downloaded and decompressed files are written to.
    pub output_directory: PathBuf,
    /// NASA Earthdata bearer token for CDDIS.
    #[serde(default)]
    pub bearer_token: String,
    /// Remove the compressed artifact after successful decompression.
    #[serde(default = "default_auto_cleanup")]
    pub auto_cleanup: bool,
    /// Archive base URL, `{archive_base}/{gps_week:04}/{filename}`.
    #[serde(default = "default_archive_base")]
    pub archive_base: String,
}

fn default_auto_cleanup() -> bool {
    true
}

fn default_archive_base() -> String {
    DEFAULT_ARCHIVE_BASE.to_string()
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Read(String),
    /// The config file is not valid TOML for this schema.
    Parse(String),
    /// No bearer token in either the file or the environment.
    MissingToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "cannot read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "cannot parse config: {}", msg),
            ConfigError::MissingToken => write!(
                f,
                "no bearer token configured: set `bearer_token` in the config file or {}",
                TOKEN_ENV_VAR
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Let `EARTHDATA_TOKEN` take precedence over the file's token, so the
    /// credential can stay out of the config file entirely.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                self.bearer_token = token;
            }
        }
    }

    /// The bearer token, or an error if none was configured anywhere.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        if self.bearer_token.is_empty() {
            Err(ConfigError::MissingToken)
        } else {
            Ok(&self.bearer_token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(r#"output_directory = "/tmp/sp3""#).unwrap();
        assert_eq!(config.output_directory, PathBuf::from("/tmp/sp3"));
        assert!(config.auto_cleanup, "auto_cleanup should default to true");
        assert_eq!(config.archive_base, DEFAULT_ARCHIVE_BASE);
        assert!(config.bearer_token.is_empty());
    }

    #[test]
    fn test_full_config_round_trip() {
        let config: Config = toml::from_str(
            r#"
            output_directory = "/data/orbits"
            bearer_token = "abc123"
            auto_cleanup = false
            archive_base = "https://mirror.example.org/gnss/products"
            "#,
        )
        .unwrap();
        assert_eq!(config.bearer_token, "abc123");
        assert!(!config.auto_cleanup);
        assert_eq!(config.archive_base, "https://mirror.example.org/gnss/products");
    }

    #[test]
    fn test_missing_output_directory_is_a_parse_error() {
        let result: Result<Config, _> = toml::from_str(r#"bearer_token = "abc""#);
        assert!(result.is_err(), "output_directory is required");
    }

    #[test]
    fn test_require_token_rejects_empty() {
        let config: Config = toml::from_str(r#"output_directory = "/tmp/sp3""#).unwrap();
        assert!(config.require_token().is_err());
    }
}
