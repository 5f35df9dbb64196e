//! Configuration loading
//!
//! Every value resolves in priority order: environment variable, then the
//! TOML config file, then a compiled default. The token signing secret is
//! the one value with no compiled default; the process refuses to start
//! without it.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration for the lexiscan service
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind host
    pub host: String,
    /// HTTP bind port
    pub port: u16,
    /// SQLite database file location
    pub database_path: PathBuf,
    /// HMAC secret for bearer token signing (externally supplied, loaded
    /// once at process start)
    pub token_secret: String,
    /// Token lifetime in seconds from issuance
    pub token_ttl_secs: i64,
}

/// On-disk TOML shape; every field is optional so partial files work
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    database_path: Option<PathBuf>,
    token_secret: Option<String>,
    token_ttl_secs: Option<i64>,
}

impl Config {
    /// Load configuration, optionally from an explicit TOML file.
    ///
    /// When no file is given, `~/.config/lexiscan/config.toml` is used if
    /// it exists. An explicitly named file must be readable and parseable.
    pub fn load(config_path: Option<&Path>) -> Result<Config> {
        let file = match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                parse_config_file(path, &content)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let content = std::fs::read_to_string(&path)?;
                    parse_config_file(&path, &content)?
                }
                _ => ConfigFile::default(),
            },
        };

        let host = env_var("LEXISCAN_HOST")
            .or(file.host)
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match env_var("LEXISCAN_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("Invalid LEXISCAN_PORT: {}", e)))?,
            None => file.port.unwrap_or(5780),
        };

        let database_path = env_var("LEXISCAN_DB")
            .map(PathBuf::from)
            .or(file.database_path)
            .unwrap_or_else(|| default_data_dir().join("lexiscan.db"));

        let token_secret = env_var("LEXISCAN_TOKEN_SECRET")
            .or(file.token_secret)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Token signing secret not configured (set LEXISCAN_TOKEN_SECRET or \
                     token_secret in the config file)"
                        .to_string(),
                )
            })?;

        let token_ttl_secs = match env_var("LEXISCAN_TOKEN_TTL_SECS") {
            Some(value) => value
                .parse::<i64>()
                .map_err(|e| Error::Config(format!("Invalid LEXISCAN_TOKEN_TTL_SECS: {}", e)))?,
            None => file.token_ttl_secs.unwrap_or(3600),
        };
        if token_ttl_secs <= 0 {
            return Err(Error::Config("Token TTL must be positive".to_string()));
        }

        Ok(Config {
            host,
            port,
            database_path,
            token_secret,
            token_ttl_secs,
        })
    }
}

fn parse_config_file(path: &Path, content: &str) -> Result<ConfigFile> {
    toml::from_str(content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Default configuration file location (~/.config/lexiscan/config.toml)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lexiscan").join("config.toml"))
}

/// Default data folder for the SQLite database
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lexiscan"))
        .unwrap_or_else(|| PathBuf::from("./lexiscan_data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for name in [
            "LEXISCAN_HOST",
            "LEXISCAN_PORT",
            "LEXISCAN_DB",
            "LEXISCAN_TOKEN_SECRET",
            "LEXISCAN_TOKEN_TTL_SECS",
        ] {
            std::env::remove_var(name);
        }
    }

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    #[serial]
    fn test_full_config_file_loads() {
        clear_env();
        let (_dir, path) = write_config(
            r#"
            host = "0.0.0.0"
            port = 8080
            database_path = "/tmp/lexiscan-test.db"
            token_secret = "s3cret"
            token_ttl_secs = 7200
            "#,
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/lexiscan-test.db"));
        assert_eq!(config.token_secret, "s3cret");
        assert_eq!(config.token_ttl_secs, 7200);
    }

    #[test]
    #[serial]
    fn test_missing_token_secret_rejected() {
        clear_env();
        let (_dir, path) = write_config("port = 8080\n");

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    #[serial]
    fn test_defaults_applied() {
        clear_env();
        let (_dir, path) = write_config("token_secret = \"s3cret\"\n");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5780);
        assert_eq!(config.token_ttl_secs, 3600);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let (_dir, path) = write_config("token_secret = \"from-file\"\nport = 8080\n");

        std::env::set_var("LEXISCAN_TOKEN_SECRET", "from-env");
        std::env::set_var("LEXISCAN_PORT", "9090");
        let config = Config::load(Some(&path)).unwrap();
        clear_env();

        assert_eq!(config.token_secret, "from-env");
        assert_eq!(config.port, 9090);
    }

    #[test]
    #[serial]
    fn test_nonpositive_ttl_rejected() {
        clear_env();
        let (_dir, path) = write_config("token_secret = \"s3cret\"\ntoken_ttl_secs = 0\n");

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
