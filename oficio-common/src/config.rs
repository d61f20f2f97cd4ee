//! Service configuration
//!
//! Resolution priority, highest first: command-line flag (applied by the
//! binary), environment variable, TOML config file, compiled default.
//! An unreadable or malformed config file falls back to defaults with a
//! warning rather than failing startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The original deployment serves both endpoints from one base URL.
const DEFAULT_BACKEND_URL: &str = "https://sistema-gerador-oficio.onrender.com";

/// Resolved configuration for the workflow service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Base URL of the PDF-extraction backend
    pub extraction_url: String,
    /// Base URL of the letter-rendering backend
    pub generation_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5731,
            database_path: default_database_path(),
            extraction_url: DEFAULT_BACKEND_URL.to_string(),
            generation_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from the config file and environment.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        config
    }

    /// Read the config file: `$OFICIO_CONFIG`, else the platform config
    /// directory (`~/.config/oficio/config.toml` on Linux). An explicitly
    /// configured path that cannot be read is warned about; the implicit
    /// platform path is simply skipped when absent.
    fn from_file() -> Option<Self> {
        if let Ok(path) = std::env::var("OFICIO_CONFIG") {
            let path = PathBuf::from(path);
            return match std::fs::read_to_string(&path) {
                Ok(content) => Self::parse(&path, &content),
                Err(e) => {
                    warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                    None
                }
            };
        }

        let path = dirs::config_dir()?.join("oficio").join("config.toml");
        let content = std::fs::read_to_string(&path).ok()?;
        Self::parse(&path, &content)
    }

    fn parse(path: &Path, content: &str) -> Option<Self> {
        match toml::from_str(content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("OFICIO_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("OFICIO_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("OFICIO_PORT is not a valid port number: {}", port),
            }
        }
        if let Ok(path) = std::env::var("OFICIO_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("OFICIO_EXTRACTION_URL") {
            self.extraction_url = url;
        }
        if let Ok(url) = std::env::var("OFICIO_GENERATION_URL") {
            self.generation_url = url;
        }
    }
}

/// Platform data directory default (`~/.local/share/oficio/oficio.db` on
/// Linux), with a relative fallback when the home directory is unknown.
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("oficio"))
        .unwrap_or_else(|| PathBuf::from("./oficio_data"))
        .join("oficio.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "OFICIO_CONFIG",
            "OFICIO_HOST",
            "OFICIO_PORT",
            "OFICIO_DATABASE_PATH",
            "OFICIO_EXTRACTION_URL",
            "OFICIO_GENERATION_URL",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ServiceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5731);
        assert_eq!(config.extraction_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.generation_url, DEFAULT_BACKEND_URL);
        assert!(config
            .database_path
            .to_string_lossy()
            .contains("oficio"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("OFICIO_PORT", "6000");
        std::env::set_var("OFICIO_EXTRACTION_URL", "http://localhost:5000");

        let config = ServiceConfig::load();
        assert_eq!(config.port, 6000);
        assert_eq!(config.extraction_url, "http://localhost:5000");
        // Untouched values keep their defaults
        assert_eq!(config.host, "127.0.0.1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_keeps_default() {
        clear_env();
        std::env::set_var("OFICIO_PORT", "not-a-port");

        let config = ServiceConfig::load();
        assert_eq!(config.port, 5731);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_file_overlay() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "port = 7000\nextraction_url = \"http://extract.local\"\n",
        )
        .unwrap();
        std::env::set_var("OFICIO_CONFIG", &path);

        let config = ServiceConfig::load();
        assert_eq!(config.port, 7000);
        assert_eq!(config.extraction_url, "http://extract.local");
        assert_eq!(config.host, "127.0.0.1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_beats_config_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 7000\n").unwrap();
        std::env::set_var("OFICIO_CONFIG", &path);
        std::env::set_var("OFICIO_PORT", "8000");

        let config = ServiceConfig::load();
        assert_eq!(config.port, 8000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unreadable_explicit_config_falls_back_to_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("OFICIO_CONFIG", dir.path().join("missing.toml"));

        let config = ServiceConfig::load();
        assert_eq!(config, ServiceConfig::default());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_config_file_falls_back_to_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"oops").unwrap();
        std::env::set_var("OFICIO_CONFIG", &path);

        let config = ServiceConfig::load();
        assert_eq!(config.port, 5731);

        clear_env();
    }
}
