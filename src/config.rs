use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    /// Undo steps kept per edit session. `0` disables undo.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

/// Upper bound accepted for `editor.history_capacity`.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

fn default_history_capacity() -> usize {
    tripboard_itinerary::DEFAULT_HISTORY_CAPACITY
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TRIPBOARD__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", "sqlite:tripboard.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIPBOARD")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.database.url.starts_with("sqlite:") {
            return Err("Database url must be a sqlite: url".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.editor.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(format!(
                "Editor history_capacity must be at most {MAX_HISTORY_CAPACITY}"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(url: &str, max_connections: u32) -> Config {
        Config {
            database: DatabaseConfig {
                url: url.to_string(),
                max_connections,
            },
            observability: ObservabilityConfig::default(),
            editor: EditorConfig::default(),
        }
    }

    #[test]
    fn test_validation_zero_connections() {
        assert!(config("sqlite:test.db", 0).validate().is_err());
    }

    #[test]
    fn test_validation_non_sqlite_url() {
        assert!(config("postgres://localhost/trips", 5).validate().is_err());
    }

    #[test]
    fn test_validation_history_capacity_bound() {
        let mut config = config("sqlite:test.db", 5);
        config.editor.history_capacity = usize::MAX;
        assert!(config.validate().is_err());

        config.editor.history_capacity = MAX_HISTORY_CAPACITY;
        assert!(config.validate().is_ok());

        config.editor.history_capacity = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("sqlite:test.db", 5).validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("tripboard.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite:trips.db\"\nmax_connections = 2\n\n[editor]\nhistory_capacity = 10"
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap().to_string())).unwrap();

        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.editor.history_capacity, 10);
        assert_eq!(config.observability.log_level, "info");
    }
}
