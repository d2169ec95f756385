//! Configuration management for the Tria contacts server.
//!
//! Every setting comes from an environment variable with a default, so the
//! server starts with no configuration at all. A `.env` file is read if
//! present; `dotenvy` does not print to stdout, which MCP uses for traffic.

use crate::error::{ConfigError, ConfigResult};
use crate::matching::{SearchOptions, DEFAULT_MAX_SUGGESTIONS};
use std::env;
use std::path::PathBuf;

/// Default directory for the contact and tag files.
pub const DEFAULT_DATA_DIR: &str = "./tria-data";

/// Configuration for the Tria contacts server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON store (default: ./tria-data)
    pub data_dir: PathBuf,

    /// Minimum search score, 0.0 to 1.0 (default: 0.3)
    pub search_threshold: f64,

    /// Maximum number of search results (default: 50)
    pub search_max_results: usize,

    /// Rank name-prefix matches above fuzzy ones (default: true)
    pub prioritize_starts_with: bool,

    /// Maximum number of suggestions (default: 5)
    pub max_suggestions: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `TRIA_DATA_DIR`: Data directory (default: ./tria-data)
    /// - `SEARCH_THRESHOLD`: Minimum score between 0 and 1 (default: 0.3)
    /// - `SEARCH_MAX_RESULTS`: Result cap (default: 50)
    /// - `SEARCH_PRIORITIZE_STARTS_WITH`: true/false (default: true)
    /// - `MAX_SUGGESTIONS`: Suggestion cap (default: 5)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let data_dir = match env::var("TRIA_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "TRIA_DATA_DIR".to_string(),
                    reason: "Cannot be empty".to_string(),
                })
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(DEFAULT_DATA_DIR),
        };
        if data_dir.is_file() {
            return Err(ConfigError::Other(format!(
                "{} is a file, not a data directory",
                data_dir.display()
            )));
        }

        let search_threshold = Self::parse_env_f64("SEARCH_THRESHOLD", 0.3)?;
        if !(0.0..=1.0).contains(&search_threshold) {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_THRESHOLD".to_string(),
                reason: "Must be between 0 and 1".to_string(),
            });
        }

        let search_max_results = Self::parse_env_usize("SEARCH_MAX_RESULTS", 50)?;
        let prioritize_starts_with = Self::parse_env_bool("SEARCH_PRIORITIZE_STARTS_WITH", true)?;
        let max_suggestions = Self::parse_env_usize("MAX_SUGGESTIONS", DEFAULT_MAX_SUGGESTIONS)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            data_dir,
            search_threshold,
            search_max_results,
            prioritize_starts_with,
            max_suggestions,
            log_level,
        })
    }

    /// Search options built from this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            threshold: self.search_threshold,
            max_results: self.search_max_results,
            prioritize_starts_with: self.prioritize_starts_with,
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as f64 with a default value.
    fn parse_env_f64(var_name: &str, default: f64) -> ConfigResult<f64> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    ///
    /// Accepts true/false, 1/0 and yes/no in any case.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let options = SearchOptions::default();
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            search_threshold: options.threshold,
            search_max_results: options.max_results,
            prioritize_starts_with: options.prioritize_starts_with,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            log_level: "error".to_string(),
        }
    }
}
