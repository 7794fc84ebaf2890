//! Configuration for the citation graph
//!
//! Graph sizing, logging and the seed data the demo program builds its
//! graph from. Loaded from TOML with environment overrides.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file looked up by [`Config::load`]
pub const DEFAULT_CONFIG_FILE: &str = "citation-graph.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Graph sizing
    #[serde(default)]
    pub graph: GraphConfig,

    /// Publications to build the demo graph from
    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, compact, full)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Publications to reserve room for up front
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

/// Seed data: a root and the publications built on top of it, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Id of the root publication
    pub root: String,

    /// Publications created after the root
    #[serde(default)]
    pub publications: Vec<SeedPublication>,
}

/// One seeded publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPublication {
    /// Publication id
    pub id: String,

    /// Ids of the works it cites; all must be seeded earlier
    pub cites: Vec<String>,

    /// Optional title
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
        }
    }
}

impl SeedConfig {
    /// The seed used when no configuration provides one
    pub fn example() -> Self {
        let publication = |id: &str, cites: &[&str]| SeedPublication {
            id: id.to_string(),
            cites: cites.iter().map(|c| c.to_string()).collect(),
            title: None,
        };
        let root = "Goto Considered Harmful";
        Self {
            root: root.to_string(),
            publications: vec![
                publication("A", &[root]),
                publication("B", &[root]),
                publication("C", &["A", "B"]),
                publication("D", &["A", "B"]),
                publication("E", &["C"]),
            ],
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }
fn default_initial_capacity() -> usize { 64 }

impl Config {
    /// Load configuration from the default file, if any, and the environment
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        use std::env;

        if let Ok(level) = env::var("CG_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = env::var("CG_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(capacity) = env::var("CG_INITIAL_CAPACITY") {
            self.graph.initial_capacity = capacity.parse()
                .map_err(|e| Error::config(format!("Invalid initial capacity: {}", e)))?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {},
            other => return Err(Error::config(format!("Invalid log level: {}", other))),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "full" => {},
            other => return Err(Error::config(format!("Invalid log format: {}", other))),
        }

        if let Some(seed) = &self.seed {
            seed.validate()?;
        }

        Ok(())
    }
}

impl SeedConfig {
    /// Check that every publication is new and cites only earlier ones
    pub fn validate(&self) -> Result<()> {
        let mut known = BTreeSet::new();
        known.insert(self.root.as_str());

        for publication in &self.publications {
            if publication.cites.is_empty() {
                return Err(Error::config(format!("Seed publication {} cites nothing", publication.id)));
            }
            if let Some(missing) = publication.cites.iter().find(|c| !known.contains(c.as_str())) {
                return Err(Error::config(format!(
                    "Seed publication {} cites unknown publication {}", publication.id, missing
                )));
            }
            if !known.insert(publication.id.as_str()) {
                return Err(Error::config(format!("Seed publication {} is listed twice", publication.id)));
            }
        }

        Ok(())
    }
}

/// Load configuration from file or use defaults
pub fn load_config_or_default(path: Option<&str>) -> Config {
    match path {
        Some(path) => match Config::from_file(path).and_then(|c| c.validate().map(|_| c)) {
            Ok(config) => {
                info!("Loaded configuration from: {}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}. Using defaults.", path, e);
                Config::default()
            }
        },
        None => {
            info!("No config file specified, using defaults");
            Config::default()
        }
    }
}
