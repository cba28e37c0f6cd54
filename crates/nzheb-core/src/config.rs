//! Configuration loading and typed config structures for the live feed.
//!
//! The canonical configuration lives in `nzheb-config.yaml` at the project
//! root. Every section is optional; a missing file or an empty document
//! yields the demo defaults (1.5 s cadence, 40-event log, 12 seeded events,
//! built-in catalog).

use std::path::{Path, PathBuf};
use std::time::Duration;

use nzheb_types::EventTemplate;
use serde::Deserialize;

use crate::catalog::{CatalogError, TemplateCatalog};

/// Environment variable that overrides `audit.path` and enables auditing.
pub const AUDIT_LOG_ENV: &str = "NZHEB_AUDIT_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
///
/// Mirrors the structure of `nzheb-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Live feed cadence and sizing.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Custom event templates. Empty means the built-in catalog.
    #[serde(default)]
    pub catalog: Vec<EventTemplate>,

    /// Bus audit trail output.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Run bounds for the engine binary.
    #[serde(default)]
    pub run: RunBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `NZHEB_AUDIT_LOG`, when set, overrides `audit.path` and turns the
    /// audit trail on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.audit.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot drive a feed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero tick interval or a zero
    /// log capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "feed.tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if self.feed.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                reason: "feed.log_capacity must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Build the template catalog: the configured one, or the built-in one
    /// when none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a configured template is malformed.
    pub fn template_catalog(&self) -> Result<TemplateCatalog, CatalogError> {
        if self.catalog.is_empty() {
            Ok(TemplateCatalog::builtin())
        } else {
            TemplateCatalog::new(self.catalog.clone())
        }
    }
}

/// Live feed cadence and sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// Milliseconds between synthesized events.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of events kept in the log.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Events placed in the log when the feed is mounted.
    #[serde(default = "default_seed_events")]
    pub seed_events: usize,

    /// Seed for template selection. `None` draws from OS entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl FeedConfig {
    /// The tick interval as a [`Duration`].
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            log_capacity: default_log_capacity(),
            seed_events: default_seed_events(),
            rng_seed: None,
        }
    }
}

/// Bus audit trail output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditConfig {
    /// Whether every synthesized event is written to the audit trail.
    #[serde(default)]
    pub enabled: bool,

    /// JSON-lines file the trail is appended to.
    #[serde(default = "default_audit_path")]
    pub path: PathBuf,
}

impl AuditConfig {
    /// Override the audit path from `NZHEB_AUDIT_LOG` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_path_override(std::env::var(AUDIT_LOG_ENV).ok().as_deref());
    }

    /// A non-blank `path` replaces the configured one and enables the trail.
    fn apply_path_override(&mut self, path: Option<&str>) {
        if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
            self.path = PathBuf::from(path);
            self.enabled = true;
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_audit_path(),
        }
    }
}

/// Run bounds for the engine binary. Zero means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunBoundsConfig {
    /// Stop after this many synthesized events.
    #[serde(default)]
    pub max_ticks: u64,

    /// Stop after this many wall-clock seconds.
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_tick_interval_ms() -> u64 {
    1500
}

const fn default_log_capacity() -> usize {
    40
}

const fn default_seed_events() -> usize {
    12
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("logs/audit_log.jsonl")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_demo() {
        let config = DashboardConfig::default();
        assert_eq!(config.feed.tick_interval_ms, 1500);
        assert_eq!(config.feed.log_capacity, 40);
        assert_eq!(config.feed.seed_events, 12);
        assert!(config.feed.rng_seed.is_none());
        assert!(config.catalog.is_empty());
        assert_eq!(config.run, RunBoundsConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
feed:
  tick_interval_ms: 250
  log_capacity: 10
  seed_events: 3
  rng_seed: 99

catalog:
  - type: "LabResultReady"
    producer: "LIS"
    detail: "HbA1c ready"
    consumers: ["GP PMS", "Targets"]
    benefits: ["individuals", "government"]
    severity: "good"

run:
  max_ticks: 20
  max_real_time_seconds: 60

logging:
  level: "debug"
  json: true
"#;

        let config = DashboardConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.feed.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.feed.log_capacity, 10);
        assert_eq!(config.feed.rng_seed, Some(99));
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.run.max_ticks, 20);
        assert!(config.logging.json);

        let catalog = config.template_catalog();
        assert!(catalog.is_ok());
        assert_eq!(catalog.map(|c| c.len()).ok(), Some(1));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = DashboardConfig::parse("feed:\n  seed_events: 0\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.feed.seed_events, 0);
        assert_eq!(config.feed.tick_interval_ms, 1500);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(DashboardConfig::parse("").is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = DashboardConfig::parse("feed:\n  tick_interval_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let result = DashboardConfig::parse("feed:\n  log_capacity: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = DashboardConfig::parse("feed: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn empty_catalog_falls_back_to_builtin() {
        let catalog = DashboardConfig::default().template_catalog();
        assert_eq!(catalog.map(|c| c.len()).ok(), Some(8));
    }

    #[test]
    fn audit_path_override_enables_the_trail() {
        let mut audit = AuditConfig::default();
        audit.apply_path_override(Some("/var/log/nzheb/audit.jsonl"));
        assert!(audit.enabled);
        assert_eq!(audit.path, PathBuf::from("/var/log/nzheb/audit.jsonl"));
    }

    #[test]
    fn blank_or_missing_audit_override_is_ignored() {
        let mut audit = AuditConfig::default();
        audit.apply_path_override(Some("   "));
        assert_eq!(audit, AuditConfig::default());
        audit.apply_path_override(None);
        assert_eq!(audit, AuditConfig::default());
    }

    #[test]
    fn env_override_is_a_no_op_when_unset() {
        if std::env::var_os(AUDIT_LOG_ENV).is_none() {
            let mut audit = AuditConfig::default();
            audit.apply_env_overrides();
            assert_eq!(audit, AuditConfig::default());
        }
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("nzheb-config.yaml");
        if path.exists() {
            let config = DashboardConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
