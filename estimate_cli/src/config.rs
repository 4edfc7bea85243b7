//! Layered CLI configuration.
//!
//! Each value remembers where it came from. Sources are applied in
//! increasing precedence: defaults, `estimator.toml`, `ESTIMATOR_*`
//! environment variables, command-line flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "estimator.toml";

pub const ENV_RATES_FILE: &str = "ESTIMATOR_RATES_FILE";
pub const ENV_OUTPUT_DIR: &str = "ESTIMATOR_OUTPUT_DIR";
pub const ENV_LOG: &str = "ESTIMATOR_LOG";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "env",
            ConfigSource::Cli => "cli",
        };
        write!(f, "{name}")
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has equal or higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    rates_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    write_svg: Option<bool>,
    log_level: Option<String>,
}

/// Overrides taken from command-line flags
#[derive(Debug, Default, Clone)]
pub struct CliConfigOverrides {
    pub rates_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_svg: bool,
    pub log_level: Option<String>,
}

/// Layered configuration for the estimator CLI
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub rates_file: ConfigValue<Option<PathBuf>>,
    pub output_dir: ConfigValue<Option<PathBuf>>,
    pub write_svg: ConfigValue<bool>,
    pub log_level: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            rates_file: ConfigValue::new(None, ConfigSource::Default),
            output_dir: ConfigValue::new(None, ConfigSource::Default),
            write_svg: ConfigValue::new(true, ConfigSource::Default),
            log_level: ConfigValue::new("info".to_string(), ConfigSource::Default),
        }
    }

    /// Resolve every layer: defaults, file, environment, then CLI flags.
    ///
    /// An explicit `config_path` must exist; the implicit `estimator.toml`
    /// is optional.
    pub fn resolve(config_path: Option<&Path>, overrides: CliConfigOverrides) -> Result<Self> {
        let mut config = Self::with_defaults();

        match config_path {
            Some(path) => config = config.load_from_file(path)?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.exists() {
                    config = config.load_from_file(implicit)?;
                }
            }
        }

        let mut config = config.load_from_env();
        config.update_from_cli(overrides);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file_config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(rates_file) = file_config.rates_file {
            self.rates_file.update(Some(rates_file), ConfigSource::File);
        }
        if let Some(output_dir) = file_config.output_dir {
            self.output_dir.update(Some(output_dir), ConfigSource::File);
        }
        if let Some(write_svg) = file_config.write_svg {
            self.write_svg.update(write_svg, ConfigSource::File);
        }
        if let Some(log_level) = file_config.log_level {
            self.log_level.update(log_level, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(self) -> Self {
        self.load_from_vars(|key| env::var(key).ok())
    }

    /// Apply `ESTIMATOR_*` values from an arbitrary lookup
    pub fn load_from_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(rates_file) = non_empty(ENV_RATES_FILE) {
            self.rates_file.update(Some(PathBuf::from(rates_file)), ConfigSource::Environment);
        }
        if let Some(output_dir) = non_empty(ENV_OUTPUT_DIR) {
            self.output_dir.update(Some(PathBuf::from(output_dir)), ConfigSource::Environment);
        }
        if let Some(log_level) = non_empty(ENV_LOG) {
            self.log_level.update(log_level, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(rates_file) = overrides.rates_file {
            self.rates_file.update(Some(rates_file), ConfigSource::Cli);
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(Some(output_dir), ConfigSource::Cli);
        }
        if overrides.no_svg {
            self.write_svg.update(false, ConfigSource::Cli);
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level.update(log_level, ConfigSource::Cli);
        }
    }

    /// Values and their sources, for display
    pub fn describe(&self) -> Vec<(&'static str, String, ConfigSource)> {
        let path_or_none = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        };
        vec![
            ("rates_file", path_or_none(&self.rates_file.value), self.rates_file.source),
            ("output_dir", path_or_none(&self.output_dir.value), self.output_dir.source),
            ("write_svg", self.write_svg.value.to_string(), self.write_svg.source),
            ("log_level", self.log_level.value.clone(), self.log_level.source),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("estimator.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = LayeredConfig::with_defaults();
        assert!(config.rates_file.value.is_none());
        assert!(config.write_svg.value);
        assert_eq!(config.log_level.value, "info");
        assert_eq!(config.log_level.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_layer() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "rates_file = \"rates.toml\"\nwrite_svg = false\nlog_level = \"debug\"\n",
        );
        let config = LayeredConfig::with_defaults().load_from_file(&path).unwrap();
        assert_eq!(config.rates_file.value, Some(PathBuf::from("rates.toml")));
        assert_eq!(config.rates_file.source, ConfigSource::File);
        assert!(!config.write_svg.value);
        assert_eq!(config.log_level.value, "debug");
        assert!(config.output_dir.value.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "rates_file = \"file-rates.toml\"\n");
        let vars = HashMap::from([(ENV_RATES_FILE, "env-rates.json"), (ENV_OUTPUT_DIR, "out")]);
        let config = LayeredConfig::with_defaults()
            .load_from_file(&path)
            .unwrap()
            .load_from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.rates_file.value, Some(PathBuf::from("env-rates.json")));
        assert_eq!(config.rates_file.source, ConfigSource::Environment);
        assert_eq!(config.output_dir.value, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_overrides_everything() {
        let vars = HashMap::from([(ENV_LOG, "warn")]);
        let mut config = LayeredConfig::with_defaults().load_from_vars(|k| vars.get(k).map(|v| v.to_string()));
        config.update_from_cli(CliConfigOverrides {
            rates_file: Some(PathBuf::from("cli.toml")),
            output_dir: None,
            no_svg: true,
            log_level: Some("trace".to_string()),
        });
        assert_eq!(config.log_level.value, "trace");
        assert_eq!(config.log_level.source, ConfigSource::Cli);
        assert_eq!(config.rates_file.source, ConfigSource::Cli);
        assert!(!config.write_svg.value);
        assert_eq!(config.output_dir.source, ConfigSource::Default);
    }

    #[test]
    fn test_lower_precedence_does_not_override() {
        let mut value = ConfigValue::new(1, ConfigSource::Cli);
        value.update(2, ConfigSource::File);
        assert_eq!(value.value, 1);
        value.update(3, ConfigSource::Cli);
        assert_eq!(value.value, 3);
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let vars = HashMap::from([(ENV_OUTPUT_DIR, "  ")]);
        let config = LayeredConfig::with_defaults().load_from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert!(config.output_dir.value.is_none());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(LayeredConfig::resolve(Some(&missing), CliConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "write_svg = \"maybe\"\n");
        assert!(LayeredConfig::with_defaults().load_from_file(&path).is_err());
    }

    #[test]
    fn test_describe_lists_sources() {
        let config = LayeredConfig::with_defaults();
        let rows = config.describe();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].1, "(none)");
        assert_eq!(rows[2].1, "true");
    }
}
