//! CLI configuration management
//!
//! Settings come from a TOML file, `SECURAND_*` environment variables and
//! command-line flags. Later sources override earlier ones.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use securand_core::config::MAX_ATTEMPTS_LIMIT;
use securand_core::GeneratorConfig;

/// Config file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "securand.toml";

pub const ENV_LOG_LEVEL: &str = "SECURAND_LOG_LEVEL";
pub const ENV_MAX_ATTEMPTS: &str = "SECURAND_MAX_ATTEMPTS";
pub const ENV_FORMAT: &str = "SECURAND_FORMAT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: plain, json")]
    InvalidFormat(String),

    #[error("Invalid max_attempts: {0}. Must be an integer in [1, {limit}]", limit = MAX_ATTEMPTS_LIMIT)]
    InvalidMaxAttempts(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Plain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Retry budget handed to the generator.
    pub max_attempts: u32,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            max_attempts: GeneratorConfig::default().max_attempts(),
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from `lookup`, which maps variable names to values.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level.parse()?;
        }
        if let Some(attempts) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = parse_max_attempts(&attempts)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse()?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = level.parse()?;
        }
        if let Some(attempts) = cli.max_attempts {
            self.max_attempts = attempts;
        }
        if let Some(format) = &cli.format {
            self.format = format.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator_config().map(|_| ())
    }

    /// Generator configuration carrying this retry budget.
    pub fn generator_config(&self) -> Result<GeneratorConfig, ConfigError> {
        GeneratorConfig::builder()
            .max_attempts(self.max_attempts)
            .build()
            .map_err(|_| ConfigError::InvalidMaxAttempts(self.max_attempts.to_string()))
    }
}

fn parse_max_attempts(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidMaxAttempts(raw.to_string()))
}

/// Configuration-related command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub max_attempts: Option<u32>,
    pub format: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `securand.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config.apply_vars(lookup)?;
    config.merge_with_cli(cli)?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_attempts, 100);
        assert_eq!(config.format, OutputFormat::Plain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Plain);
        assert!(matches!(
            OutputFormat::from_str("table"),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("max_attempts = 500").unwrap();
        assert_eq!(config.max_attempts, 500);
        assert_eq!(config.log_level, LogLevel::Warn);

        assert!(toml::from_str::<CliConfig>("format = \"yaml\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let file = write_config("log_level = \"debug\"\nformat = \"json\"\n");
        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);

        let file = write_config("max_attempts = 0\n");
        assert!(matches!(
            CliConfig::from_file(file.path()),
            Err(ConfigError::InvalidMaxAttempts(_))
        ));

        let missing = Path::new("/nonexistent/securand.toml");
        assert!(matches!(
            CliConfig::from_file(missing),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidMaxAttempts("0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid max_attempts: 0. Must be an integer in [1, 10000]"
        );

        let err = ConfigError::InvalidFormat("xml".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid output format: xml. Must be one of: plain, json"
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_vars(vars(&[(ENV_MAX_ATTEMPTS, " 250 "), (ENV_FORMAT, "json")]))
            .unwrap();
        assert_eq!(config.max_attempts, 250);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Warn);

        let err = config
            .apply_vars(vars(&[(ENV_MAX_ATTEMPTS, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxAttempts(_)));
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        let file = write_config("log_level = \"error\"\nmax_attempts = 10\nformat = \"json\"\n");
        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            log_level: Some("trace".to_string()),
            ..CliArgs::default()
        };
        let env = vars(&[(ENV_LOG_LEVEL, "info"), (ENV_MAX_ATTEMPTS, "20")]);

        let config = build_config_with(&cli, env).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_build_config_rejects_out_of_range_budget() {
        let file = write_config("");
        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            max_attempts: Some(MAX_ATTEMPTS_LIMIT + 1),
            ..CliArgs::default()
        };
        assert!(matches!(
            build_config_with(&cli, vars(&[])),
            Err(ConfigError::InvalidMaxAttempts(_))
        ));
    }

    #[test]
    fn test_generator_config() {
        let config = CliConfig {
            max_attempts: 42,
            ..CliConfig::default()
        };
        assert_eq!(config.generator_config().unwrap().max_attempts(), 42);
    }
}
