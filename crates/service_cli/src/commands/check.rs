//! Check command implementation
//!
//! Checks the OS entropy source and reports the effective configuration.

use serde::Serialize;
use tracing::{info, warn};

use securand_core::OsEntropy;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Snapshot printed by `securand check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub version: &'static str,
    pub entropy: &'static str,
    pub max_attempts: u32,
    pub log_level: String,
    pub format: String,
}

impl Status {
    pub fn new(entropy_available: bool, config: &CliConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            entropy: if entropy_available {
                "available"
            } else {
                "unavailable"
            },
            max_attempts: config.max_attempts,
            log_level: config.log_level.to_string(),
            format: config.format.to_string(),
        }
    }

    fn plain_lines(&self) -> Vec<String> {
        vec![
            format!("securand {}", self.version),
            format!("  entropy source: {}", self.entropy),
            format!("  max attempts:   {}", self.max_attempts),
            format!("  log level:      {}", self.log_level),
            format!("  output format:  {}", self.format),
        ]
    }
}

/// Run the check command
///
/// The status is printed either way; an unavailable source is then returned
/// as an error so the exit code reflects it.
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking entropy source");

    let availability = OsEntropy::availability();
    if let Err(e) = &availability {
        warn!(error = %e, "entropy check failed");
    }

    let status = Status::new(availability.is_ok(), config);
    let output = match config.format {
        OutputFormat::Json => serde_json::to_string(&status)?,
        OutputFormat::Plain => status.plain_lines().join("\n"),
    };
    println!("{}", output);

    availability.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_status_reflects_config() {
        let config = CliConfig {
            max_attempts: 250,
            log_level: LogLevel::Debug,
            format: OutputFormat::Json,
        };
        let status = Status::new(true, &config);
        assert_eq!(status.entropy, "available");
        assert_eq!(status.max_attempts, 250);
        assert_eq!(status.log_level, "debug");

        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["format"], "json");
    }

    #[test]
    fn test_plain_lines() {
        let status = Status::new(false, &CliConfig::default());
        let lines = status.plain_lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with("unavailable"));
    }

    #[test]
    fn test_os_entropy_check_succeeds() {
        assert!(OsEntropy::availability().is_ok());
    }
}
