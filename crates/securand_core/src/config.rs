//! Generator configuration.
//!
//! This module provides the configuration type and builder controlling the
//! retry budget of the bounded generator.

use crate::error::{RandomError, Result};

/// Default number of redraws allowed per generation call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Largest retry budget accepted by the builder.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10_000;

/// Cap on uniformity rejections within a single draw.
///
/// A byte draw is rejected with probability below one half, so reaching this
/// cap means the entropy source is broken rather than unlucky.
pub const MAX_REJECTIONS: u32 = 1024;

/// Bounded generator configuration.
///
/// Immutable; use [`GeneratorConfigBuilder`] to construct non-default values.
///
/// # Examples
///
/// ```rust
/// use securand_core::config::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .max_attempts(250)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.max_attempts(), 250);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    max_attempts: u32,
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Returns the retry budget shared by exclusion and whole-number redraws.
    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` if `max_attempts` is 0 or greater
    /// than [`MAX_ATTEMPTS_LIMIT`].
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(RandomError::validation(format!(
                "max_attempts {} must be in range [1, {}]",
                self.max_attempts, MAX_ATTEMPTS_LIMIT
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfigBuilder {
    max_attempts: Option<u32>,
}

impl GeneratorConfigBuilder {
    /// Sets the retry budget.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Number of redraws in [1, 10_000]
    #[inline]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` if the retry budget is out of range.
    pub fn build(self) -> Result<GeneratorConfig> {
        let config = GeneratorConfig {
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        };
        config.validate()?;
        Ok(config)
    }
}
