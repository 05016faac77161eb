//! Secure entropy sources.
//!
//! The generator never talks to the operating system directly; it draws bytes
//! through the [`EntropySource`] trait. [`OsEntropy`] is the production source,
//! backed by `rand::rngs::OsRng` (the platform `getrandom` facility).
//!
//! Availability of the OS source is checked once per process. A failed check
//! is reported as `RandomError::Configuration` on every subsequent call and is
//! never retried.

use std::sync::OnceLock;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

use crate::error::{RandomError, Result};

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Checks that the source can serve draws.
    ///
    /// Called before any other check of a generation request.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Fills `buf` entirely with secure random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn ensure_available(&self) -> Result<()> {
        (**self).ensure_available()
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}

static OS_AVAILABILITY: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Operating system entropy.
///
/// Zero-sized and freely copyable; every handle shares the process-wide
/// availability check.
///
/// # Examples
///
/// ```rust
/// use securand_core::entropy::{EntropySource, OsEntropy};
///
/// let mut entropy = OsEntropy::new().expect("OS entropy available");
/// let mut buf = [0u8; 16];
/// entropy.fill(&mut buf).unwrap();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy {
    _private: (),
}

impl OsEntropy {
    /// Returns a handle after confirming the OS source is available.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Configuration` if the availability check failed.
    pub fn new() -> Result<Self> {
        let entropy = Self { _private: () };
        entropy.ensure_available()?;
        Ok(entropy)
    }

    /// Runs (once) and returns the process-wide availability check.
    pub fn availability() -> Result<()> {
        OS_AVAILABILITY
            .get_or_init(|| {
                let mut sample = [0u8; 16];
                OsRng.try_fill_bytes(&mut sample).map_err(|e| {
                    warn!(error = %e, "OS entropy source unavailable");
                    e.to_string()
                })
            })
            .clone()
            .map_err(|e| RandomError::configuration(format!("OS entropy source unavailable: {}", e)))
    }
}

impl EntropySource for OsEntropy {
    fn ensure_available(&self) -> Result<()> {
        Self::availability()
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomError::configuration(format!("OS entropy draw failed: {}", e)))
    }
}

/// Deterministic byte scripts for exercising the sampling loops.
#[cfg(test)]
pub(crate) mod scripted {
    use super::*;

    /// Serves a fixed byte script, optionally repeating it forever.
    pub(crate) struct ScriptedEntropy {
        bytes: Vec<u8>,
        position: usize,
        repeat: bool,
        available: bool,
    }

    impl ScriptedEntropy {
        pub(crate) fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
            Self {
                bytes: bytes.into_iter().collect(),
                position: 0,
                repeat: false,
                available: true,
            }
        }

        /// Script of big-endian `u64` words, one per fractional draw.
        pub(crate) fn words(words: &[u64]) -> Self {
            Self::new(words.iter().flat_map(|w| w.to_be_bytes()))
        }

        pub(crate) fn repeating(bytes: impl IntoIterator<Item = u8>) -> Self {
            Self {
                repeat: true,
                ..Self::new(bytes)
            }
        }

        pub(crate) fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::new(Vec::<u8>::new())
            }
        }

        /// Bytes served so far.
        pub(crate) fn consumed(&self) -> usize {
            self.position
        }
    }

    impl EntropySource for ScriptedEntropy {
        fn ensure_available(&self) -> Result<()> {
            if self.available {
                Ok(())
            } else {
                Err(RandomError::configuration("scripted source disabled"))
            }
        }

        fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
            for byte in buf.iter_mut() {
                let index = if self.repeat && !self.bytes.is_empty() {
                    self.position % self.bytes.len()
                } else {
                    self.position
                };
                *byte = *self
                    .bytes
                    .get(index)
                    .ok_or_else(|| RandomError::configuration("byte script exhausted"))?;
                self.position += 1;
            }
            Ok(())
        }
    }
}
