//! # Bounded Random Generator
//!
//! Produces a single uniformly distributed number inside caller-supplied
//! bounds, in either of two kinds:
//!
//! - **Integer**: exact uniformity over `[effective_min, effective_max]` via
//!   rejection sampling over the minimal number of secure random bytes
//! - **Fractional**: a 64-bit unit draw scaled into `[min, max]` and rounded
//!   half away from zero to `fraction_digits` decimals; never a whole number
//!
//! Either endpoint may be excluded. Rejected candidates are redrawn inside a
//! bounded loop whose budget comes from [`GeneratorConfig`](crate::config::GeneratorConfig).
//!
//! ## Usage Example
//!
//! ```rust
//! use securand_core::generator::{BoundedGenerator, GenerationRequest};
//!
//! let mut generator = BoundedGenerator::from_os().unwrap();
//! let dice = generator.generate(&GenerationRequest::integer(1.0, 6.0)).unwrap();
//! assert!((1.0..=6.0).contains(&dice.as_f64()));
//! ```

mod bounded;
mod request;

pub use bounded::BoundedGenerator;
pub use request::{GenerationRequest, Number, NumberKind, MAX_FRACTION_DIGITS};
