//! # securand_core: Secure Bounded Numbers and Ranged Shuffles
//!
//! Two primitives over a cryptographically secure entropy source:
//!
//! - **Bounded generation** (`generator`): one uniformly distributed integer
//!   or fractional value inside arbitrary bounds, optionally excluding either
//!   endpoint. Integers are exactly uniform (rejection sampling, no modulo
//!   bias); fractionals are rounded to a fixed number of digits and are never
//!   whole numbers.
//! - **Ranged shuffling** (`shuffle`): Fisher–Yates over a sub-range of a
//!   sequence, in place or into a copy, optionally guaranteeing that the
//!   result differs from the input.
//!
//! ## Layering
//!
//! - `entropy`: the [`EntropySource`] seam and the OS-backed [`OsEntropy`]
//! - `bounds`: bound reordering and exclusion narrowing
//! - `generator` → `shuffle`: the shuffler draws every swap index through the
//!   generator
//! - `validation` → `params` → `api`: raw input is shape-checked before
//!   defaults are applied
//!
//! There is no seeded mode: production draws always come from the operating
//! system.
//!
//! ## Usage Examples
//!
//! ```rust
//! use securand_core::{BoundedGenerator, GenerationRequest, RangedShuffler, ShuffleRequest};
//!
//! let mut generator = BoundedGenerator::from_os().unwrap();
//! let roll = generator.generate(&GenerationRequest::integer(1.0, 6.0)).unwrap();
//! assert!((1.0..=6.0).contains(&roll.as_f64()));
//!
//! let mut shuffler = RangedShuffler::new(generator);
//! let mut deck: Vec<u8> = (0..52).collect();
//! shuffler
//!     .shuffle_in_place(&mut deck, &ShuffleRequest::new().avoid_identical(true))
//!     .unwrap();
//! assert_ne!(deck, (0..52).collect::<Vec<u8>>());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod bounds;
pub mod config;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod params;
pub mod shuffle;
pub mod validation;

pub use api::{generate_number, shuffle_sequence};
pub use bounds::Exclusion;
pub use config::GeneratorConfig;
pub use entropy::{EntropySource, OsEntropy};
pub use error::{Constraint, RandomError, Result};
pub use generator::{BoundedGenerator, GenerationRequest, Number, NumberKind};
pub use params::{NumberParams, ShuffleParams};
pub use shuffle::{RangedShuffler, ShuffleRequest};
