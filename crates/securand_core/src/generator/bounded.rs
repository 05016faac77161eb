//! Bounded random generator.
//!
//! Integers are sampled by rejection over the minimal number of random bytes
//! covering the range; fractionals by scaling a 64-bit unit draw and rounding.
//! Candidates that hit an excluded endpoint (or, for fractionals, a whole
//! number) are redrawn within a fixed retry budget.

use tracing::{debug, trace, warn};

use super::request::{GenerationRequest, Number, NumberKind};
use crate::bounds::{approx_eq, is_whole, Exclusion, IntegerBounds, NormalizedBounds};
use crate::config::{GeneratorConfig, MAX_REJECTIONS};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{Constraint, RandomError, Result};

/// 2^64 as a float; divides a `u64` draw into `[0, 1)`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Uniform bounded number generator over a secure entropy source.
///
/// Holds no state between calls apart from its entropy handle and
/// configuration; every retry counter is local to one `generate` call.
///
/// # Examples
///
/// ```rust
/// use securand_core::{BoundedGenerator, Exclusion, GenerationRequest, Number};
///
/// let mut generator = BoundedGenerator::from_os().unwrap();
///
/// let request = GenerationRequest::integer(1.0, 10.0).with_exclusion(Exclusion::Both);
/// match generator.generate(&request).unwrap() {
///     Number::Integer(v) => assert!((2..=9).contains(&v)),
///     Number::Fractional(_) => unreachable!(),
/// }
///
/// let value = generator
///     .generate(&GenerationRequest::fractional(1.0, 2.0, 2))
///     .unwrap()
///     .as_f64();
/// assert!(value > 1.0 && value < 2.0);
/// ```
#[derive(Debug)]
pub struct BoundedGenerator<E: EntropySource = OsEntropy> {
    entropy: E,
    config: GeneratorConfig,
}

impl BoundedGenerator<OsEntropy> {
    /// Generator over OS entropy with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Configuration` if OS entropy is unavailable.
    pub fn from_os() -> Result<Self> {
        Ok(Self::new(OsEntropy::new()?))
    }
}

impl<E: EntropySource> BoundedGenerator<E> {
    /// Generator with the default configuration.
    pub fn new(entropy: E) -> Self {
        Self::with_config(entropy, GeneratorConfig::default())
    }

    /// Generator with an explicit retry budget.
    pub fn with_config(entropy: E, config: GeneratorConfig) -> Self {
        Self { entropy, config }
    }

    /// Returns the generator configuration.
    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the entropy source.
    #[inline]
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Produces one value satisfying every constraint of `request`.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the entropy source is unavailable (checked first)
    /// - `Validation` if the request breaks its invariants
    /// - `Range` if the bounds leave no admissible value
    /// - `Exhaustion` if the retry budget runs out
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<Number> {
        self.entropy.ensure_available()?;
        request.validate()?;

        let bounds = request.bounds();
        debug!(
            min = bounds.min,
            max = bounds.max,
            kind = %request.kind(),
            exclusion = %request.exclusion(),
            "generating bounded value"
        );

        if bounds.is_degenerate() {
            return degenerate(request, bounds);
        }

        match request.kind() {
            NumberKind::Integer => {
                let narrowed = bounds.to_integer(request.exclusion())?;
                self.generate_integer(narrowed, request.exclusion())
            }
            NumberKind::Fractional => {
                self.generate_fractional(bounds, request.exclusion(), request.fraction_digits())
            }
        }
    }

    /// Uniform index in `[lower, upper]`, drawn through [`Self::generate`].
    pub(crate) fn generate_index(&mut self, lower: usize, upper: usize) -> Result<usize> {
        let request = GenerationRequest::integer(lower as f64, upper as f64);
        match self.generate(&request)? {
            Number::Integer(index) => usize::try_from(index).map_err(|_| {
                RandomError::range(format!("index {} does not fit the sequence", index))
            }),
            Number::Fractional(value) => Err(RandomError::range(format!(
                "expected an integer index, got {}",
                value
            ))),
        }
    }

    fn generate_integer(&mut self, bounds: IntegerBounds, exclusion: Exclusion) -> Result<Number> {
        let outcomes = bounds.outcomes();
        let max_attempts = self.config.max_attempts();

        for attempt in 1..=max_attempts {
            let offset = self.draw_below(outcomes)?;
            let value = bounds.effective_min + offset as i64;

            if (exclusion.excludes_lower() && value == bounds.min)
                || (exclusion.excludes_upper() && value == bounds.max)
            {
                trace!(attempt, value, "redraw: excluded endpoint");
                continue;
            }

            return Ok(Number::Integer(value));
        }

        Err(exhausted(max_attempts, vec![Constraint::Exclusion(exclusion)]))
    }

    fn generate_fractional(
        &mut self,
        bounds: NormalizedBounds,
        exclusion: Exclusion,
        fraction_digits: u8,
    ) -> Result<Number> {
        let max_attempts = self.config.max_attempts();
        let mut hit_exclusion = false;
        let mut left_bounds = false;

        for attempt in 1..=max_attempts {
            let unit = self.draw_unit()?;
            let value = round_to_digits(scale(bounds, unit), fraction_digits);

            if value < bounds.min || value > bounds.max {
                trace!(attempt, value, "redraw: rounding left the bounds");
                left_bounds = true;
                continue;
            }
            if (exclusion.excludes_lower() && approx_eq(value, bounds.min))
                || (exclusion.excludes_upper() && approx_eq(value, bounds.max))
            {
                trace!(attempt, value, "redraw: excluded endpoint");
                hit_exclusion = true;
                continue;
            }
            if is_whole(value) {
                trace!(attempt, value, "redraw: whole number");
                continue;
            }

            return Ok(Number::Fractional(value));
        }

        // The non-integer requirement always applies to fractionals; the
        // others are named only when they actually rejected a candidate.
        let mut unmet = Vec::with_capacity(3);
        if hit_exclusion && exclusion != Exclusion::None {
            unmet.push(Constraint::Exclusion(exclusion));
        }
        unmet.push(Constraint::NonInteger);
        if left_bounds {
            unmet.push(Constraint::RoundedWithinBounds);
        }
        Err(exhausted(max_attempts, unmet))
    }

    /// Uniform integer in `[0, outcomes)` by rejection sampling.
    fn draw_below(&mut self, outcomes: u64) -> Result<u64> {
        let width = byte_width(outcomes);
        let space = 1u128 << (8 * width);
        let limit = (space / outcomes as u128) * outcomes as u128;

        let mut buf = [0u8; 8];
        for _ in 0..MAX_REJECTIONS {
            self.entropy.fill(&mut buf[8 - width..])?;
            let draw = u64::from_be_bytes(buf);

            if (draw as u128) < limit {
                return Ok(draw % outcomes);
            }
            trace!(draw, "redraw: biased byte draw rejected");
        }

        Err(exhausted(MAX_REJECTIONS, vec![Constraint::UnbiasedDraw]))
    }

    /// Uniform float in `[0, 1)` from eight random bytes.
    fn draw_unit(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        for _ in 0..MAX_REJECTIONS {
            self.entropy.fill(&mut buf)?;
            let unit = u64::from_be_bytes(buf) as f64 / TWO_POW_64;

            // Draws near 2^64 round up to exactly 1.0 in f64.
            if unit < 1.0 {
                return Ok(unit);
            }
        }

        Err(exhausted(MAX_REJECTIONS, vec![Constraint::UnbiasedDraw]))
    }
}

fn degenerate(request: &GenerationRequest, bounds: NormalizedBounds) -> Result<Number> {
    match request.kind() {
        NumberKind::Integer => Ok(Number::Integer(bounds.min as i64)),
        NumberKind::Fractional if request.exclusion() == Exclusion::Both => {
            Err(RandomError::range(format!(
                "single-point range [{}, {}] cannot exclude both bounds",
                bounds.min, bounds.max
            )))
        }
        NumberKind::Fractional => Ok(Number::Fractional(bounds.min)),
    }
}

fn exhausted(attempts: u32, unmet: Vec<Constraint>) -> RandomError {
    let err = RandomError::Exhaustion { attempts, unmet };
    warn!(attempts, "{}", err);
    err
}

/// Minimal `w` such that `256^w >= outcomes`.
pub(crate) fn byte_width(outcomes: u64) -> usize {
    let mut width = 0;
    let mut space: u128 = 1;
    while space < outcomes as u128 {
        width += 1;
        space <<= 8;
    }
    width
}

/// `min + unit * (max - min)`, falling back to a lerp when the span overflows.
fn scale(bounds: NormalizedBounds, unit: f64) -> f64 {
    let span = bounds.span();
    if span.is_finite() {
        bounds.min + unit * span
    } else {
        bounds.min * (1.0 - unit) + bounds.max * unit
    }
}

/// Rounds half away from zero to `digits` decimal places.
pub(crate) fn round_to_digits(value: f64, digits: u8) -> f64 {
    let factor = 10f64.powi(i32::from(digits));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
