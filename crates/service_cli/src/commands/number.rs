//! Number command implementation
//!
//! Draws one or more bounded values from OS entropy.

use tracing::info;

use securand_core::{
    BoundedGenerator, EntropySource, Exclusion, Number, NumberKind, NumberParams, OsEntropy,
};

use super::render;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments of `securand number`.
#[derive(Debug, Clone)]
pub struct NumberArgs {
    pub lower: f64,
    pub upper: f64,
    pub kind: Option<NumberKind>,
    pub exclude: Option<Exclusion>,
    pub digits: Option<u8>,
    pub count: usize,
}

impl NumberArgs {
    pub fn params(&self) -> NumberParams {
        NumberParams {
            kind: self.kind,
            exclusion: self.exclude,
            fraction_digits: self.digits,
            ..NumberParams::new(self.lower, self.upper)
        }
    }
}

/// Run the number command
pub fn run(args: &NumberArgs, config: &CliConfig) -> Result<()> {
    info!(
        lower = args.lower,
        upper = args.upper,
        count = args.count,
        "Generating bounded numbers"
    );

    let mut generator =
        BoundedGenerator::with_config(OsEntropy::new()?, config.generator_config()?);
    let values = generate(&mut generator, &args.params(), args.count)?;

    let output = if args.count == 1 {
        render(config.format, &values[0], &values)?
    } else {
        render(config.format, &values, &values)?
    };
    println!("{}", output);
    Ok(())
}

/// Draws `count` values for `params`, stopping at the first error.
pub fn generate<E: EntropySource>(
    generator: &mut BoundedGenerator<E>,
    params: &NumberParams,
    count: usize,
) -> Result<Vec<Number>> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "count must be at least 1".to_string(),
        ));
    }

    let request = params.to_request()?;
    (0..count)
        .map(|_| generator.generate(&request).map_err(CliError::from))
        .collect()
}
