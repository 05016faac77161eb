//! JSON request command implementation
//!
//! Reads a raw request such as
//!
//! ```json
//! {"operation": "number", "lower_bound": 1, "upper_bound": 6}
//! {"operation": "shuffle", "items": ["a", "b", "c"], "avoid_identical": true}
//! ```
//!
//! from a file or stdin (`-`). Everything except `operation` and `items` goes
//! through the library's shape validator unchanged.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use securand_core::{
    BoundedGenerator, EntropySource, Number, NumberParams, OsEntropy, RangedShuffler,
    ShuffleParams,
};

use super::render;
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Result of one JSON request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", content = "result", rename_all = "lowercase")]
pub enum Outcome {
    Number(Number),
    Shuffle(Vec<Value>),
}

/// Run the json command
pub fn run(source: &str, config: &CliConfig) -> Result<()> {
    info!(source, "Executing JSON request");

    let raw: Value = serde_json::from_str(&read_input(source)?)?;
    let generator = BoundedGenerator::with_config(OsEntropy::new()?, config.generator_config()?);
    let outcome = execute(generator, raw)?;

    let output = match (&outcome, config.format) {
        (_, OutputFormat::Json) => serde_json::to_string(&outcome)?,
        (Outcome::Number(value), format) => render(format, value, [value])?,
        (Outcome::Shuffle(items), format) => render(format, items, items.iter().map(plain))?,
    };
    println!("{}", output);
    Ok(())
}

/// Routes a raw request to the generator or the shuffler.
pub fn execute<E: EntropySource>(mut generator: BoundedGenerator<E>, raw: Value) -> Result<Outcome> {
    let mut fields = match raw {
        Value::Object(fields) => fields,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "request must be a JSON object, got {}",
                other
            )))
        }
    };

    let operation = take_operation(&mut fields)?;
    debug!(operation = %operation, "routing request");

    match operation.as_str() {
        "number" => {
            let params = NumberParams::from_json(&Value::Object(fields))?;
            Ok(Outcome::Number(generator.generate(&params.to_request()?)?))
        }
        "shuffle" => {
            let mut items = take_items(&mut fields)?;
            let params = ShuffleParams::from_json(&Value::Object(fields))?;
            let mut shuffler = RangedShuffler::new(generator);
            let shuffled = shuffler.shuffle(&mut items, &params.to_request()?)?;
            Ok(Outcome::Shuffle(shuffled.into_owned()))
        }
        other => Err(CliError::InvalidArgument(format!(
            "unknown operation '{}'. Supported: number, shuffle",
            other
        ))),
    }
}

fn take_operation(fields: &mut Map<String, Value>) -> Result<String> {
    match fields.remove("operation") {
        Some(Value::String(operation)) => Ok(operation),
        Some(other) => Err(CliError::InvalidArgument(format!(
            "'operation' must be a string, got {}",
            other
        ))),
        None => Err(CliError::InvalidArgument(
            "missing 'operation' field".to_string(),
        )),
    }
}

fn take_items(fields: &mut Map<String, Value>) -> Result<Vec<Value>> {
    match fields.remove("items") {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CliError::InvalidArgument(format!(
            "'items' must be an array, got {}",
            other
        ))),
        None => Err(CliError::InvalidArgument(
            "missing 'items' field".to_string(),
        )),
    }
}

/// Strings print bare in plain output; anything else prints as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if !Path::new(source).exists() {
        return Err(CliError::FileNotFound(source.to_string()));
    }
    Ok(std::fs::read_to_string(source)?)
}
