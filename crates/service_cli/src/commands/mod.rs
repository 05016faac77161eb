//! CLI command implementations
//!
//! Each submodule implements one subcommand. Commands build their output as a
//! string so that rendering can be tested without capturing stdout.

pub mod check;
pub mod json;
pub mod number;
pub mod shuffle;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Renders `value` as compact JSON, or as `plain` lines otherwise.
pub(crate) fn render<T, I>(format: OutputFormat, value: &T, plain: I) -> Result<String>
where
    T: Serialize + ?Sized,
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::Plain => Ok(plain
            .into_iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let values = vec![1, 2, 3];
        assert_eq!(
            render(OutputFormat::Json, &values, &values).unwrap(),
            "[1,2,3]"
        );
        assert_eq!(
            render(OutputFormat::Plain, &values, &values).unwrap(),
            "1\n2\n3"
        );
    }
}
