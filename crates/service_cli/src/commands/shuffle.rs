//! Shuffle command implementation

use tracing::info;

use securand_core::{BoundedGenerator, EntropySource, OsEntropy, RangedShuffler, ShuffleRequest};

use super::render;
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Arguments of `securand shuffle`.
#[derive(Debug, Clone, Default)]
pub struct ShuffleArgs {
    pub items: Vec<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub avoid_identical: bool,
}

impl ShuffleArgs {
    pub fn request(&self) -> ShuffleRequest {
        let mut request = ShuffleRequest::new().avoid_identical(self.avoid_identical);
        if let Some(start) = self.start {
            request = request.range_start(start);
        }
        if let Some(end) = self.end {
            request = request.range_end(end);
        }
        request
    }
}

/// Run the shuffle command
pub fn run(args: &ShuffleArgs, config: &CliConfig) -> Result<()> {
    info!(items = args.items.len(), "Shuffling");

    let generator = BoundedGenerator::with_config(OsEntropy::new()?, config.generator_config()?);
    let mut shuffler = RangedShuffler::new(generator);
    let shuffled = shuffle(&mut shuffler, args)?;

    let output = match config.format {
        OutputFormat::Plain => shuffled.join(" "),
        format => render(format, &shuffled, &shuffled)?,
    };
    println!("{}", output);
    Ok(())
}

/// Shuffles a copy of the arguments' items.
pub fn shuffle<E: EntropySource>(
    shuffler: &mut RangedShuffler<E>,
    args: &ShuffleArgs,
) -> Result<Vec<String>> {
    Ok(shuffler.shuffled(&args.items, &args.request())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use securand_core::RandomError;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_window_from_args() {
        let args = ShuffleArgs {
            items: items(&["a", "b", "c", "d", "e"]),
            start: Some(1),
            end: Some(4),
            avoid_identical: true,
        };
        let request = args.request();
        assert!(request.avoids_identical());
        let window = request.window(5).unwrap();
        assert_eq!((window.start, window.end), (1, 4));

        let mut shuffler = RangedShuffler::from_os().unwrap();
        for _ in 0..100 {
            let result = shuffle(&mut shuffler, &args).unwrap();
            assert_eq!(result[0], "a");
            assert_eq!(result[4], "e");
            assert_ne!(result, args.items);
        }
    }

    #[test]
    fn test_out_of_bounds_window() {
        let args = ShuffleArgs {
            items: items(&["a", "b"]),
            end: Some(3),
            ..ShuffleArgs::default()
        };
        let mut shuffler = RangedShuffler::from_os().unwrap();
        let err = shuffle(&mut shuffler, &args).unwrap_err();
        assert!(matches!(err, CliError::Random(RandomError::Validation(_))));
    }
}
