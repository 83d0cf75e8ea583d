//! Command-line arguments

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: mailstep --config <FILE> [--input <FILE>] [--output <FILE>]

  --config <FILE>   JSON step configuration (default: $MAILSTEP_CONFIG)
  --input <FILE>    newline-delimited JSON actions; omit to run a single
                    read from the configuration
  --output <FILE>   where to write NDJSON results (default: stdout)
  -h, --help        show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: PathBuf,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Args {
    /// Parse arguments (without the program name). `Ok(None)` means help
    /// was requested.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        default_config: Option<String>,
    ) -> Result<Option<Self>> {
        let mut config = None;
        let mut input = None;
        let mut output = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--config" => &mut config,
                "--input" => &mut input,
                "--output" => &mut output,
                other => bail!("Unexpected argument: {}\n\n{}", other, USAGE),
            };
            match args.next() {
                Some(value) => *slot = Some(PathBuf::from(value)),
                None => bail!("Missing value for {}\n\n{}", arg, USAGE),
            }
        }

        let Some(config) = config.or_else(|| default_config.map(PathBuf::from)) else {
            bail!("No configuration given\n\n{}", USAGE);
        };

        Ok(Some(Self {
            config,
            input,
            output,
        }))
    }
}
