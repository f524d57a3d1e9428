//! Config command implementation.

use anyhow::{Context, Result};
use twc_core::GeneratorConfig;
use twc_core::cli::{ExitCode, OutputFormat};

/// Prints the effective configuration.
///
/// TOML is printed for the text and pretty formats so the output can be
/// saved as a configuration file; JSON is printed for `--format json`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run(config: &GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    println!("{}", render(config, output_format)?);
    Ok(ExitCode::SUCCESS)
}

fn render(config: &GeneratorConfig, output_format: OutputFormat) -> Result<String> {
    match output_format {
        OutputFormat::Json => crate::formatters::format_output(config, output_format),
        OutputFormat::Text | OutputFormat::Pretty => {
            toml::to_string_pretty(config).context("failed to serialize configuration")
        }
    }
}
