//! Command execution and logging initialization.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use twc_core::{Error, GeneratorConfig};
use twc_core::cli::{ExitCode, OutputFormat};

use crate::cli::Commands;
use crate::commands;

/// Initializes logging.
///
/// `--verbose` forces the `debug` level; otherwise `RUST_LOG` applies,
/// falling back to `info`. Logs go to stderr so the summary on stdout stays
/// parseable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes `command`, or `generate` when none was given.
///
/// # Errors
///
/// Returns the error of the executed command.
pub async fn execute_command(
    command: Option<Commands>,
    config: &GeneratorConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command.unwrap_or(Commands::Generate) {
        Commands::Generate => commands::generate::run(config, output_format).await,
        Commands::Config => commands::config::run(config, output_format),
    }
}

/// Maps a failed run to its process exit code.
///
/// Invalid configuration or arguments exit with
/// [`ExitCode::INVALID_INPUT`]; every other failure with [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let invalid_input = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(|cause| cause.is_config_error() || matches!(cause, Error::InvalidArgument(_)));

    if invalid_input {
        ExitCode::INVALID_INPUT
    } else {
        ExitCode::ERROR
    }
}
