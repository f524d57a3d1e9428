//! Typed web client generator.
//!
//! Downloads the Slack Web API specification, reconciles it with the
//! installed `@slack/web-api` declarations and writes `slackTypes.ts` and
//! `typedSlackWebClient.ts`.
//!
//! # Examples
//!
//! ```bash
//! # Generate with the built-in defaults
//! twc
//!
//! # Use a local copy of the specification and fail on any unresolved name
//! twc --spec-file slack_web_openapi_v2.json --strict
//!
//! # Print the effective configuration
//! twc --config twc.toml config
//! ```

use anyhow::Result;
use clap::Parser;
use twc_cli::Cli;
use twc_cli::runner::{execute_command, exit_code_for, init_logging};
use twc_core::cli::{ExitCode, OutputFormat};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose)?;

    let output_format = cli.format.parse::<OutputFormat>()?;
    let config = cli.overrides.resolve()?;

    execute_command(cli.command, &config, output_format).await
}
