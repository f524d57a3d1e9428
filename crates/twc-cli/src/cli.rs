//! CLI argument definitions and parsing.
//!
//! Running the binary without arguments generates both artifacts with the
//! built-in defaults. Every flag only overrides a configuration value.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use twc_core::GeneratorConfig;

/// Typed Slack web client generator.
///
/// Downloads the Slack Web API specification, reconciles it with the
/// installed `@slack/web-api` declarations and writes a typed wrapper client.
#[derive(Parser, Debug)]
#[command(name = "twc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `generate`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration overrides
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format of the run summary (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Generate the type declarations and the client wrapper.
    Generate,

    /// Print the effective configuration as TOML and exit.
    ///
    /// Shows the result of layering the configuration file and the flags
    /// over the defaults.
    Config,
}

/// Flags layered over the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "TWC_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL of the OpenAPI document
    #[arg(long, global = true, conflicts_with = "spec_file")]
    pub spec_url: Option<String>,

    /// Read the OpenAPI document from a local file instead of fetching it
    #[arg(long, global = true)]
    pub spec_file: Option<PathBuf>,

    /// SDK declaration file (`methods.d.ts`)
    #[arg(long, global = true)]
    pub sdk_declarations: Option<PathBuf>,

    /// Supplemental declarations merged into the generated types
    #[arg(long, global = true, conflicts_with = "no_supplemental")]
    pub supplemental: Option<PathBuf>,

    /// Skip the supplemental declarations
    #[arg(long, global = true)]
    pub no_supplemental: bool,

    /// Directory the artifacts are written to
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Fail on unresolved joins and name collisions
    #[arg(long, global = true)]
    pub strict: bool,
}

impl ConfigOverrides {
    /// Builds the effective configuration: defaults, then the file, then
    /// the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// result does not validate.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(url) = &self.spec_url {
            config.spec_url.clone_from(url);
            config.spec_file = None;
        }
        if let Some(path) = &self.spec_file {
            config.spec_file = Some(path.clone());
        }
        if let Some(path) = &self.sdk_declarations {
            config.sdk_declarations.clone_from(path);
        }
        if self.no_supplemental {
            config.supplemental = None;
        } else if let Some(path) = &self.supplemental {
            config.supplemental = Some(path.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.strict {
            config.strict = true;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_core::cli::OutputFormat;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["twc"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.format, "pretty");

        let config = cli.overrides.resolve().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_generate_subcommand() {
        let cli = Cli::parse_from(["twc", "generate", "--strict", "-o", "out"]);
        assert_eq!(cli.command, Some(Commands::Generate));

        let config = cli.overrides.resolve().unwrap();
        assert!(config.strict);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["twc", "config"]);
        assert_eq!(cli.command, Some(Commands::Config));
    }

    #[test]
    fn test_spec_file_override() {
        let cli = Cli::parse_from(["twc", "--spec-file", "slack.json"]);
        let config = cli.overrides.resolve().unwrap();
        assert_eq!(config.spec_file, Some(PathBuf::from("slack.json")));
    }

    #[test]
    fn test_spec_url_and_file_conflict() {
        let result = Cli::try_parse_from([
            "twc",
            "--spec-url",
            "https://example.com/spec.json",
            "--spec-file",
            "slack.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_supplemental() {
        let cli = Cli::parse_from(["twc", "--no-supplemental"]);
        let config = cli.overrides.resolve().unwrap();
        assert!(config.supplemental.is_none());
    }

    #[test]
    fn test_supplemental_conflicts_with_no_supplemental() {
        let result = Cli::try_parse_from(["twc", "--supplemental", "x.ts", "--no-supplemental"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_and_format() {
        let cli = Cli::parse_from(["twc", "-v", "--format", "json"]);
        assert!(cli.verbose);
        assert_eq!(cli.format.parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twc.toml");
        std::fs::write(&path, "output_dir = \"generated\"\nwrapper_class = \"Slack\"\n").unwrap();

        let cli = Cli::parse_from([
            "twc",
            "--config",
            path.to_str().unwrap(),
            "--output-dir",
            "elsewhere",
        ]);
        let config = cli.overrides.resolve().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.wrapper_class, "Slack");
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["twc", "--config", "/nonexistent/twc.toml"]);
        let err = cli.overrides.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to load configuration"));
    }
}
