//! Generate command implementation.
//!
//! This command:
//! 1. Loads the OpenAPI document (download or local file)
//! 2. Introspects the SDK declarations for methods and argument types
//! 3. Parses the supplemental declarations, if any
//! 4. Generates both artifacts
//! 5. Writes them to the output directory, all or nothing
//!
//! Nothing is written unless every step before the write succeeded.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use twc_codegen::{Generator, MergeReport};
use twc_core::GeneratorConfig;
use twc_core::cli::{ExitCode, OutputFormat};
use twc_dts::DeclarationFile;
use twc_files::OutputWriter;
use twc_introspector::Introspector;
use twc_schema::{FileSpecSource, HttpSpecSource, SpecSource};

/// Summary printed after a successful run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Files written, in write order
    pub files: Vec<String>,
    /// Operation namespaces in the type artifact
    pub operations: usize,
    /// SDK methods discovered
    pub discovered_methods: usize,
    /// Wrapper methods generated
    pub methods: usize,
    /// SDK methods without a response namespace
    pub unmatched_methods: Vec<String>,
    /// Operations without an argument interface
    pub unmatched_arguments: Vec<String>,
    /// Supplemental merge outcome
    pub merge: MergeReport,
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if:
/// - The specification cannot be fetched or parsed
/// - The SDK or supplemental declarations cannot be read or parsed
/// - A required namespace is missing from the generated types
/// - Strict mode is on and a join is unresolved or a name collides
/// - The artifacts cannot be written
pub async fn run(config: &GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let summary = generate(config).await?;

    let formatted = crate::formatters::format_output(&summary, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

/// Runs every stage and returns the summary without printing it.
///
/// # Errors
///
/// See [`run`].
pub async fn generate(config: &GeneratorConfig) -> Result<RunSummary> {
    let source: Box<dyn SpecSource> = match &config.spec_file {
        Some(path) => Box::new(FileSpecSource::new(path)),
        None => Box::new(HttpSpecSource::new(&config.spec_url)),
    };
    let document = source
        .fetch()
        .await
        .context("failed to load the API specification")?;

    info!(
        "Introspecting SDK declarations in {}",
        config.sdk_declarations.display()
    );
    let sdk = Introspector::new(&config.sdk_client_class)
        .inspect_file(&config.sdk_declarations)
        .with_context(|| {
            format!(
                "failed to introspect {} - is the SDK installed?",
                config.sdk_declarations.display()
            )
        })?;

    let supplemental = match &config.supplemental {
        Some(path) => load_supplemental(path)?,
        None => None,
    };

    let generator = Generator::new(config).context("failed to initialize the generator")?;
    let generation = generator
        .generate(&document, &sdk, supplemental.as_ref())
        .context("failed to generate the typed client")?;

    let written = OutputWriter::from_generated_code(generation.code)
        .write_to(&config.output_dir)
        .with_context(|| format!("failed to write {}", config.output_dir.display()))?;

    let report = generation.report;
    info!(
        "Generated {} methods for {} operations",
        report.methods.len(),
        report.operations
    );

    Ok(RunSummary {
        files: written.iter().map(|p| p.display().to_string()).collect(),
        operations: report.operations,
        discovered_methods: report.discovered_methods,
        methods: report.methods.len(),
        unmatched_methods: report.unmatched_methods,
        unmatched_arguments: report.unmatched_arguments,
        merge: report.merge,
    })
}

/// Reads the supplemental declarations.
///
/// A missing file is skipped with a warning so the default location may be
/// absent; a file that exists but does not parse is an error.
fn load_supplemental(path: &Path) -> Result<Option<DeclarationFile>> {
    if !path.exists() {
        warn!(
            "Supplemental declarations {} not found, skipping",
            path.display()
        );
        return Ok(None);
    }

    info!("Merging supplemental declarations from {}", path.display());
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file = twc_dts::parse(&path.display().to_string(), &source)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_spec_read_is_logged_once() {
        let dir = TempDir::new().unwrap();
        let config = GeneratorConfig {
            spec_file: Some(dir.path().join("missing.json")),
            ..GeneratorConfig::default()
        };
        let logs = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(generate(&config))
        });

        assert!(result.is_err());
        let output = logs.contents();
        assert_eq!(output.matches("API specification from").count(), 1, "{output}");
        assert!(output.contains("Reading API specification from"));
    }

    #[test]
    fn test_missing_supplemental_is_skipped() {
        let dir = TempDir::new().unwrap();
        let result = load_supplemental(&dir.path().join("absent.ts")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_supplemental_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ts");
        std::fs::write(&path, "export namespace Paths {").unwrap();
        let err = load_supplemental(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_supplemental_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extra.ts");
        std::fs::write(&path, "export namespace Definitions {}\n").unwrap();
        let file = load_supplemental(&path).unwrap().unwrap();
        assert_eq!(file.items.len(), 1);
    }
}
