//! End-to-end generation from already loaded inputs.
//!
//! Loading (fetching the document, reading declaration files) and writing are
//! left to the caller; [`Generator::generate`] is a pure function of its
//! inputs and the configuration.

use crate::client::render_client;
use crate::postprocess::{PostProcessOptions, post_process};
use crate::synthesis::{response_operations, synthesize};
use crate::template_engine::TemplateEngine;
use crate::types::{GeneratedCode, GeneratedFile, GenerationReport};
use twc_core::{GeneratorConfig, Result};
use twc_dts::DeclarationFile;
use twc_introspector::SdkSurface;
use twc_schema::{SpecDocument, SubstitutingConvertor, to_type_namespaces};

const TYPES_HEADER: &str = "// This file is generated. Do not edit it by hand.\n\n";

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Files to write, relative to the output directory
    pub code: GeneratedCode,
    /// Summary of matched and unmatched names
    pub report: GenerationReport,
}

/// Produces the type declarations and client artifacts.
#[derive(Debug)]
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    engine: TemplateEngine<'a>,
}

impl<'a> Generator<'a> {
    /// Creates a generator for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new(config: &'a GeneratorConfig) -> Result<Self> {
        Ok(Self {
            config,
            engine: TemplateEngine::new()?,
        })
    }

    /// Runs compile, post-process, synthesis and rendering.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any stage. In strict mode unresolved
    /// joins and supplemental collisions are fatal as well.
    pub fn generate(
        &self,
        document: &SpecDocument,
        sdk: &SdkSurface,
        supplemental: Option<&DeclarationFile>,
    ) -> Result<Generation> {
        let convertor = SubstitutingConvertor::new(&self.config.naming);

        tracing::info!("Generating type declarations from the specification");
        let compiled = to_type_namespaces(document, &convertor)?;

        let options = PostProcessOptions {
            success_check: self.config.success_check,
            strict: self.config.strict,
        };
        let (types, merge) = post_process(compiled, supplemental, options)?;

        tracing::info!("Generating client");
        let operations = response_operations(&types)?;
        let synthesis = synthesize(&operations, &sdk.registry, &sdk.argument_types);
        if self.config.strict {
            synthesis.ensure_complete()?;
        }

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: self.config.types_file.clone(),
            content: format!("{TYPES_HEADER}{}", twc_dts::print(&types)),
        });
        code.add_file(GeneratedFile {
            path: self.config.client_file.clone(),
            content: render_client(&self.engine, self.config, &synthesis)?,
        });

        let report = GenerationReport {
            operations: operations.len(),
            discovered_methods: sdk.registry.len(),
            methods: synthesis.methods.iter().map(|m| m.name.clone()).collect(),
            unmatched_methods: synthesis
                .unmatched_methods
                .iter()
                .map(ToString::to_string)
                .collect(),
            unmatched_arguments: synthesis
                .unmatched_arguments
                .iter()
                .map(ToString::to_string)
                .collect(),
            merge,
        };

        Ok(Generation { code, report })
    }
}
