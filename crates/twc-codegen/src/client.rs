//! Client wrapper rendering.

use crate::synthesis::Synthesis;
use crate::template_engine::{CLIENT_TEMPLATE, TemplateEngine};
use serde::Serialize;
use twc_core::{GeneratorConfig, Result};

/// Name of the exported factory function.
pub const FACTORY_FUNCTION: &str = "createTypedWebClient";

#[derive(Debug, Serialize)]
struct ClientContext<'a> {
    client_type: &'a str,
    options_type: String,
    client_module: &'a str,
    arguments_module: &'a str,
    types_module: String,
    wrapper_class: &'a str,
    factory: &'static str,
    argument_types: Vec<&'a str>,
    methods: Vec<MethodContext<'a>>,
}

#[derive(Debug, Serialize)]
struct MethodContext<'a> {
    name: &'a str,
    operation: &'a str,
    path: String,
    argument_type: &'a str,
}

/// Renders the client artifact for `synthesis`.
///
/// Only the argument interfaces used by a generated method are imported.
///
/// # Errors
///
/// Returns [`twc_core::Error::GenerationError`] if rendering fails.
pub fn render_client(
    engine: &TemplateEngine<'_>,
    config: &GeneratorConfig,
    synthesis: &Synthesis,
) -> Result<String> {
    let context = ClientContext {
        client_type: &config.client_type,
        options_type: format!("{}Options", config.client_type),
        client_module: &config.client_module,
        arguments_module: &config.arguments_module,
        types_module: config.types_module(),
        wrapper_class: &config.wrapper_class,
        factory: FACTORY_FUNCTION,
        argument_types: synthesis.argument_imports(),
        methods: synthesis
            .methods
            .iter()
            .map(|method| MethodContext {
                name: &method.name,
                operation: method.operation.as_str(),
                path: method.path.to_string(),
                argument_type: method.argument_type.as_str(),
            })
            .collect(),
    };

    engine.render(CLIENT_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::ClientMethod;
    use twc_core::{ArgumentTypeName, MethodPath, OperationName};

    fn auth_test() -> Synthesis {
        Synthesis {
            methods: vec![ClientMethod {
                name: "authTest".to_string(),
                operation: OperationName::new("AuthTest"),
                path: MethodPath::parse("auth.test"),
                argument_type: ArgumentTypeName::new("AuthTestArguments"),
            }],
            ..Synthesis::default()
        }
    }

    fn render(synthesis: &Synthesis) -> String {
        let engine = TemplateEngine::new().unwrap();
        render_client(&engine, &GeneratorConfig::default(), synthesis).unwrap()
    }

    #[test]
    fn test_method_signature_and_body() {
        let out = render(&auth_test());
        assert!(out.contains(
            "public async authTest(args: AuthTestArguments): Promise<(Paths.AuthTest.Responses.Success | Paths.AuthTest.Responses.Error) & Paths.AuthTest.Responses.SuccessOrErrorPredicate> {"
        ));
        assert!(out.contains("await this.client.auth.test(args)"));
        assert!(out.contains(
            "return Object.assign(new Paths.AuthTest.Responses.SuccessOrErrorPredicate(result), result);"
        ));
    }

    #[test]
    fn test_imports_and_class() {
        let out = render(&auth_test());
        assert!(out.contains("import { WebClient, WebClientOptions } from \"@slack/web-api\";"));
        assert!(out.contains("    AuthTestArguments,"));
        assert!(out.contains("} from \"@slack/web-api/dist/methods\";"));
        assert!(out.contains("import { Paths } from \"./slackTypes\";"));
        assert!(out.contains("export class TypedWebClient {"));
        assert!(out.contains("constructor(private readonly client: WebClient) {}"));
    }

    #[test]
    fn test_factory_function() {
        let out = render(&auth_test());
        assert!(out.contains(
            "export function createTypedWebClient(token?: string, options: WebClientOptions = {}): TypedWebClient {"
        ));
        assert!(out.contains("return new TypedWebClient(new WebClient(token, options));"));
    }

    #[test]
    fn test_no_methods_skips_argument_import() {
        let out = render(&Synthesis::default());
        assert!(!out.contains("@slack/web-api/dist/methods"));
        assert!(out.contains("export class TypedWebClient {"));
    }
}
