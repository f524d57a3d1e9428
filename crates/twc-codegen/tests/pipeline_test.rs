//! Integration tests for twc-codegen
//!
//! Runs the whole pipeline on an in-memory specification, SDK declarations
//! and supplemental declarations, then inspects the rendered artifacts.

use serde_json::{Value, json};
use twc_codegen::{Generation, Generator};
use twc_core::{GeneratorConfig, SuccessCheck};
use twc_dts::{Scope, parse};
use twc_introspector::{Introspector, SdkSurface};
use twc_schema::SpecDocument;

const SDK: &str = r"
export interface Method<A> { (options?: A): Promise<WebAPICallResult>; }
export interface TokenOverridable { token?: string; }
export interface AuthTestArguments extends TokenOverridable {}
export interface ChatPostMessageArguments extends TokenOverridable { channel: string; text?: string; }
export declare abstract class Methods {
    readonly auth: { test: Method<AuthTestArguments>; };
    readonly chat: { postMessage: Method<ChatPostMessageArguments>; };
    readonly legacy: { thing: Method<LegacyThingArguments>; };
}
";

const SUPPLEMENTAL: &str = r"
export namespace Paths {
    export namespace DndInfo {
        export namespace Responses {
            export interface Success { dnd_enabled?: boolean; }
        }
    }
}
export namespace Definitions {
    export namespace SlashCommands {
        interface RequestBody { token: string; command: string; }
    }
}
";

fn operation(id: &str, success: Value) -> Value {
    json!({
        "get": {
            "operationId": id,
            "responses": {
                "200": { "description": "ok", "schema": success },
                "default": {
                    "description": "error",
                    "schema": {
                        "type": "object",
                        "required": ["ok", "error"],
                        "properties": {
                            "ok": { "$ref": "#/definitions/defs_ok_false" },
                            "error": { "type": "string" }
                        }
                    }
                }
            }
        }
    })
}

fn document() -> SpecDocument {
    SpecDocument::from_value(json!({
        "swagger": "2.0",
        "info": { "title": "Slack Web API", "version": "1.7.0" },
        "paths": {
            "/auth.test": operation("auth_test", json!({
                "type": "object",
                "required": ["ok", "user_id"],
                "properties": {
                    "ok": { "$ref": "#/definitions/defs_ok_true" },
                    "user_id": { "type": "string" }
                }
            })),
            "/chat.postMessage": operation("chat_postMessage", json!({
                "type": "object",
                "required": ["ok", "ts"],
                "properties": {
                    "ok": { "$ref": "#/definitions/defs_ok_true" },
                    "ts": { "type": "string" }
                },
                "additionalProperties": false
            }))
        },
        "definitions": {
            "defs_ok_false": { "type": "boolean", "enum": [false] },
            "defs_ok_true": { "type": "boolean", "enum": [true] }
        }
    }))
    .unwrap()
}

fn sdk() -> SdkSurface {
    Introspector::new("Methods")
        .inspect_source("methods.d.ts", SDK)
        .unwrap()
}

fn generate(config: &GeneratorConfig) -> twc_core::Result<Generation> {
    let supplemental = parse("additionalSlackTypes.ts", SUPPLEMENTAL).unwrap();
    Generator::new(config)?.generate(&document(), &sdk(), Some(&supplemental))
}

/// Tests the 3 discovered / 2 matched / 1 unmatched join
#[test]
fn test_partial_join() {
    let generation = generate(&GeneratorConfig::default()).unwrap();
    let report = &generation.report;

    assert_eq!(report.discovered_methods, 3);
    assert_eq!(report.methods, ["authTest", "chatPostMessage"]);
    assert_eq!(report.unmatched_methods, ["legacy.thing"]);
    assert!(report.unmatched_arguments.is_empty());
}

/// Tests the AuthTest wrapper end to end
#[test]
fn test_auth_test_end_to_end() {
    let generation = generate(&GeneratorConfig::default()).unwrap();
    let client = &generation
        .code
        .file("typedSlackWebClient.ts")
        .unwrap()
        .content;

    assert!(client.contains(
        "public async authTest(args: AuthTestArguments): Promise<(Paths.AuthTest.Responses.Success | Paths.AuthTest.Responses.Error) & Paths.AuthTest.Responses.SuccessOrErrorPredicate> {"
    ));
    assert!(client.contains("await this.client.auth.test(args)"));
    assert!(client.contains("    AuthTestArguments,"));
    assert!(client.contains("    ChatPostMessageArguments,"));
    assert!(!client.contains("TokenOverridable"));
    assert!(!client.contains("legacy"));
}

/// Tests the shape of the type declarations artifact
#[test]
fn test_type_artifact() {
    let generation = generate(&GeneratorConfig::default()).unwrap();
    let source = &generation.code.file("slackTypes.ts").unwrap().content;

    // The artifact must read back through the declaration parser.
    let types = parse("slackTypes.ts", source).unwrap();
    let paths = types.namespace("Paths").unwrap();
    assert!(paths.modifiers.export);

    let auth = paths
        .namespace("AuthTest")
        .and_then(|op| op.namespace("Responses"))
        .unwrap();
    assert_eq!(auth.count_named("SuccessOrErrorPredicate"), 1);
    assert_eq!(auth.interface("Success").unwrap().index_signature_count(), 0);

    let error = auth.interface("Error").unwrap();
    assert!(error.property("response_metadata").is_some());
    assert_eq!(
        error.property("ok").unwrap().ty.as_raw(),
        Some("Definitions.OkFalse")
    );

    assert!(source.contains("export type OkTrue = true;"));
    assert!(source.contains("export type OkFalse = false;"));
    assert!(source.contains("return this.#response.ok === true;"));
    assert!(!source.contains("declare namespace"));
}

/// Tests that supplemental declarations are merged and reported
#[test]
fn test_supplemental_merge() {
    let generation = generate(&GeneratorConfig::default()).unwrap();
    let source = &generation.code.file("slackTypes.ts").unwrap().content;

    assert_eq!(
        generation.report.merge.appended,
        ["Paths.DndInfo", "Definitions.SlashCommands"]
    );
    assert!(generation.report.merge.collisions.is_empty());
    assert!(source.contains("dnd_enabled?: boolean;"));
    assert!(source.contains("interface RequestBody {"));
    // DndInfo now has responses but no SDK method, so it gets no wrapper.
    assert_eq!(generation.report.operations, 3);
}

/// Tests that strict mode rejects the unmatched method
#[test]
fn test_strict_mode_fails_on_unresolved_join() {
    let config = GeneratorConfig {
        strict: true,
        ..GeneratorConfig::default()
    };
    let err = generate(&config).unwrap_err();
    assert!(err.is_unresolved_join());
}

/// Tests the legacy success check
#[test]
fn test_legacy_success_check() {
    let config = GeneratorConfig {
        success_check: SuccessCheck::LegacyOkFalse,
        ..GeneratorConfig::default()
    };
    let generation = generate(&config).unwrap();
    let source = &generation.code.file("slackTypes.ts").unwrap().content;
    assert!(source.contains("return this.#response.ok == false;"));
}

/// Tests that identical inputs give identical output
#[test]
fn test_deterministic_output() {
    let config = GeneratorConfig::default();
    let a = generate(&config).unwrap();
    let b = generate(&config).unwrap();
    for (left, right) in a.code.files().zip(b.code.files()) {
        assert_eq!(left, right);
    }
}

/// Tests custom output names flow into the client imports
#[test]
fn test_custom_names() {
    let config = GeneratorConfig {
        types_file: "apiTypes.d.ts".to_string(),
        client_file: "client.ts".to_string(),
        wrapper_class: "SlackClient".to_string(),
        ..GeneratorConfig::default()
    };
    let generation = generate(&config).unwrap();
    let client = &generation.code.file("client.ts").unwrap().content;

    assert!(generation.code.file("apiTypes.d.ts").is_some());
    assert!(client.contains("import { Paths } from \"./apiTypes\";"));
    assert!(client.contains("export class SlackClient {"));
}

/// Tests that inner acronyms survive on both sides of the join
#[test]
fn test_acronym_operation_joins() {
    let document = SpecDocument::from_value(json!({
        "swagger": "2.0",
        "info": { "title": "Slack Web API", "version": "1.7.0" },
        "paths": {
            "/files.getUploadURLExternal": operation("files_getUploadURLExternal", json!({
                "type": "object",
                "required": ["ok", "upload_url"],
                "properties": {
                    "ok": { "$ref": "#/definitions/defs_ok_true" },
                    "upload_url": { "type": "string" }
                }
            }))
        },
        "definitions": {
            "defs_ok_false": { "type": "boolean", "enum": [false] },
            "defs_ok_true": { "type": "boolean", "enum": [true] }
        }
    }))
    .unwrap();
    let sdk = Introspector::new("Methods")
        .inspect_source(
            "methods.d.ts",
            r"
export interface Method<A> { (options?: A): Promise<WebAPICallResult>; }
export interface FilesGetUploadURLExternalArguments { filename: string; length: number; }
export declare abstract class Methods {
    readonly files: { getUploadURLExternal: Method<FilesGetUploadURLExternalArguments>; };
}
",
        )
        .unwrap();

    let config = GeneratorConfig {
        strict: true,
        ..GeneratorConfig::default()
    };
    let generation = Generator::new(&config)
        .unwrap()
        .generate(&document, &sdk, None)
        .unwrap();

    assert_eq!(generation.report.methods, ["filesGetUploadURLExternal"]);
    assert!(generation.report.unmatched_methods.is_empty());
    let types = &generation.code.file("slackTypes.ts").unwrap().content;
    assert!(types.contains("namespace FilesGetUploadURLExternal {"));
}
