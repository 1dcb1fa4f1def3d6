//! Tests for manifest compilation: export, discovery, deduplication and runtime modes.
mod common;
use common::*;
use indexmap::IndexMap;
use serde_json::json;
use shinsei::declaration::Category;
use shinsei::manifest::{DATASTORE_SCOPES, FeatureDeclarations, SettingsDeclarations};
use shinsei::prelude::*;

fn compile_to_value(app: ApplicationDeclaration) -> serde_json::Value {
    ManifestCompiler::new(app)
        .compile()
        .expect("Failed to compile")
        .to_value()
        .expect("Failed to serialize")
}

#[test]
fn test_function_export_matches_manifest_schema() {
    let manifest = compile_to_value(simple_app());

    let review = &manifest["functions"]["review"];
    assert_eq!(review["title"], "Review");
    assert_eq!(review["description"], "Reviews a ticket");
    assert_eq!(review["source_file"], "functions/review.ts");
    assert_eq!(
        review["input_parameters"],
        json!({
            "properties": { "ticket": { "type": "string", "title": "Ticket" } },
            "required": ["ticket"]
        })
    );
    assert_eq!(
        review["output_parameters"],
        json!({ "properties": { "approved": { "type": "boolean" } }, "required": [] })
    );
}

#[test]
fn test_missing_parameter_sets_export_empty() {
    let app = ApplicationDeclaration::new("App", "", "icon.png")
        .function(FunctionDefinition::new("noop", "Noop", "functions/noop.ts"));
    let manifest = compile_to_value(app);

    let empty = json!({ "properties": {}, "required": [] });
    assert_eq!(manifest["functions"]["noop"]["input_parameters"], empty);
    assert_eq!(manifest["functions"]["noop"]["output_parameters"], empty);
    assert!(manifest["functions"]["noop"].get("description").is_none());
}

#[test]
fn test_document_skeleton() {
    let manifest = compile_to_value(simple_app().outgoing_domains(["api.example.com"]));

    assert_eq!(manifest["_metadata"]["major_version"], 2);
    assert_eq!(manifest["display_information"]["name"], "Reviews");
    assert_eq!(manifest["display_information"]["description"], "Reviews tickets");
    assert_eq!(manifest["icon"], "assets/icon.png");
    assert_eq!(manifest["features"]["bot_user"]["display_name"], "Reviews");
    assert_eq!(manifest["oauth_config"]["scopes"]["bot"], json!(["commands", "chat:write"]));
    assert_eq!(manifest["outgoing_domains"], json!(["api.example.com"]));

    // Categories without nodes are omitted.
    for section in ["workflows", "types", "datastores", "events", "external_auth_providers", "widgets"] {
        assert!(manifest.get(section).is_none(), "'{}' should be omitted", section);
    }
}

#[test]
fn test_duplicate_function_ids_fail_with_diff() {
    let app = simple_app().function(
        FunctionDefinition::new("review", "Review v2", "functions/review.ts"),
    );

    let result = ManifestCompiler::new(app).compile();
    assert!(result.is_err());

    match result.err().unwrap() {
        ManifestError::DuplicateIdentifier { category, id, diff } => {
            assert_eq!(category, Category::Function);
            assert_eq!(id, "review");
            assert!(diff.contains("title:"), "diff was: {}", diff);
            assert!(diff.contains("- \"Review\""), "diff was: {}", diff);
            assert!(diff.contains("+ \"Review v2\""), "diff was: {}", diff);
            assert!(diff.contains("description:"), "diff was: {}", diff);
            assert!(diff.contains("+ (not set)"), "diff was: {}", diff);
            assert!(!diff.contains("source_file"), "unchanged fields are not listed");
        }
        other => panic!("Expected DuplicateIdentifier error, got {:?}", other),
    }
}

#[test]
fn test_identical_duplicates_still_fail() {
    let app = ApplicationDeclaration::new("App", "", "icon.png")
        .workflow(WorkflowDefinition::new("triage", "Triage"))
        .workflow(WorkflowDefinition::new("triage", "Triage"));

    match ManifestCompiler::new(app).compile() {
        Err(ManifestError::DuplicateIdentifier { category, diff, .. }) => {
            assert_eq!(category, Category::Workflow);
            assert!(diff.contains("identical"));
        }
        other => panic!("Expected DuplicateIdentifier error, got {:?}", other),
    }
}

#[test]
fn test_duplicates_detected_in_every_category() {
    let base = || ApplicationDeclaration::new("App", "", "icon.png");
    let cases = vec![
        (
            base()
                .datastore(DatastoreDefinition::new("tickets", "id"))
                .datastore(DatastoreDefinition::new("tickets", "key")),
            Category::Datastore,
        ),
        (
            base()
                .custom_type(CustomType::new("ticket", ParameterDefinition::string()))
                .custom_type(CustomType::new("ticket", ParameterDefinition::integer())),
            Category::CustomType,
        ),
        (
            base()
                .event(CustomEvent::new("opened", ParameterDefinition::string()))
                .event(CustomEvent::new("opened", ParameterDefinition::boolean())),
            Category::CustomEvent,
        ),
        (
            base()
                .widget(WidgetDefinition::new("stats", "Stats"))
                .widget(WidgetDefinition::new("stats", "Other stats")),
            Category::Widget,
        ),
        (
            base()
                .provider(ProviderDefinition::jwt("auth", JwtOptions::default()))
                .provider(ProviderDefinition::oauth2(
                    "auth",
                    OAuth2ProviderType::Google,
                    OAuth2Options::default(),
                )),
            Category::Provider,
        ),
    ];

    for (app, expected) in cases {
        match ManifestCompiler::new(app).compile() {
            Err(ManifestError::DuplicateIdentifier { category, .. }) => {
                assert_eq!(category, expected)
            }
            other => panic!("Expected DuplicateIdentifier for {}, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_same_id_in_different_categories_is_allowed() {
    let app = simple_app()
        .workflow(WorkflowDefinition::new("review", "Review workflow"))
        .datastore(DatastoreDefinition::new("review", "id"));

    let manifest = compile_to_value(app);
    assert!(manifest["functions"].get("review").is_some());
    assert!(manifest["workflows"].get("review").is_some());
    assert!(manifest["datastores"].get("review").is_some());
}

#[test]
fn test_referenced_types_are_discovered_transitively() {
    let (ticket, _user) = nested_types();
    let app = ApplicationDeclaration::new("App", "", "icon.png").function(
        FunctionDefinition::new("file", "File ticket", "functions/file.ts").with_input_parameters(
            ParameterSet::new().property("ticket", ParameterDefinition::custom(&ticket)),
        ),
    );

    let manifest = compile_to_value(app);
    let types: Vec<&String> = manifest["types"]
        .as_object()
        .expect("types section present")
        .keys()
        .collect();
    assert_eq!(types, vec!["ticket", "user"]);

    assert_eq!(
        manifest["functions"]["file"]["input_parameters"]["properties"]["ticket"],
        json!({ "type": "#/types/ticket" })
    );
    assert_eq!(
        manifest["types"]["ticket"]["properties"]["reporter"],
        json!({ "type": "#/types/user" })
    );
}

#[test]
fn test_discovery_is_idempotent() {
    let (ticket, user) = nested_types();
    let app = ApplicationDeclaration::new("App", "", "icon.png")
        .custom_type(user.clone())
        .function(
            FunctionDefinition::new("a", "A", "functions/a.ts").with_input_parameters(
                ParameterSet::new()
                    .property("first", ParameterDefinition::custom(&ticket))
                    .property("second", ParameterDefinition::custom(&ticket))
                    .property("many", ParameterDefinition::array(ParameterDefinition::custom(&user))),
            ),
        )
        .datastore(
            DatastoreDefinition::new("tickets", "id")
                .attribute("id", ParameterDefinition::string())
                .attribute("ticket", ParameterDefinition::custom(&ticket)),
        );

    let compiler = ManifestCompiler::new(app);
    let context = compiler.discover();
    assert_eq!(context.registry.len(), 2);
    // Declared types keep their position ahead of discovered ones.
    let ids: Vec<&str> = context.types.iter().map(|ty| ty.id()).collect();
    assert_eq!(ids, vec!["user", "ticket"]);

    let first = compiler.compile().expect("Failed to compile").to_value().expect("serialize");
    let second = compiler.compile().expect("Failed to compile").to_value().expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn test_cyclic_types_compile() {
    let (a, _b) = cyclic_types();
    let app = ApplicationDeclaration::new("App", "", "icon.png").event(CustomEvent::new(
        "walked",
        ParameterDefinition::custom(&a),
    ));

    let manifest = compile_to_value(app);
    let types = manifest["types"].as_object().expect("types section present");
    assert_eq!(types.len(), 2);
    assert_eq!(types["node_a"]["properties"]["next"]["type"], "#/types/node_b");
    assert_eq!(types["node_b"]["properties"]["back"]["type"], "#/types/node_a");
    assert_eq!(manifest["events"]["walked"], json!({ "type": "#/types/node_a" }));
}

#[test]
fn test_reserved_types_are_never_registered() {
    let reserved = CustomType::declare("slack#/types/channel_id");
    let app = ApplicationDeclaration::new("App", "", "icon.png")
        .custom_type(reserved.clone())
        .function(
            FunctionDefinition::new("post", "Post", "functions/post.ts").with_input_parameters(
                ParameterSet::new()
                    .property("channel", ParameterDefinition::custom(&reserved))
                    .property("user", ParameterDefinition::builtin(builtin::USER_ID)),
            ),
        );

    let compiler = ManifestCompiler::new(app);
    assert!(!compiler.discover().registry.contains("slack#/types/channel_id"));

    let manifest = compile_to_value(compiler.application().clone());
    assert!(manifest.get("types").is_none());
    let properties = &manifest["functions"]["post"]["input_parameters"]["properties"];
    assert_eq!(properties["channel"]["type"], "slack#/types/channel_id");
    assert_eq!(properties["user"]["type"], "slack#/types/user_id");
}

#[test]
fn test_custom_reserved_namespace() {
    let internal = CustomType::new("acme#/types/badge", ParameterDefinition::string());
    let app = ApplicationDeclaration::new("App", "", "icon.png").custom_type(internal);

    let document = ManifestCompiler::builder(app.clone())
        .with_reserved_namespace("acme#/")
        .build()
        .compile()
        .expect("Failed to compile");
    assert!(document.types.is_empty());

    let document = ManifestCompiler::new(app).compile().expect("Failed to compile");
    assert!(document.types.contains_key("acme#/types/badge"));
}

#[test]
fn test_workflow_steps_append_step_functions() {
    let review = shared(review_function());
    let mut workflow = WorkflowDefinition::new("triage", "Triage").with_input_parameters(
        ParameterSet::new().property("ticket", ParameterDefinition::string()),
    );

    let mut inputs = IndexMap::new();
    inputs.insert("ticket".to_string(), json!(workflow.input("ticket")));
    let step = workflow.add_step(&review, inputs);

    let mut notify = IndexMap::new();
    notify.insert("message".to_string(), json!(step.output("approved")));
    workflow.add_step("slack#/functions/send_message", notify);

    // The function is only reachable through the workflow.
    let app = ApplicationDeclaration::new("App", "", "icon.png").workflow(workflow);
    let manifest = compile_to_value(app);

    assert!(manifest["functions"].get("review").is_some());
    assert_eq!(
        manifest["workflows"]["triage"]["steps"],
        json!([
            {
                "id": "0",
                "function_id": "#/functions/review",
                "inputs": { "ticket": "{{inputs.ticket}}" }
            },
            {
                "id": "1",
                "function_id": "slack#/functions/send_message",
                "inputs": { "message": "{{steps.0.approved}}" }
            }
        ])
    );
}

#[test]
fn test_declared_step_function_is_not_exported_twice() {
    let review = shared(review_function());
    let mut workflow = WorkflowDefinition::new("triage", "Triage");
    workflow.add_step(&review, IndexMap::new());
    workflow.add_step(&review, IndexMap::new());

    let app = ApplicationDeclaration::new("App", "", "icon.png")
        .shared_function(review)
        .workflow(workflow);

    let document = ManifestCompiler::new(app).compile().expect("Failed to compile");
    assert_eq!(document.functions.len(), 1);
}

#[test]
fn test_step_function_reusing_a_declared_id_fails() {
    let other = shared(FunctionDefinition::new("review", "Review v2", "functions/review_v2.ts"));
    let mut workflow = WorkflowDefinition::new("triage", "Triage");
    workflow.add_step(&other, IndexMap::new());

    let app = simple_app().workflow(workflow);

    match ManifestCompiler::new(app).compile() {
        Err(ManifestError::DuplicateIdentifier { category, id, diff }) => {
            assert_eq!(category, Category::Function);
            assert_eq!(id, "review");
            assert!(diff.contains("+ \"Review v2\""), "diff was: {}", diff);
            assert!(diff.contains("+ \"functions/review_v2.ts\""), "diff was: {}", diff);
        }
        other => panic!("Expected DuplicateIdentifier error, got {:?}", other),
    }
}

#[test]
fn test_hosted_mode_defaults() {
    let mut app = simple_app();
    app.token_management_enabled = Some(true);
    app.user_scopes = Some(vec!["users:read".to_string()]);
    app.features = FeatureDeclarations {
        app_home: Some(json!({ "home_tab_enabled": true })),
        shortcuts: Some(json!([{ "name": "Open" }])),
        bot_always_online: Some(true),
        ..FeatureDeclarations::default()
    };
    app.settings = SettingsDeclarations {
        org_deploy_enabled: Some(false),
        socket_mode_enabled: Some(true),
        event_subscriptions: Some(json!({ "bot_events": ["app_mention"] })),
        ..SettingsDeclarations::default()
    };

    let manifest = compile_to_value(app);

    assert_eq!(manifest["settings"]["function_runtime"], "slack");
    assert_eq!(manifest["settings"]["org_deploy_enabled"], true);
    assert_eq!(manifest["oauth_config"]["token_management_enabled"], false);
    assert_eq!(manifest["features"]["app_home"], json!({ "home_tab_enabled": true }));
    assert_eq!(
        manifest["settings"]["event_subscriptions"],
        json!({ "bot_events": ["app_mention"] })
    );

    assert!(manifest["features"].get("shortcuts").is_none());
    assert!(manifest["features"]["bot_user"].get("always_online").is_none());
    assert!(manifest["settings"].get("socket_mode_enabled").is_none());
    assert!(manifest["oauth_config"]["scopes"].get("user").is_none());
}

#[test]
fn test_remote_mode_copies_optional_sections() {
    let mut app = simple_app().with_runtime(RuntimeMode::Remote);
    app.user_scopes = Some(vec!["users:read".to_string()]);
    app.redirect_urls = Some(vec!["https://example.com/oauth".to_string()]);
    app.app_directory = Some(json!({ "privacy_policy_url": "https://example.com/privacy" }));
    app.features = FeatureDeclarations {
        shortcuts: Some(json!([{ "name": "Open" }])),
        unfurl_domains: Some(vec!["example.com".to_string()]),
        bot_always_online: Some(true),
        ..FeatureDeclarations::default()
    };
    app.settings = SettingsDeclarations {
        socket_mode_enabled: Some(true),
        allowed_ip_address_ranges: Some(vec!["10.0.0.0/8".to_string()]),
        ..SettingsDeclarations::default()
    };

    let manifest = compile_to_value(app);

    assert_eq!(manifest["settings"]["function_runtime"], "remote");
    assert_eq!(manifest["oauth_config"]["token_management_enabled"], true);
    assert_eq!(manifest["settings"]["org_deploy_enabled"], true);
    assert_eq!(manifest["oauth_config"]["scopes"]["user"], json!(["users:read"]));
    assert_eq!(manifest["oauth_config"]["redirect_urls"], json!(["https://example.com/oauth"]));
    assert_eq!(
        manifest["app_directory"]["privacy_policy_url"],
        "https://example.com/privacy"
    );
    assert_eq!(manifest["features"]["shortcuts"], json!([{ "name": "Open" }]));
    assert_eq!(manifest["features"]["unfurl_domains"], json!(["example.com"]));
    assert_eq!(manifest["features"]["bot_user"]["always_online"], true);
    assert_eq!(manifest["settings"]["socket_mode_enabled"], true);
    assert_eq!(manifest["settings"]["allowed_ip_address_ranges"], json!(["10.0.0.0/8"]));
}

#[test]
fn test_remote_mode_respects_declared_flags() {
    let mut app = simple_app().with_runtime(RuntimeMode::Remote);
    app.token_management_enabled = Some(false);
    app.settings.org_deploy_enabled = Some(false);

    let manifest = compile_to_value(app);
    assert_eq!(manifest["oauth_config"]["token_management_enabled"], false);
    assert_eq!(manifest["settings"]["org_deploy_enabled"], false);
}

#[test]
fn test_datastores_add_scopes_once() {
    let app = simple_app()
        .bot_scopes(["commands", "datastore:read"])
        .datastore(
            DatastoreDefinition::new("tickets", "id")
                .attribute("id", ParameterDefinition::string())
                .attribute("expires", ParameterDefinition::integer())
                .with_time_to_live_attribute("expires"),
        );

    let manifest = compile_to_value(app.clone());
    assert_eq!(
        manifest["oauth_config"]["scopes"]["bot"],
        json!(["commands", "datastore:read", "datastore:write"])
    );
    assert_eq!(
        manifest["datastores"]["tickets"],
        json!({
            "primary_key": "id",
            "attributes": {
                "id": { "type": "string" },
                "expires": { "type": "integer" }
            },
            "time_to_live_attribute": "expires"
        })
    );

    let document = ManifestCompiler::builder(app)
        .with_datastore_scopes(false)
        .build()
        .compile()
        .expect("Failed to compile");
    assert!(!document.oauth_config.scopes.bot.contains(&DATASTORE_SCOPES[1].to_string()));
}

#[test]
fn test_providers_are_split_by_kind() {
    let app = simple_app()
        .provider(ProviderDefinition::oauth2(
            "google",
            OAuth2ProviderType::Google,
            OAuth2Options {
                client_id: "client".to_string(),
                scope: vec!["email".to_string()],
                ..OAuth2Options::default()
            },
        ))
        .provider(ProviderDefinition::jwt(
            "internal",
            JwtOptions {
                issuer: "https://issuer.example.com".to_string(),
                jwks_url: "https://issuer.example.com/jwks".to_string(),
                audience: None,
            },
        ));

    let manifest = compile_to_value(app);
    let providers = &manifest["external_auth_providers"];
    assert_eq!(
        providers["oauth2"]["google"],
        json!({ "provider_type": "GOOGLE", "options": { "client_id": "client", "scope": ["email"] } })
    );
    assert_eq!(
        providers["jwt"]["internal"]["options"]["jwks_url"],
        "https://issuer.example.com/jwks"
    );
    assert!(providers["jwt"]["internal"].get("provider_type").is_none());
}
