//! Tests for interaction routing: first-match dispatch, constraints and the function runtime.
mod common;
use common::*;
use serde_json::json;
use shinsei::interactivity::EventCategory;
use shinsei::prelude::*;
use tokio_test::block_on;

fn action_router() -> ActionRouter {
    ActionRouter::new(&review_function())
}

#[test]
fn test_first_matching_route_wins() {
    let mut router = action_router();
    router
        .add_handler("save", |_ctx| async { reply(json!("exact")) })
        .add_handler(
            FieldMatcher::pattern("sav").expect("valid pattern"),
            |_ctx| async { reply(json!("pattern")) },
        );

    let event = EventContext::from_payload(action_event("save", "form1"));
    let result = block_on(router.dispatch(event)).expect("dispatch succeeds");
    assert_eq!(result, json!("exact"));

    // Only the pattern matches here.
    let event = EventContext::from_payload(action_event("save_draft", "form1"));
    let result = block_on(router.dispatch(event)).expect("dispatch succeeds");
    assert_eq!(result, json!("pattern"));
}

#[test]
fn test_composite_constraint_requires_every_field() {
    let mut router = action_router();
    router.add_handler(
        BlockConstraint::new().action_id("save").block_id("form1"),
        |_ctx| async { reply(json!("saved")) },
    );

    let event = EventContext::from_payload(action_event("save", "form1"));
    assert_eq!(block_on(router.dispatch(event)).expect("matches"), json!("saved"));

    let event = EventContext::from_payload(action_event("save", "form2"));
    match block_on(router.dispatch(event)) {
        Err(RouterError::UnhandledEvent {
            category,
            function_id,
            payload,
        }) => {
            assert_eq!(category, EventCategory::BlockActions);
            assert_eq!(function_id, "review");
            assert_eq!(payload["type"], "block_actions");
            assert_eq!(payload["actions"][0]["block_id"], "form2");
        }
        other => panic!("Expected UnhandledEvent error, got {:?}", other),
    }
}

#[test]
fn test_block_only_constraint() {
    let mut router = action_router();
    router.add_handler(BlockConstraint::new().block_id("toolbar"), |ctx| async move {
        reply(json!(ctx.payload().action.action_id))
    });

    let event = EventContext::from_payload(action_event("refresh", "toolbar"));
    assert_eq!(block_on(router.dispatch(event)).expect("matches"), json!("refresh"));
}

#[test]
fn test_array_matcher_matches_any_candidate() {
    let mut router = action_router();
    router.add_handler(["approve", "reject"], |ctx| async move {
        reply(json!(format!("decided:{}", ctx.payload().action.action_id)))
    });

    for action in ["approve", "reject"] {
        let event = EventContext::from_payload(action_event(action, "decision"));
        let result = block_on(router.dispatch(event)).expect("dispatch succeeds");
        assert_eq!(result, json!(format!("decided:{}", action)));
    }

    assert!(!router.handles(&action_event("escalate", "decision")));
    assert_eq!(router.route_count(), 1);
}

#[test]
fn test_handler_context_is_enriched() {
    let config = RuntimeConfig::default()
        .with_api_url("https://api.example.test/api")
        .expect("valid url")
        .with_env_var("REGION", "us")
        .with_env_var("STAGE", "test");
    let mut router = action_router().with_config(config);
    router.add_handler("save", |ctx: HandlerContext<ActionEvent>| async move {
        reply(json!({
            "url": ctx.client.method_url("chat.postMessage"),
            "token": ctx.client.token(),
            "region": ctx.env.get("REGION"),
            "stage": ctx.env.get("STAGE"),
            "ticket": ctx.inputs().get("ticket"),
            "team": ctx.team_id,
        }))
    });

    let mut env = ahash::AHashMap::new();
    env.insert("REGION".to_string(), "eu".to_string());
    let event = EventContext::from_payload(action_event("save", "form1")).with_env(env);

    let result = block_on(router.dispatch(event)).expect("dispatch succeeds");
    assert_eq!(
        result,
        json!({
            "url": "https://api.example.test/api/chat.postMessage",
            "token": "xoxb-test",
            "region": "eu",
            "stage": "test",
            "ticket": "T-42",
            "team": "T0001",
        })
    );
}

#[test]
fn test_handler_failure_is_reported() {
    let mut router = action_router();
    router.add_handler("save", |_ctx| async {
        HandlerResult::Err("backend unavailable".into())
    });

    let event = EventContext::from_payload(action_event("save", "form1"));
    match block_on(router.dispatch(event)) {
        Err(RouterError::HandlerFailed { category, source }) => {
            assert_eq!(category, EventCategory::BlockActions);
            assert_eq!(source.to_string(), "backend unavailable");
        }
        other => panic!("Expected HandlerFailed error, got {:?}", other),
    }
}

#[test]
fn test_suggestion_router_returns_options() {
    let mut router = SuggestionRouter::new(&review_function());
    router.add_handler("assignee", |ctx| async move {
        let query = ctx.payload().value.clone();
        reply(json!({ "options": [{ "text": { "type": "plain_text", "text": query }, "value": "U1" }] }))
    });

    let event = EventContext::from_payload(suggestion_event("assignee", "people", "ali"));
    let result = block_on(router.dispatch(event)).expect("dispatch succeeds");
    assert_eq!(result["options"][0]["text"]["text"], "ali");

    let event = EventContext::from_payload(suggestion_event("labels", "people", ""));
    match block_on(router.dispatch(event)) {
        Err(RouterError::UnhandledEvent { category, .. }) => {
            assert_eq!(category, EventCategory::BlockSuggestion)
        }
        other => panic!("Expected UnhandledEvent error, got {:?}", other),
    }
}

#[test]
fn test_view_routes_are_partitioned_by_kind() {
    let mut router = ViewRouter::new(&review_function());
    router
        .add_submission_handler("review_modal", |_ctx| async { reply(json!("submitted")) })
        .add_closed_handler("review_modal", |_ctx| async { reply(json!("closed")) });

    let submitted = EventContext::from_payload(view_event("view_submission", "review_modal"));
    assert_eq!(block_on(router.dispatch(submitted)).expect("matches"), json!("submitted"));

    let closed = EventContext::from_payload(view_event("view_closed", "review_modal"));
    assert_eq!(block_on(router.dispatch(closed)).expect("matches"), json!("closed"));
}

#[test]
fn test_submission_handler_never_sees_closed_views() {
    let mut router = ViewRouter::new(&review_function());
    router.add_submission_handler(ViewConstraint::new(), |_ctx| async { reply(json!("any")) });

    let closed = EventContext::from_payload(view_event("view_closed", "review_modal"));
    match block_on(router.dispatch(closed)) {
        Err(RouterError::UnhandledEvent { category, payload, .. }) => {
            assert_eq!(category, EventCategory::ViewClosed);
            assert_eq!(payload["view"]["callback_id"], "review_modal");
        }
        other => panic!("Expected UnhandledEvent error, got {:?}", other),
    }
}

#[test]
fn test_closed_handler_never_sees_submissions() {
    let mut router = ViewRouter::new(&review_function());
    router.add_closed_handler("review_modal", |_ctx| async { reply(json!("closed")) });

    let submitted = EventContext::from_payload(view_event("view_submission", "review_modal"));
    match block_on(router.dispatch(submitted)) {
        Err(RouterError::UnhandledEvent { category, payload, .. }) => {
            assert_eq!(category, EventCategory::ViewSubmission);
            assert_eq!(payload["type"], "view_submission");
        }
        other => panic!("Expected UnhandledEvent error, got {:?}", other),
    }
}

#[test]
fn test_runtime_dispatches_raw_payloads() {
    let function = review_function();
    let mut actions = ActionRouter::new(&function);
    actions.add_handler("approve", |_ctx| async { reply(json!("approved")) });
    let mut views = ViewRouter::new(&function);
    views.add_submission_handler("review_modal", |_ctx| async { reply(json!("submitted")) });

    let runtime = FunctionRuntime::new(&function)
        .with_actions(actions)
        .with_views(views);
    assert_eq!(runtime.function_id(), "review");

    let event = InteractionEvent::from_json(block_actions_json("approve", "decision"))
        .expect("valid payload");
    assert_eq!(event.category(), EventCategory::BlockActions);
    let result = block_on(runtime.dispatch(EventContext::from_payload(event)));
    assert_eq!(result.expect("routed"), json!("approved"));

    let event = InteractionEvent::from_json(view_json("view_submission", "review_modal"))
        .expect("valid payload");
    let result = block_on(runtime.dispatch(EventContext::from_payload(event)));
    assert_eq!(result.expect("routed"), json!("submitted"));
}

#[test]
fn test_runtime_without_fallback_reports_unhandled() {
    let function = review_function();
    let runtime = FunctionRuntime::new(&function);

    let event = InteractionEvent::from_json(block_suggestion_json("assignee", "people", "a"))
        .expect("valid payload");
    match block_on(runtime.dispatch(EventContext::from_payload(event))) {
        Err(RouterError::UnhandledEvent {
            category, payload, ..
        }) => {
            assert_eq!(category, EventCategory::BlockSuggestion);
            assert_eq!(payload["action_id"], "assignee");
        }
        other => panic!("Expected UnhandledEvent error, got {:?}", other),
    }
}

#[test]
fn test_runtime_fallback_only_runs_when_nothing_matches() {
    let function = review_function();
    let mut actions = ActionRouter::new(&function);
    actions.add_handler("approve", |_ctx| async { reply(json!("approved")) });

    let runtime = FunctionRuntime::new(&function)
        .with_actions(actions)
        .with_unhandled_handler(|ctx| async move {
            reply(json!({ "fallback": ctx.payload().category().to_string() }))
        });

    let matched = InteractionEvent::from_json(block_actions_json("approve", "decision"))
        .expect("valid payload");
    let result = block_on(runtime.dispatch(EventContext::from_payload(matched)));
    assert_eq!(result.expect("routed"), json!("approved"));

    let unmatched = InteractionEvent::from_json(block_actions_json("escalate", "decision"))
        .expect("valid payload");
    let result = block_on(runtime.dispatch(EventContext::from_payload(unmatched)));
    assert_eq!(result.expect("fallback"), json!({ "fallback": "block_actions" }));

    // No view router is attached at all.
    let view = InteractionEvent::from_json(view_json("view_closed", "review_modal"))
        .expect("valid payload");
    let result = block_on(runtime.dispatch(EventContext::from_payload(view)));
    assert_eq!(result.expect("fallback"), json!({ "fallback": "view_closed" }));
}

#[test]
fn test_runtime_config_reaches_attached_routers() {
    let function = review_function();
    let mut actions = ActionRouter::new(&function);
    actions.add_handler("approve", |ctx| async move {
        reply(json!(ctx.client.base_url()))
    });

    let config = RuntimeConfig::default()
        .with_api_url("https://slack.example.test/api/")
        .expect("valid url");
    let runtime = FunctionRuntime::new(&function)
        .with_actions(actions)
        .with_config(config);

    let event = InteractionEvent::from_json(block_actions_json("approve", "decision"))
        .expect("valid payload");
    let result = block_on(runtime.dispatch(EventContext::from_payload(event)));
    assert_eq!(result.expect("routed"), json!("https://slack.example.test/api/"));
}

#[test]
fn test_malformed_payloads_are_rejected() {
    let cases = vec![
        json!({ "actions": [] }),
        json!({ "type": "shortcut" }),
        json!({ "type": "view_submission", "view": { "id": "V1" } }),
    ];
    for raw in cases {
        match InteractionEvent::from_json(raw.clone()) {
            Err(RouterError::MalformedPayload(_)) => {}
            other => panic!("Expected MalformedPayload for {}, got {:?}", raw, other),
        }
    }

    let mut empty = block_actions_json("approve", "decision");
    empty["actions"] = json!([]);
    match InteractionEvent::from_json(empty) {
        Err(RouterError::MalformedPayload(message)) => assert!(message.contains("no actions")),
        other => panic!("Expected MalformedPayload, got {:?}", other),
    }
}

#[test]
fn test_event_context_reads_envelope() {
    let context = EventContext::from_payload(view_event("view_submission", "review_modal"));
    assert_eq!(context.token, "xoxb-test");
    assert_eq!(context.team_id.as_deref(), Some("T0001"));
    assert_eq!(context.enterprise_id, None);
    assert_eq!(context.inputs()["ticket"], "T-42");

    let context = context.with_token("xoxp-user");
    assert_eq!(context.token, "xoxp-user");
}
