//! Common test utilities for building declarations and interaction payloads.
use serde_json::{Value, json};
use shinsei::interactivity::BlockActionsBody;
use shinsei::prelude::*;
use std::sync::Arc;

/// A function taking a ticket id and returning whether it was approved.
#[allow(dead_code)]
pub fn review_function() -> FunctionDefinition {
    FunctionDefinition::new("review", "Review", "functions/review.ts")
        .with_description("Reviews a ticket")
        .with_input_parameters(
            ParameterSet::new()
                .property("ticket", ParameterDefinition::string().title("Ticket"))
                .required(["ticket"]),
        )
        .with_output_parameters(
            ParameterSet::new().property("approved", ParameterDefinition::boolean()),
        )
}

/// A minimal hosted application declaring only `review_function`.
#[allow(dead_code)]
pub fn simple_app() -> ApplicationDeclaration {
    ApplicationDeclaration::new("Reviews", "Reviews tickets", "assets/icon.png")
        .bot_scopes(["commands", "chat:write"])
        .function(review_function())
}

/// `ticket = { id: string, reporter?: user }` where `user = { name: string }`.
/// Neither type is declared on any application.
#[allow(dead_code)]
pub fn nested_types() -> (CustomType, CustomType) {
    let user = CustomType::new(
        "user",
        ParameterDefinition::object(
            ObjectParameter::new()
                .property("name", ParameterDefinition::string())
                .required(["name"]),
        ),
    );
    let ticket = CustomType::new(
        "ticket",
        ParameterDefinition::object(
            ObjectParameter::new()
                .property("id", ParameterDefinition::string())
                .property("reporter", ParameterDefinition::custom(&user))
                .required(["id"]),
        ),
    );
    (ticket, user)
}

/// `node_a = { next: node_b }` and `node_b = { back: node_a }`.
#[allow(dead_code)]
pub fn cyclic_types() -> (CustomType, CustomType) {
    let a = CustomType::declare("node_a");
    let b = CustomType::declare("node_b");
    a.define(ParameterDefinition::object(
        ObjectParameter::new().property("next", ParameterDefinition::custom(&b)),
    ))
    .expect("node_a is defined once");
    b.define(ParameterDefinition::object(
        ObjectParameter::new().property("back", ParameterDefinition::custom(&a)),
    ))
    .expect("node_b is defined once");
    (a, b)
}

#[allow(dead_code)]
pub fn shared(function: FunctionDefinition) -> Arc<FunctionDefinition> {
    Arc::new(function)
}

/// Wraps a value into a successful handler result.
#[allow(dead_code)]
pub fn reply(value: Value) -> HandlerResult {
    Ok(value)
}

#[allow(dead_code)]
fn envelope() -> Value {
    json!({
        "function_data": {
            "execution_id": "Fx0001",
            "function": { "callback_id": "review" },
            "inputs": { "ticket": "T-42" }
        },
        "interactivity": {
            "interactor": { "id": "U0001", "secret": "secret" },
            "interactivity_pointer": "pointer"
        },
        "bot_access_token": "xoxb-test",
        "team": { "id": "T0001" }
    })
}

#[allow(dead_code)]
fn with_envelope(mut payload: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (payload.as_object_mut(), envelope()) {
        target.extend(fields);
    }
    payload
}

/// A raw `block_actions` payload carrying a single button click.
#[allow(dead_code)]
pub fn block_actions_json(action_id: &str, block_id: &str) -> Value {
    with_envelope(json!({
        "type": "block_actions",
        "actions": [{
            "action_id": action_id,
            "block_id": block_id,
            "type": "button",
            "value": "clicked",
            "action_ts": "1700000000.000100"
        }]
    }))
}

#[allow(dead_code)]
pub fn action_event(action_id: &str, block_id: &str) -> ActionEvent {
    let body: BlockActionsBody = serde_json::from_value(block_actions_json(action_id, block_id))
        .expect("fixture is a valid block_actions body");
    ActionEvent::first(body).expect("fixture carries one action")
}

#[allow(dead_code)]
pub fn block_suggestion_json(action_id: &str, block_id: &str, value: &str) -> Value {
    with_envelope(json!({
        "type": "block_suggestion",
        "action_id": action_id,
        "block_id": block_id,
        "value": value
    }))
}

#[allow(dead_code)]
pub fn suggestion_event(action_id: &str, block_id: &str, value: &str) -> SuggestionEvent {
    serde_json::from_value(block_suggestion_json(action_id, block_id, value))
        .expect("fixture is a valid block_suggestion payload")
}

/// A raw view payload; `kind` is `view_submission` or `view_closed`.
#[allow(dead_code)]
pub fn view_json(kind: &str, callback_id: &str) -> Value {
    with_envelope(json!({
        "type": kind,
        "view": {
            "id": "V0001",
            "callback_id": callback_id,
            "private_metadata": "{}",
            "state": { "values": {} }
        }
    }))
}

#[allow(dead_code)]
pub fn view_event(kind: &str, callback_id: &str) -> ViewEvent {
    serde_json::from_value(view_json(kind, callback_id)).expect("fixture is a valid view payload")
}
