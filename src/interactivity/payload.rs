//! Inbound interaction payloads. Only the fields routing and handlers rely
//! on are typed; everything else is kept in `extra` so nothing is lost when a
//! payload is echoed back in an error.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// The function invocation an interaction belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionData {
    pub execution_id: String,
    pub function: FunctionIdentity,
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionIdentity {
    pub callback_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactor {
    pub id: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactivity {
    pub interactor: Interactor,
    pub interactivity_pointer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enterprise {
    pub id: String,
}

/// One interactive element event inside a `block_actions` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockAction {
    pub action_id: String,
    pub block_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_ts: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockActionsBody {
    pub actions: Vec<BlockAction>,
    pub function_data: FunctionData,
    pub interactivity: Interactivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<Enterprise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `block_actions` event narrowed to the action being routed.
///
/// Serializes as the raw `body`; `action` is always one of its `actions`.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub action: BlockAction,
    pub body: BlockActionsBody,
}

impl ActionEvent {
    pub fn new(action: BlockAction, body: BlockActionsBody) -> Self {
        Self { action, body }
    }

    /// Routes the first action of `body`, which is how the platform delivers them.
    pub fn first(body: BlockActionsBody) -> Option<Self> {
        let action = body.actions.first()?.clone();
        Some(Self { action, body })
    }
}

impl Serialize for ActionEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// A `block_suggestion` event: an external select asking for options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionEvent {
    pub action_id: String,
    pub block_id: String,
    #[serde(default)]
    pub value: String,
    pub function_data: FunctionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactivity: Option<Interactivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<Enterprise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEventKind {
    ViewSubmission,
    ViewClosed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    pub callback_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `view_submission` or `view_closed` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
    #[serde(rename = "type")]
    pub kind: ViewEventKind,
    pub view: View,
    pub function_data: FunctionData,
    pub interactivity: Interactivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cleared: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<Enterprise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Access to the envelope fields shared by every interaction payload.
pub trait InteractionPayload: Send + 'static {
    fn function_data(&self) -> &FunctionData;
    fn bot_access_token(&self) -> Option<&str>;
    fn team_id(&self) -> Option<&str>;
    fn enterprise_id(&self) -> Option<&str>;
}

macro_rules! impl_interaction_payload {
    ($ty:ty, |$p:ident| $envelope:expr) => {
        impl InteractionPayload for $ty {
            fn function_data(&self) -> &FunctionData {
                let $p = self;
                &$envelope.function_data
            }
            fn bot_access_token(&self) -> Option<&str> {
                let $p = self;
                $envelope.bot_access_token.as_deref()
            }
            fn team_id(&self) -> Option<&str> {
                let $p = self;
                $envelope.team.as_ref().map(|t| t.id.as_str())
            }
            fn enterprise_id(&self) -> Option<&str> {
                let $p = self;
                $envelope.enterprise.as_ref().map(|e| e.id.as_str())
            }
        }
    };
}

impl_interaction_payload!(ActionEvent, |p| p.body);
impl_interaction_payload!(SuggestionEvent, |p| p);
impl_interaction_payload!(ViewEvent, |p| p);
