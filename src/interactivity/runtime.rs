use super::EventCategory;
use super::block::{ActionRouter, SuggestionRouter};
use super::context::{EventContext, HandlerContext};
use super::payload::{
    ActionEvent, BlockActionsBody, FunctionData, InteractionPayload, SuggestionEvent, ViewEvent,
};
use super::route::{self, Handler, HandlerResult};
use super::view::ViewRouter;
use crate::config::RuntimeConfig;
use crate::declaration::FunctionDefinition;
use crate::error::RouterError;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Any interaction event a function can receive.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InteractionEvent {
    BlockActions(ActionEvent),
    BlockSuggestion(SuggestionEvent),
    View(ViewEvent),
}

impl InteractionEvent {
    /// Decodes a raw payload, dispatching on its `type` field.
    pub fn from_json(value: Value) -> Result<Self, RouterError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| RouterError::MalformedPayload("missing 'type' field".to_string()))?
            .to_string();
        let malformed = |e: serde_json::Error| {
            RouterError::MalformedPayload(format!("invalid {} payload: {}", kind, e))
        };

        match kind.as_str() {
            "block_actions" => {
                let body: BlockActionsBody = serde_json::from_value(value).map_err(malformed)?;
                ActionEvent::first(body)
                    .map(InteractionEvent::BlockActions)
                    .ok_or_else(|| {
                        RouterError::MalformedPayload(
                            "block_actions payload carries no actions".to_string(),
                        )
                    })
            }
            "block_suggestion" => serde_json::from_value(value)
                .map(InteractionEvent::BlockSuggestion)
                .map_err(malformed),
            "view_submission" | "view_closed" => serde_json::from_value(value)
                .map(InteractionEvent::View)
                .map_err(malformed),
            other => Err(RouterError::MalformedPayload(format!(
                "unsupported event type '{}'",
                other
            ))),
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            InteractionEvent::BlockActions(_) => EventCategory::BlockActions,
            InteractionEvent::BlockSuggestion(_) => EventCategory::BlockSuggestion,
            InteractionEvent::View(event) => event.kind.into(),
        }
    }

    fn payload(&self) -> &dyn InteractionPayload {
        match self {
            InteractionEvent::BlockActions(event) => event,
            InteractionEvent::BlockSuggestion(event) => event,
            InteractionEvent::View(event) => event,
        }
    }
}

impl InteractionPayload for InteractionEvent {
    fn function_data(&self) -> &FunctionData {
        self.payload().function_data()
    }

    fn bot_access_token(&self) -> Option<&str> {
        self.payload().bot_access_token()
    }

    fn team_id(&self) -> Option<&str> {
        self.payload().team_id()
    }

    fn enterprise_id(&self) -> Option<&str> {
        self.payload().enterprise_id()
    }
}

/// Every router of one function plus an optional fallback for events none
/// of them handle.
pub struct FunctionRuntime {
    function_id: String,
    actions: Option<ActionRouter>,
    suggestions: Option<SuggestionRouter>,
    views: Option<ViewRouter>,
    unhandled: Option<Handler<InteractionEvent>>,
    config: RuntimeConfig,
}

impl FunctionRuntime {
    pub fn new(function: &FunctionDefinition) -> Self {
        Self {
            function_id: function.callback_id.clone(),
            actions: None,
            suggestions: None,
            views: None,
            unhandled: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Sets the configuration used by this runtime and every attached router.
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.actions = self.actions.map(|r| r.with_config(config.clone()));
        self.suggestions = self.suggestions.map(|r| r.with_config(config.clone()));
        self.views = self.views.map(|r| r.with_config(config.clone()));
        self.config = config;
        self
    }

    pub fn with_actions(mut self, router: ActionRouter) -> Self {
        self.actions = Some(router.with_config(self.config.clone()));
        self
    }

    pub fn with_suggestions(mut self, router: SuggestionRouter) -> Self {
        self.suggestions = Some(router.with_config(self.config.clone()));
        self
    }

    pub fn with_views(mut self, router: ViewRouter) -> Self {
        self.views = Some(router.with_config(self.config.clone()));
        self
    }

    /// Handler invoked when no router matches an event.
    pub fn with_unhandled_handler<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(HandlerContext<InteractionEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.unhandled = Some(route::handler(f));
        self
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    /// Routes the event to the matching router, or to the fallback handler
    /// when no route of that router matches.
    pub async fn dispatch(
        &self,
        event: EventContext<InteractionEvent>,
    ) -> Result<Value, RouterError> {
        let (payload, envelope) = event.into_parts();
        let payload = match payload {
            InteractionEvent::BlockActions(p) => {
                if let Some(router) = self.actions.as_ref().filter(|r| r.handles(&p)) {
                    return router.dispatch(envelope.with_payload(p)).await;
                }
                InteractionEvent::BlockActions(p)
            }
            InteractionEvent::BlockSuggestion(p) => {
                if let Some(router) = self.suggestions.as_ref().filter(|r| r.handles(&p)) {
                    return router.dispatch(envelope.with_payload(p)).await;
                }
                InteractionEvent::BlockSuggestion(p)
            }
            InteractionEvent::View(p) => {
                if let Some(router) = self.views.as_ref().filter(|r| r.handles(&p)) {
                    return router.dispatch(envelope.with_payload(p)).await;
                }
                InteractionEvent::View(p)
            }
        };
        self.fallback(envelope.with_payload(payload)).await
    }

    async fn fallback(&self, event: EventContext<InteractionEvent>) -> Result<Value, RouterError> {
        let category = event.payload.category();
        match &self.unhandled {
            Some(handler) => {
                debug!(
                    %category,
                    function = %self.function_id,
                    "no route matched, using fallback handler"
                );
                handler(HandlerContext::enrich(event, &self.config))
                    .await
                    .map_err(|source| RouterError::HandlerFailed { category, source })
            }
            None => Err(route::unhandled(
                category,
                &self.function_id,
                &event.payload,
            )),
        }
    }
}
