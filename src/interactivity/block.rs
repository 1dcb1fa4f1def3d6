use super::EventCategory;
use super::constraint::{BlockConstraint, Constraint};
use super::context::{EventContext, HandlerContext};
use super::payload::{ActionEvent, InteractionPayload, SuggestionEvent};
use super::route::{self, HandlerResult, RouteTable};
use crate::config::RuntimeConfig;
use crate::declaration::FunctionDefinition;
use crate::error::RouterError;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Payloads routed on a block element's `action_id` / `block_id`.
pub trait BlockPayload: InteractionPayload + Serialize {
    const CATEGORY: EventCategory;
}

impl BlockPayload for ActionEvent {
    const CATEGORY: EventCategory = EventCategory::BlockActions;
}

impl BlockPayload for SuggestionEvent {
    const CATEGORY: EventCategory = EventCategory::BlockSuggestion;
}

/// Routes block element events of one function to the first matching handler.
pub struct BlockRouter<P> {
    function_id: String,
    routes: RouteTable<BlockConstraint, P>,
    config: RuntimeConfig,
}

/// Router for `block_actions` events (button clicks, selections, ...).
pub type ActionRouter = BlockRouter<ActionEvent>;

/// Router for `block_suggestion` events (external select option queries).
pub type SuggestionRouter = BlockRouter<SuggestionEvent>;

impl<P> BlockRouter<P>
where
    P: BlockPayload,
    BlockConstraint: Constraint<P>,
{
    pub fn new(function: &FunctionDefinition) -> Self {
        Self {
            function_id: function.callback_id.clone(),
            routes: RouteTable::new(),
            config: RuntimeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers `f` for events matching `constraint`. Routes are tried in
    /// the order they were added.
    pub fn add_handler<C, F, Fut>(&mut self, constraint: C, f: F) -> &mut Self
    where
        C: Into<BlockConstraint>,
        F: Fn(HandlerContext<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.routes.push(constraint.into(), route::handler(f));
        self
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Whether some registered route would handle `payload`.
    pub fn handles(&self, payload: &P) -> bool {
        self.routes.find(payload).is_some()
    }

    /// Invokes the first handler whose constraint matches the event.
    pub async fn dispatch(&self, event: EventContext<P>) -> Result<Value, RouterError> {
        match self.routes.find(&event.payload) {
            Some((index, handler)) => {
                route::invoke(
                    P::CATEGORY,
                    &self.function_id,
                    index,
                    handler,
                    event,
                    &self.config,
                )
                .await
            }
            None => Err(route::unhandled(
                P::CATEGORY,
                &self.function_id,
                &event.payload,
            )),
        }
    }
}
