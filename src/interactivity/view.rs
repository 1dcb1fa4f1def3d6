use super::EventCategory;
use super::constraint::{Constraint, ViewConstraint};
use super::context::{EventContext, HandlerContext};
use super::payload::{ViewEvent, ViewEventKind};
use super::route::{self, HandlerResult, RouteTable};
use crate::config::RuntimeConfig;
use crate::declaration::FunctionDefinition;
use crate::error::RouterError;
use serde_json::Value;
use std::future::Future;

/// A view constraint bound to one event kind, so submission handlers never
/// see `view_closed` events and the other way round.
#[derive(Debug, Clone)]
pub struct ViewRoute {
    pub kind: ViewEventKind,
    pub constraint: ViewConstraint,
}

impl Constraint<ViewEvent> for ViewRoute {
    fn matches(&self, event: &ViewEvent) -> bool {
        self.kind == event.kind && self.constraint.matches(event)
    }
}

impl From<ViewEventKind> for EventCategory {
    fn from(kind: ViewEventKind) -> Self {
        match kind {
            ViewEventKind::ViewSubmission => EventCategory::ViewSubmission,
            ViewEventKind::ViewClosed => EventCategory::ViewClosed,
        }
    }
}

/// Routes `view_submission` and `view_closed` events of one function.
pub struct ViewRouter {
    function_id: String,
    routes: RouteTable<ViewRoute, ViewEvent>,
    config: RuntimeConfig,
}

impl ViewRouter {
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

    pub fn add_submission_handler<C, F, Fut>(&mut self, constraint: C, f: F) -> &mut Self
    where
        C: Into<ViewConstraint>,
        F: Fn(HandlerContext<ViewEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.add(ViewEventKind::ViewSubmission, constraint.into(), f)
    }

    pub fn add_closed_handler<C, F, Fut>(&mut self, constraint: C, f: F) -> &mut Self
    where
        C: Into<ViewConstraint>,
        F: Fn(HandlerContext<ViewEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.add(ViewEventKind::ViewClosed, constraint.into(), f)
    }

    fn add<F, Fut>(&mut self, kind: ViewEventKind, constraint: ViewConstraint, f: F) -> &mut Self
    where
        F: Fn(HandlerContext<ViewEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.routes
            .push(ViewRoute { kind, constraint }, route::handler(f));
        self
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn handles(&self, payload: &ViewEvent) -> bool {
        self.routes.find(payload).is_some()
    }

    /// Invokes the first handler registered for the event's kind whose
    /// constraint matches.
    pub async fn dispatch(&self, event: EventContext<ViewEvent>) -> Result<Value, RouterError> {
        let category = EventCategory::from(event.payload.kind);
        match self.routes.find(&event.payload) {
            Some((index, handler)) => {
                route::invoke(
                    category,
                    &self.function_id,
                    index,
                    handler,
                    event,
                    &self.config,
                )
                .await
            }
            None => Err(route::unhandled(
                category,
                &self.function_id,
                &event.payload,
            )),
        }
    }
}
