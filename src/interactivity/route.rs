use super::EventCategory;
use super::constraint::Constraint;
use super::context::{EventContext, HandlerContext};
use crate::config::RuntimeConfig;
use crate::error::{HandlerError, RouterError};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a handler resolves to. The value becomes the reply to the event.
pub type HandlerResult = Result<Value, HandlerError>;

/// A type-erased, shareable async handler.
pub type Handler<P> =
    Arc<dyn Fn(HandlerContext<P>) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Wraps an async closure into a [`Handler`]. Synchronous handlers can
/// return `futures::future::ready(..)`.
pub fn handler<P, F, Fut>(f: F) -> Handler<P>
where
    P: 'static,
    F: Fn(HandlerContext<P>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |context| f(context).boxed())
}

pub struct Route<C, P> {
    pub constraint: C,
    pub handler: Handler<P>,
}

/// Routes in registration order. Lookup returns the first match.
pub struct RouteTable<C, P> {
    routes: Vec<Route<C, P>>,
}

impl<C, P> Default for RouteTable<C, P> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<C, P> RouteTable<C, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: C, handler: Handler<P>) {
        self.routes.push(Route {
            constraint,
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> &[Route<C, P>] {
        &self.routes
    }

    /// The index and handler of the first route whose constraint matches `event`.
    pub fn find<E>(&self, event: &E) -> Option<(usize, &Handler<P>)>
    where
        C: Constraint<E>,
    {
        self.routes
            .iter()
            .enumerate()
            .find(|(_, route)| route.constraint.matches(event))
            .map(|(index, route)| (index, &route.handler))
    }
}

/// Enriches `event` and awaits `handler` on it.
pub(crate) async fn invoke<P>(
    category: EventCategory,
    function_id: &str,
    route_index: usize,
    handler: &Handler<P>,
    event: EventContext<P>,
    config: &RuntimeConfig,
) -> Result<Value, RouterError> {
    debug!(%category, function = function_id, route = route_index, "dispatching to handler");
    handler(HandlerContext::enrich(event, config))
        .await
        .map_err(|source| RouterError::HandlerFailed { category, source })
}

/// Builds the error for an event no route matched.
pub(crate) fn unhandled<P: Serialize>(
    category: EventCategory,
    function_id: &str,
    payload: &P,
) -> RouterError {
    warn!(%category, function = function_id, "no handler matched interaction event");
    RouterError::UnhandledEvent {
        category,
        function_id: function_id.to_string(),
        payload: serde_json::to_value(payload).unwrap_or(Value::Null),
    }
}
