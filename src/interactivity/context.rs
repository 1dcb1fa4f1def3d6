use super::payload::InteractionPayload;
use crate::config::RuntimeConfig;
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::ops::Deref;

/// What the external runtime hands the router for one event.
#[derive(Debug, Clone)]
pub struct EventContext<P> {
    pub payload: P,
    /// Token the handler should act with.
    pub token: String,
    pub team_id: Option<String>,
    pub enterprise_id: Option<String>,
    pub env: AHashMap<String, String>,
}

impl<P: InteractionPayload> EventContext<P> {
    /// Builds a context from the envelope fields of `payload`.
    pub fn from_payload(payload: P) -> Self {
        let token = payload.bot_access_token().unwrap_or_default().to_string();
        let team_id = payload.team_id().map(str::to_string);
        let enterprise_id = payload.enterprise_id().map(str::to_string);
        Self {
            payload,
            token,
            team_id,
            enterprise_id,
            env: AHashMap::new(),
        }
    }

    /// The inputs the surrounding function was invoked with.
    pub fn inputs(&self) -> &Map<String, Value> {
        &self.payload.function_data().inputs
    }
}

impl<P> EventContext<P> {
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn with_env(mut self, env: AHashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Splits the payload from the rest of the envelope.
    pub(crate) fn into_parts(self) -> (P, EventContext<()>) {
        let envelope = EventContext {
            payload: (),
            token: self.token,
            team_id: self.team_id,
            enterprise_id: self.enterprise_id,
            env: self.env,
        };
        (self.payload, envelope)
    }
}

impl EventContext<()> {
    pub(crate) fn with_payload<Q>(self, payload: Q) -> EventContext<Q> {
        EventContext {
            payload,
            token: self.token,
            team_id: self.team_id,
            enterprise_id: self.enterprise_id,
            env: self.env,
        }
    }
}

/// A Web API client bound to the token of the event being handled.
/// Requests themselves are made by the caller; this only carries the
/// credentials and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    token: String,
    base_url: String,
}

impl ApiClient {
    pub fn new(token: &str, base_url: &str) -> Self {
        Self {
            token: token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a Web API method, e.g. `chat.postMessage`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}{}", self.base_url, method)
    }
}

/// The context a handler receives: the event context plus an API client.
#[derive(Debug, Clone)]
pub struct HandlerContext<P> {
    pub event: EventContext<P>,
    pub client: ApiClient,
}

impl<P> HandlerContext<P> {
    /// Enriches `event` with a client. Configured env vars are added unless
    /// the event already carries a value for them.
    pub fn enrich(mut event: EventContext<P>, config: &RuntimeConfig) -> Self {
        for (name, value) in &config.env {
            event
                .env
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        let client = ApiClient::new(&event.token, &config.api_url);
        Self { event, client }
    }

    pub fn payload(&self) -> &P {
        &self.event.payload
    }
}

impl<P> Deref for HandlerContext<P> {
    type Target = EventContext<P>;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}
