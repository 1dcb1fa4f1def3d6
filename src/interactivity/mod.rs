//! Routing of interactivity events (block actions, block suggestions and
//! view events) raised while a function runs.
//!
//! Each router holds an ordered list of routes. A route pairs a
//! [`Constraint`] with a handler and the first route whose constraint matches
//! the event receives it. Events no route matches are reported as
//! [`RouterError::UnhandledEvent`](crate::error::RouterError::UnhandledEvent)
//! unless a [`FunctionRuntime`] fallback handler is installed.

pub mod block;
pub mod constraint;
pub mod context;
pub mod payload;
pub mod route;
pub mod runtime;
pub mod view;

pub use block::*;
pub use constraint::*;
pub use context::*;
pub use payload::*;
pub use route::{Handler, HandlerResult, RouteTable, handler};
pub use runtime::*;
pub use view::*;

use std::fmt;

/// The kind of interaction event being routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    BlockActions,
    BlockSuggestion,
    ViewSubmission,
    ViewClosed,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::BlockActions => "block_actions",
            EventCategory::BlockSuggestion => "block_suggestion",
            EventCategory::ViewSubmission => "view_submission",
            EventCategory::ViewClosed => "view_closed",
        };
        write!(f, "{}", name)
    }
}
