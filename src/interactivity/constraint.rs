use super::payload::{ActionEvent, SuggestionEvent, ViewEvent};
use regex::Regex;

/// Matches a single string field of an incoming event.
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    Exact(String),
    /// Matches if the field equals any candidate.
    AnyOf(Vec<String>),
    /// Matches if the pattern finds a match anywhere in the field.
    Pattern(Regex),
}

impl FieldMatcher {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(FieldMatcher::Pattern)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldMatcher::Exact(expected) => expected == value,
            FieldMatcher::AnyOf(candidates) => candidates.iter().any(|c| c == value),
            FieldMatcher::Pattern(regex) => regex.is_match(value),
        }
    }
}

impl From<&str> for FieldMatcher {
    fn from(value: &str) -> Self {
        FieldMatcher::Exact(value.to_string())
    }
}

impl From<String> for FieldMatcher {
    fn from(value: String) -> Self {
        FieldMatcher::Exact(value)
    }
}

impl From<Vec<String>> for FieldMatcher {
    fn from(values: Vec<String>) -> Self {
        FieldMatcher::AnyOf(values)
    }
}

impl From<Vec<&str>> for FieldMatcher {
    fn from(values: Vec<&str>) -> Self {
        FieldMatcher::AnyOf(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldMatcher {
    fn from(values: [&str; N]) -> Self {
        FieldMatcher::AnyOf(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<Regex> for FieldMatcher {
    fn from(regex: Regex) -> Self {
        FieldMatcher::Pattern(regex)
    }
}

// Lets a bare matcher stand in for a constraint on the event's default field.
macro_rules! bare_matcher_conversions {
    ($constraint:ident, $field:ident) => {
        impl From<FieldMatcher> for $constraint {
            fn from(matcher: FieldMatcher) -> Self {
                $constraint::new().$field(matcher)
            }
        }
        impl From<&str> for $constraint {
            fn from(value: &str) -> Self {
                $constraint::new().$field(value)
            }
        }
        impl From<String> for $constraint {
            fn from(value: String) -> Self {
                $constraint::new().$field(value)
            }
        }
        impl From<Vec<&str>> for $constraint {
            fn from(values: Vec<&str>) -> Self {
                $constraint::new().$field(values)
            }
        }
        impl From<Vec<String>> for $constraint {
            fn from(values: Vec<String>) -> Self {
                $constraint::new().$field(values)
            }
        }
        impl<const N: usize> From<[&str; N]> for $constraint {
            fn from(values: [&str; N]) -> Self {
                $constraint::new().$field(values)
            }
        }
        impl From<Regex> for $constraint {
            fn from(regex: Regex) -> Self {
                $constraint::new().$field(regex)
            }
        }
    };
}

/// Decides whether a route applies to an event.
pub trait Constraint<E>: Send + Sync {
    fn matches(&self, event: &E) -> bool;
}

/// Constraint on the `action_id` and `block_id` of a block element.
///
/// Every field that is set must match; unset fields match anything. A bare
/// matcher converts into a constraint on `action_id` alone.
#[derive(Debug, Clone, Default)]
pub struct BlockConstraint {
    pub action_id: Option<FieldMatcher>,
    pub block_id: Option<FieldMatcher>,
}

impl BlockConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action_id(mut self, matcher: impl Into<FieldMatcher>) -> Self {
        self.action_id = Some(matcher.into());
        self
    }

    pub fn block_id(mut self, matcher: impl Into<FieldMatcher>) -> Self {
        self.block_id = Some(matcher.into());
        self
    }

    pub fn matches_fields(&self, action_id: &str, block_id: &str) -> bool {
        field_matches(&self.action_id, action_id) && field_matches(&self.block_id, block_id)
    }
}

bare_matcher_conversions!(BlockConstraint, action_id);

impl Constraint<ActionEvent> for BlockConstraint {
    fn matches(&self, event: &ActionEvent) -> bool {
        self.matches_fields(&event.action.action_id, &event.action.block_id)
    }
}

impl Constraint<SuggestionEvent> for BlockConstraint {
    fn matches(&self, event: &SuggestionEvent) -> bool {
        self.matches_fields(&event.action_id, &event.block_id)
    }
}

/// Constraint on the `callback_id` of a view. A bare matcher converts into
/// a constraint on `callback_id`.
#[derive(Debug, Clone, Default)]
pub struct ViewConstraint {
    pub callback_id: Option<FieldMatcher>,
}

impl ViewConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback_id(mut self, matcher: impl Into<FieldMatcher>) -> Self {
        self.callback_id = Some(matcher.into());
        self
    }
}

bare_matcher_conversions!(ViewConstraint, callback_id);

impl Constraint<ViewEvent> for ViewConstraint {
    fn matches(&self, event: &ViewEvent) -> bool {
        field_matches(&self.callback_id, &event.view.callback_id)
    }
}

fn field_matches(matcher: &Option<FieldMatcher>, value: &str) -> bool {
    matcher.as_ref().is_none_or(|m| m.matches(value))
}
