use crate::declaration::Category;
use crate::interactivity::EventCategory;
use thiserror::Error;

/// Boxed error returned by interaction handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while compiling an application into its manifest.
#[derive(Error, Debug, Clone)]
pub enum ManifestError {
    #[error("Duplicate {category} id '{id}' found in the application declaration:\n{diff}")]
    DuplicateIdentifier {
        category: Category,
        id: String,
        diff: String,
    },

    #[error("Failed to serialize {category} '{id}': {message}")]
    Serialization {
        category: Category,
        id: String,
        message: String,
    },
}

/// Errors that can occur while dispatching an interaction event to a handler.
#[derive(Error, Debug)]
pub enum RouterError {
    /// `payload` is the event as received, e.g. a `block_actions` body with
    /// its full `actions` array.
    #[error(
        "Received {category} event for function '{function_id}', but no registered handler matched it: {payload}"
    )]
    UnhandledEvent {
        category: EventCategory,
        function_id: String,
        payload: serde_json::Value,
    },

    #[error("Handler for {category} event failed: {source}")]
    HandlerFailed {
        category: EventCategory,
        #[source]
        source: HandlerError,
    },

    #[error("Malformed interaction payload: {0}")]
    MalformedPayload(String),
}

/// Errors that can occur when converting a custom user format into a `ApplicationDeclaration`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Failed to parse application JSON: {0}")]
    JsonParseError(String),

    #[error("Parameter '{parameter}' references unknown type '{type_name}'")]
    UnknownType { parameter: String, type_name: String },

    #[error("Workflow '{workflow}' step {step} references unknown function '{function_id}'")]
    UnknownFunction {
        workflow: String,
        step: usize,
        function_id: String,
    },

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised while reading configuration or installing the log subscriber.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for environment variable '{name}': {message}")]
    InvalidEnv { name: String, message: String },

    #[error("Failed to initialize tracing: {0}")]
    Tracing(String),
}
