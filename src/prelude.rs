//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the shinsei crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use shinsei::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let app = ApplicationDeclaration::new("Example", "An example app", "icon.png")
//!     .function(FunctionDefinition::new("greet", "Greet", "functions/greet.ts"));
//!
//! let document = ManifestCompiler::new(app).compile()?;
//! std::fs::write("manifest.json", document.to_json_pretty()?)?;
//! # Ok(())
//! # }
//! ```

// Declarations and compilation
pub use crate::declaration::{
    CustomEvent, CustomType, DatastoreDefinition, Declaration, FunctionDefinition,
    IntoApplication, JwtOptions, OAuth2Options, OAuth2ProviderType, ProviderDefinition,
    WidgetDefinition, WorkflowDefinition,
};
pub use crate::manifest::{
    ApplicationDeclaration, ConfigurationDocument, ManifestCompiler, RuntimeMode,
};

// Parameter schemas
pub use crate::schema::builtin;
pub use crate::schema::{
    ObjectParameter, ParameterDefinition, ParameterSet, RuntimeShape, resolve_runtime_type,
};

// Interactivity routing
pub use crate::interactivity::{
    ActionEvent, ActionRouter, BlockConstraint, EventContext, FieldMatcher, FunctionRuntime,
    HandlerContext, HandlerResult, InteractionEvent, SuggestionEvent, SuggestionRouter,
    ViewConstraint, ViewEvent, ViewRouter,
};

// Configuration and error types
pub use crate::config::RuntimeConfig;
pub use crate::error::{ConversionError, HandlerError, ManifestError, RouterError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
