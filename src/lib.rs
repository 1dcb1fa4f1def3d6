//! # Shinsei - Application Manifest Compiler and Interaction Router
//!
//! **Shinsei** turns a typed, in-memory declaration of a workflow application
//! (its functions, workflows, custom types, datastores, events, auth providers
//! and widgets) into the canonical configuration document the platform
//! consumes. It also routes the interactivity events those functions raise at
//! runtime to the handlers registered for them.
//!
//! ## Core Workflow
//!
//! 1.  **Declare**: Build an [`ApplicationDeclaration`](manifest::ApplicationDeclaration)
//!     in code, or implement [`IntoApplication`](declaration::IntoApplication) for your own
//!     project format.
//! 2.  **Compile**: Hand it to [`ManifestCompiler::builder`](manifest::ManifestCompiler::builder).
//!     The compiler discovers every custom type the declarations reference,
//!     exports each category into an id-keyed section, rejects duplicate ids
//!     and applies the defaults of the selected runtime mode.
//! 3.  **Route**: Register handlers on an [`ActionRouter`](interactivity::ActionRouter),
//!     [`SuggestionRouter`](interactivity::SuggestionRouter) or
//!     [`ViewRouter`](interactivity::ViewRouter) and dispatch incoming events to them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shinsei::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     // 1. Declare a custom type, a function using it and a workflow calling the function.
//!     let incident = CustomType::new(
//!         "incident",
//!         ParameterDefinition::object(
//!             ObjectParameter::new()
//!                 .property("summary", ParameterDefinition::string())
//!                 .property("severity", ParameterDefinition::integer())
//!                 .required(["summary"]),
//!         ),
//!     );
//!
//!     let report = Arc::new(
//!         FunctionDefinition::new("report_incident", "Report incident", "functions/report.ts")
//!             .with_input_parameters(
//!                 ParameterSet::new().property("incident", ParameterDefinition::custom(&incident)),
//!             ),
//!     );
//!
//!     let mut workflow = WorkflowDefinition::new("triage", "Triage");
//!     workflow.add_step(&report, Default::default());
//!
//!     let app = ApplicationDeclaration::new("Incidents", "Tracks incidents", "assets/icon.png")
//!         .bot_scopes(["commands", "chat:write"])
//!         .workflow(workflow);
//!
//!     // 2. Compile. The function and the type are discovered through the workflow.
//!     let compiler = ManifestCompiler::builder(app).build();
//!     let document = compiler.compile()?;
//!     println!("{}", document.to_json_pretty()?);
//!
//!     // 3. Route the button clicks raised by the function.
//!     let mut router = ActionRouter::new(&report);
//!     router.add_handler("approve", |ctx: HandlerContext<ActionEvent>| async move {
//!         HandlerResult::Ok(serde_json::json!({ "approved_by": ctx.payload().body.interactivity.interactor.id }))
//!     });
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod declaration;
pub mod error;
pub mod interactivity;
pub mod logging;
pub mod manifest;
pub mod prelude;
pub mod schema;
