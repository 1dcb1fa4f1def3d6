use ahash::AHashMap;
use clap::Parser;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use shinsei::logging::init_tracing;
use shinsei::prelude::*;
use shinsei::schema::{ArrayParameter, ParameterKind, PrimitiveConstraints, PrimitiveType};
use std::fs;
use std::result::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the `app.json` project format and are only used here for conversion.

#[derive(Deserialize)]
struct RawApp {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    runtime: Option<String>,
    #[serde(default)]
    bot_scopes: Vec<String>,
    #[serde(default)]
    outgoing_domains: Vec<String>,
    #[serde(default)]
    types: IndexMap<String, RawParameter>,
    #[serde(default)]
    functions: IndexMap<String, RawFunction>,
    #[serde(default)]
    workflows: IndexMap<String, RawWorkflow>,
    #[serde(default)]
    datastores: IndexMap<String, RawDatastore>,
    #[serde(default)]
    events: IndexMap<String, RawParameter>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    #[serde(rename = "type")]
    type_name: String,
    title: Option<String>,
    description: Option<String>,
    hint: Option<String>,
    default: Option<Value>,
    examples: Option<Vec<Value>>,
    #[serde(rename = "enum")]
    enumeration: Option<Vec<Value>>,
    choices: Option<Vec<Value>>,
    min_length: Option<u64>,
    max_length: Option<u64>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    format: Option<String>,
    properties: Option<IndexMap<String, RawParameter>>,
    required: Option<Vec<String>>,
    additional_properties: Option<bool>,
    items: Option<Box<RawParameter>>,
    min_items: Option<u64>,
    max_items: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RawParameterSet {
    #[serde(default)]
    properties: IndexMap<String, RawParameter>,
    #[serde(default)]
    required: Vec<String>,
}

#[derive(Deserialize)]
struct RawFunction {
    title: String,
    description: Option<String>,
    source_file: String,
    input_parameters: Option<RawParameterSet>,
    output_parameters: Option<RawParameterSet>,
}

#[derive(Deserialize)]
struct RawWorkflow {
    title: String,
    description: Option<String>,
    input_parameters: Option<RawParameterSet>,
    output_parameters: Option<RawParameterSet>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Deserialize)]
struct RawStep {
    function_id: String,
    #[serde(default)]
    inputs: IndexMap<String, Value>,
}

#[derive(Deserialize)]
struct RawDatastore {
    primary_key: String,
    #[serde(default)]
    attributes: IndexMap<String, RawParameter>,
    time_to_live_attribute: Option<String>,
}

const TYPE_REFERENCE_PREFIX: &str = "#/types/";
const FUNCTION_REFERENCE_PREFIX: &str = "#/functions/";

// --- Converter Implementation ---
// Custom types are declared before any of them is defined so definitions
// can reference each other in any order, cycles included.

struct TypeScope {
    types: AHashMap<String, CustomType>,
}

impl TypeScope {
    fn resolve(
        &self,
        parameter: &str,
        raw: RawParameter,
    ) -> Result<ParameterDefinition, ConversionError> {
        let kind = match raw.type_name.as_str() {
            "string" => primitive(PrimitiveType::String, &raw),
            "boolean" => primitive(PrimitiveType::Boolean, &raw),
            "integer" => primitive(PrimitiveType::Integer, &raw),
            "number" => primitive(PrimitiveType::Number, &raw),
            "object" => {
                let mut object = ObjectParameter::new();
                for (name, property) in raw.properties.into_iter().flatten() {
                    let path = format!("{}.{}", parameter, name);
                    object = object.property(&name, self.resolve(&path, property)?);
                }
                object.required = raw.required;
                object.additional_properties = raw.additional_properties;
                ParameterKind::Object(object)
            }
            "array" => {
                let items = match raw.items {
                    Some(items) => {
                        let path = format!("{}[]", parameter);
                        Some(Box::new(self.resolve(&path, *items)?))
                    }
                    None => None,
                };
                ParameterKind::Array(ArrayParameter {
                    items,
                    min_items: raw.min_items,
                    max_items: raw.max_items,
                })
            }
            other => self.reference(parameter, other)?,
        };

        let mut definition = ParameterDefinition::new(kind);
        definition.title = raw.title;
        definition.description = raw.description;
        definition.hint = raw.hint;
        definition.default = raw.default;
        definition.examples = raw.examples;
        Ok(definition)
    }

    fn reference(
        &self,
        parameter: &str,
        type_name: &str,
    ) -> Result<ParameterKind, ConversionError> {
        if let Some(id) = type_name.strip_prefix(TYPE_REFERENCE_PREFIX) {
            if let Some(ty) = self.types.get(id) {
                return Ok(ParameterKind::Custom(ty.clone()));
            }
        } else if let Some(builtin) = builtin::lookup(type_name) {
            return Ok(ParameterKind::Primitive(
                PrimitiveType::Builtin(builtin),
                PrimitiveConstraints::default(),
            ));
        }
        Err(ConversionError::UnknownType {
            parameter: parameter.to_string(),
            type_name: type_name.to_string(),
        })
    }

    fn resolve_set(
        &self,
        owner: &str,
        raw: RawParameterSet,
    ) -> Result<ParameterSet, ConversionError> {
        let mut set = ParameterSet::new();
        for (name, parameter) in raw.properties {
            let path = format!("{}.{}", owner, name);
            set = set.property(&name, self.resolve(&path, parameter)?);
        }
        Ok(set.required(raw.required))
    }
}

fn primitive(ty: PrimitiveType, raw: &RawParameter) -> ParameterKind {
    let constraints = PrimitiveConstraints {
        enumeration: raw.enumeration.clone(),
        choices: raw.choices.clone(),
        min_length: raw.min_length,
        max_length: raw.max_length,
        minimum: raw.minimum,
        maximum: raw.maximum,
        format: raw.format.clone(),
    };
    ParameterKind::Primitive(ty, constraints)
}

impl IntoApplication for RawApp {
    fn into_application(self) -> Result<ApplicationDeclaration, ConversionError> {
        let runtime = match self.runtime.as_deref() {
            None | Some("slack") => RuntimeMode::Hosted,
            Some("remote") => RuntimeMode::Remote,
            Some(other) => {
                return Err(ConversionError::ValidationError(format!(
                    "unknown runtime '{}', expected 'slack' or 'remote'",
                    other
                )));
            }
        };

        let scope = TypeScope {
            types: self
                .types
                .keys()
                .map(|id| (id.clone(), CustomType::declare(id)))
                .collect(),
        };
        let mut app = ApplicationDeclaration::new(&self.name, &self.description, &self.icon)
            .with_runtime(runtime)
            .bot_scopes(self.bot_scopes)
            .outgoing_domains(self.outgoing_domains);

        for (id, raw) in self.types {
            let definition = scope.resolve(&id, raw)?;
            let ty = scope.types[&id].clone();
            if ty.define(definition).is_err() {
                return Err(ConversionError::ValidationError(format!(
                    "type '{}' is defined twice",
                    id
                )));
            }
            app = app.custom_type(ty);
        }

        let mut functions: AHashMap<String, Arc<FunctionDefinition>> = AHashMap::new();
        for (id, raw) in self.functions {
            let mut function = FunctionDefinition::new(&id, &raw.title, &raw.source_file);
            function.description = raw.description;
            if let Some(inputs) = raw.input_parameters {
                function = function.with_input_parameters(scope.resolve_set(&id, inputs)?);
            }
            if let Some(outputs) = raw.output_parameters {
                function = function.with_output_parameters(scope.resolve_set(&id, outputs)?);
            }
            let function = Arc::new(function);
            functions.insert(id, Arc::clone(&function));
            app = app.shared_function(function);
        }

        for (id, raw) in self.workflows {
            let mut workflow = WorkflowDefinition::new(&id, &raw.title);
            workflow.description = raw.description;
            if let Some(inputs) = raw.input_parameters {
                workflow = workflow.with_input_parameters(scope.resolve_set(&id, inputs)?);
            }
            if let Some(outputs) = raw.output_parameters {
                workflow = workflow.with_output_parameters(scope.resolve_set(&id, outputs)?);
            }
            for (index, step) in raw.steps.into_iter().enumerate() {
                match step.function_id.strip_prefix(FUNCTION_REFERENCE_PREFIX) {
                    Some(local) => {
                        let function = functions.get(local).ok_or_else(|| {
                            ConversionError::UnknownFunction {
                                workflow: id.clone(),
                                step: index,
                                function_id: step.function_id.clone(),
                            }
                        })?;
                        workflow.add_step(function, step.inputs);
                    }
                    None => {
                        workflow.add_step(step.function_id.as_str(), step.inputs);
                    }
                }
            }
            app = app.workflow(workflow);
        }

        for (name, raw) in self.datastores {
            let mut datastore = DatastoreDefinition::new(&name, &raw.primary_key);
            for (attribute, parameter) in raw.attributes {
                let path = format!("{}.{}", name, attribute);
                datastore = datastore.attribute(&attribute, scope.resolve(&path, parameter)?);
            }
            if let Some(ttl) = raw.time_to_live_attribute {
                datastore = datastore.with_time_to_live_attribute(&ttl);
            }
            app = app.datastore(datastore);
        }

        for (name, raw) in self.events {
            app = app.event(CustomEvent::new(&name, scope.resolve(&name, raw)?));
        }

        Ok(app)
    }
}

/// Compiles an application project file into its manifest
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the application JSON file
    app_path: String,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref(), cli.json_logs)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let total_start = Instant::now();
    let app_json = fs::read_to_string(&cli.app_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", cli.app_path, e))
    });
    let raw: RawApp = serde_json::from_str(&app_json)
        .map_err(|e| ConversionError::JsonParseError(e.to_string()))
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let app = raw
        .into_application()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert application: {}", e)));

    let document = ManifestCompiler::builder(app)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Manifest compilation failed: {}", e)));
    let json = document
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize manifest: {}", e)));

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
            info!(path = %path, elapsed = ?total_start.elapsed(), "manifest written");
        }
        None => println!("{}", json),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
