use super::{Category, Declaration};
use crate::manifest::TypeRegistry;
use crate::schema::ParameterSet;
use serde::Serialize;

/// A function implemented by the application and executed by the platform.
#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    pub callback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub source_file: String,
    pub input_parameters: Option<ParameterSet>,
    pub output_parameters: Option<ParameterSet>,
}

/// The manifest fragment for a function. Missing parameter sets export as
/// `{ "properties": {}, "required": [] }`.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionManifest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_file: String,
    pub input_parameters: ParameterSet,
    pub output_parameters: ParameterSet,
}

impl FunctionDefinition {
    pub fn new(callback_id: &str, title: &str, source_file: &str) -> Self {
        Self {
            callback_id: callback_id.to_string(),
            title: title.to_string(),
            description: None,
            source_file: source_file.to_string(),
            input_parameters: None,
            output_parameters: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_input_parameters(mut self, parameters: ParameterSet) -> Self {
        self.input_parameters = Some(parameters);
        self
    }

    pub fn with_output_parameters(mut self, parameters: ParameterSet) -> Self {
        self.output_parameters = Some(parameters);
        self
    }

    /// The id used to reference this function from a workflow step.
    pub fn reference(&self) -> String {
        format!("#/functions/{}", self.callback_id)
    }
}

impl Declaration for FunctionDefinition {
    const CATEGORY: Category = Category::Function;
    type Fragment = FunctionManifest;

    fn id(&self) -> &str {
        &self.callback_id
    }

    fn export(&self) -> FunctionManifest {
        FunctionManifest {
            title: self.title.clone(),
            description: self.description.clone(),
            source_file: self.source_file.clone(),
            input_parameters: self.input_parameters.clone().unwrap_or_default(),
            output_parameters: self.output_parameters.clone().unwrap_or_default(),
        }
    }

    fn register_parameter_types(&self, registry: &mut TypeRegistry) {
        for parameters in [&self.input_parameters, &self.output_parameters]
            .into_iter()
            .flatten()
        {
            registry.scan_parameters(parameters);
        }
    }
}
