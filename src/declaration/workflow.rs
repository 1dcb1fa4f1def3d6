use super::{Category, Declaration, FunctionDefinition};
use crate::manifest::TypeRegistry;
use crate::schema::ParameterSet;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// The function a workflow step invokes.
#[derive(Debug, Clone)]
pub enum FunctionReference {
    /// A function declared by this application.
    Local(Arc<FunctionDefinition>),
    /// A function identified only by id, e.g. `slack#/functions/send_message`.
    Remote(String),
}

impl FunctionReference {
    pub fn function_id(&self) -> String {
        match self {
            FunctionReference::Local(function) => function.reference(),
            FunctionReference::Remote(id) => id.clone(),
        }
    }
}

impl From<Arc<FunctionDefinition>> for FunctionReference {
    fn from(function: Arc<FunctionDefinition>) -> Self {
        FunctionReference::Local(function)
    }
}

impl From<&Arc<FunctionDefinition>> for FunctionReference {
    fn from(function: &Arc<FunctionDefinition>) -> Self {
        FunctionReference::Local(Arc::clone(function))
    }
}

impl From<&str> for FunctionReference {
    fn from(id: &str) -> Self {
        FunctionReference::Remote(id.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowStep {
    pub id: String,
    pub function: FunctionReference,
    pub inputs: IndexMap<String, Value>,
}

/// Handle returned by [`WorkflowDefinition::add_step`] for wiring the step's
/// outputs into later steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutputs {
    step_id: String,
}

impl StepOutputs {
    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    /// Template string that resolves to the named output at runtime.
    pub fn output(&self, name: &str) -> String {
        format!("{{{{steps.{}.{}}}}}", self.step_id, name)
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    pub callback_id: String,
    pub title: String,
    pub description: Option<String>,
    pub input_parameters: Option<ParameterSet>,
    pub output_parameters: Option<ParameterSet>,
    steps: Vec<WorkflowStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStepManifest {
    pub id: String,
    pub function_id: String,
    pub inputs: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowManifest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_parameters: Option<ParameterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_parameters: Option<ParameterSet>,
    pub steps: Vec<WorkflowStepManifest>,
}

impl WorkflowDefinition {
    pub fn new(callback_id: &str, title: &str) -> Self {
        Self {
            callback_id: callback_id.to_string(),
            title: title.to_string(),
            description: None,
            input_parameters: None,
            output_parameters: None,
            steps: Vec::new(),
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

    /// Template string that resolves to the named workflow input at runtime.
    pub fn input(&self, name: &str) -> String {
        format!("{{{{inputs.{}}}}}", name)
    }

    /// Appends a step. Step ids are the step's position, starting at `"0"`.
    pub fn add_step(
        &mut self,
        function: impl Into<FunctionReference>,
        inputs: IndexMap<String, Value>,
    ) -> StepOutputs {
        let step_id = self.steps.len().to_string();
        self.steps.push(WorkflowStep {
            id: step_id.clone(),
            function: function.into(),
            inputs,
        });
        StepOutputs { step_id }
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Functions declared by this application that the steps invoke, in step order.
    pub fn step_functions(&self) -> impl Iterator<Item = &Arc<FunctionDefinition>> {
        self.steps.iter().filter_map(|step| match &step.function {
            FunctionReference::Local(function) => Some(function),
            FunctionReference::Remote(_) => None,
        })
    }
}

impl Declaration for WorkflowDefinition {
    const CATEGORY: Category = Category::Workflow;
    type Fragment = WorkflowManifest;

    fn id(&self) -> &str {
        &self.callback_id
    }

    fn export(&self) -> WorkflowManifest {
        WorkflowManifest {
            title: self.title.clone(),
            description: self.description.clone(),
            input_parameters: self.input_parameters.clone(),
            output_parameters: self.output_parameters.clone(),
            steps: self
                .steps
                .iter()
                .map(|step| WorkflowStepManifest {
                    id: step.id.clone(),
                    function_id: step.function.function_id(),
                    inputs: step.inputs.clone(),
                })
                .collect(),
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
