use super::{Category, Declaration};
use crate::manifest::TypeRegistry;
use crate::schema::{ObjectParameter, ParameterDefinition};

/// A structured event the application can emit, typically as message metadata.
#[derive(Debug, Clone)]
pub struct CustomEvent {
    pub name: String,
    pub definition: ParameterDefinition,
}

impl CustomEvent {
    pub fn new(name: &str, definition: ParameterDefinition) -> Self {
        Self {
            name: name.to_string(),
            definition,
        }
    }

    /// Shorthand for an event whose payload is an object.
    pub fn object(name: &str, object: ObjectParameter) -> Self {
        Self::new(name, ParameterDefinition::object(object))
    }

    pub fn reference(&self) -> String {
        format!("#/events/{}", self.name)
    }
}

impl Declaration for CustomEvent {
    const CATEGORY: Category = Category::CustomEvent;
    type Fragment = ParameterDefinition;

    fn id(&self) -> &str {
        &self.name
    }

    fn export(&self) -> ParameterDefinition {
        self.definition.clone()
    }

    fn register_parameter_types(&self, registry: &mut TypeRegistry) {
        registry.scan_definition(&self.definition);
    }
}
