use super::{Category, Declaration};
use crate::manifest::TypeRegistry;
use crate::schema::ParameterDefinition;
use indexmap::IndexMap;
use serde::Serialize;

/// A key/value table hosted by the platform.
#[derive(Debug, Clone)]
pub struct DatastoreDefinition {
    pub name: String,
    pub primary_key: String,
    pub attributes: IndexMap<String, ParameterDefinition>,
    pub time_to_live_attribute: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatastoreManifest {
    pub primary_key: String,
    pub attributes: IndexMap<String, ParameterDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live_attribute: Option<String>,
}

impl DatastoreDefinition {
    pub fn new(name: &str, primary_key: &str) -> Self {
        Self {
            name: name.to_string(),
            primary_key: primary_key.to_string(),
            attributes: IndexMap::new(),
            time_to_live_attribute: None,
        }
    }

    pub fn attribute(mut self, name: &str, definition: ParameterDefinition) -> Self {
        self.attributes.insert(name.to_string(), definition);
        self
    }

    pub fn with_time_to_live_attribute(mut self, attribute: &str) -> Self {
        self.time_to_live_attribute = Some(attribute.to_string());
        self
    }
}

impl Declaration for DatastoreDefinition {
    const CATEGORY: Category = Category::Datastore;
    type Fragment = DatastoreManifest;

    fn id(&self) -> &str {
        &self.name
    }

    fn export(&self) -> DatastoreManifest {
        DatastoreManifest {
            primary_key: self.primary_key.clone(),
            attributes: self.attributes.clone(),
            time_to_live_attribute: self.time_to_live_attribute.clone(),
        }
    }

    fn register_parameter_types(&self, registry: &mut TypeRegistry) {
        for attribute in self.attributes.values() {
            registry.scan_definition(attribute);
        }
    }
}
