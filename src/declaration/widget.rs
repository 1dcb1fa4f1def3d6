use super::{Category, Declaration};
use serde::Serialize;

/// A UI surface backed by application code.
#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    pub widget_id: String,
    pub title: String,
    pub description: Option<String>,
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetManifest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl WidgetDefinition {
    pub fn new(widget_id: &str, title: &str) -> Self {
        Self {
            widget_id: widget_id.to_string(),
            title: title.to_string(),
            description: None,
            source_file: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_source_file(mut self, source_file: &str) -> Self {
        self.source_file = Some(source_file.to_string());
        self
    }
}

impl Declaration for WidgetDefinition {
    const CATEGORY: Category = Category::Widget;
    type Fragment = WidgetManifest;

    fn id(&self) -> &str {
        &self.widget_id
    }

    fn export(&self) -> WidgetManifest {
        WidgetManifest {
            title: self.title.clone(),
            description: self.description.clone(),
            source_file: self.source_file.clone(),
        }
    }
}
