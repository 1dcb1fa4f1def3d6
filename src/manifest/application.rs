use crate::declaration::{
    CustomEvent, CustomType, DatastoreDefinition, DeclarationNode, FunctionDefinition,
    ProviderDefinition, WidgetDefinition, WorkflowDefinition,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Where the application's functions execute. Selects which optional
/// sections are copied into the manifest and which defaults apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RuntimeMode {
    /// Functions run on the platform's own infrastructure.
    #[default]
    #[serde(rename = "slack")]
    Hosted,
    /// Functions run on infrastructure the application operates itself.
    #[serde(rename = "remote")]
    Remote,
}

/// Optional `features` entries. Most are only honoured in remote mode.
#[derive(Debug, Clone, Default)]
pub struct FeatureDeclarations {
    pub app_home: Option<Value>,
    pub shortcuts: Option<Value>,
    pub slash_commands: Option<Value>,
    pub unfurl_domains: Option<Vec<String>>,
    pub workflow_steps: Option<Value>,
    pub bot_always_online: Option<bool>,
}

/// Optional `settings` entries. Most are only honoured in remote mode.
#[derive(Debug, Clone, Default)]
pub struct SettingsDeclarations {
    pub org_deploy_enabled: Option<bool>,
    pub socket_mode_enabled: Option<bool>,
    pub token_rotation_enabled: Option<bool>,
    pub event_subscriptions: Option<Value>,
    pub interactivity: Option<Value>,
    pub siws_links: Option<Value>,
    pub incoming_webhooks: Option<Value>,
    pub allowed_ip_address_ranges: Option<Vec<String>>,
}

/// The root of the declaration tree handed to the compiler.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDeclaration {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub long_description: Option<String>,
    pub background_color: Option<String>,
    pub display_name: Option<String>,
    pub bot_scopes: Vec<String>,
    pub user_scopes: Option<Vec<String>>,
    pub outgoing_domains: Vec<String>,
    pub runtime: RuntimeMode,
    pub token_management_enabled: Option<bool>,
    pub redirect_urls: Option<Vec<String>>,
    pub app_directory: Option<Value>,
    pub features: FeatureDeclarations,
    pub settings: SettingsDeclarations,

    pub functions: Vec<Arc<FunctionDefinition>>,
    pub workflows: Vec<WorkflowDefinition>,
    pub datastores: Vec<DatastoreDefinition>,
    pub types: Vec<CustomType>,
    pub events: Vec<CustomEvent>,
    pub providers: Vec<ProviderDefinition>,
    pub widgets: Vec<WidgetDefinition>,
}

impl ApplicationDeclaration {
    pub fn new(name: &str, description: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            ..Self::default()
        }
    }

    pub fn with_runtime(mut self, runtime: RuntimeMode) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn bot_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bot_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn outgoing_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outgoing_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn function(self, function: FunctionDefinition) -> Self {
        self.shared_function(Arc::new(function))
    }

    /// Adds a function that is also referenced elsewhere, e.g. by a workflow step or a router.
    pub fn shared_function(mut self, function: Arc<FunctionDefinition>) -> Self {
        self.functions.push(function);
        self
    }

    pub fn workflow(mut self, workflow: WorkflowDefinition) -> Self {
        self.workflows.push(workflow);
        self
    }

    pub fn datastore(mut self, datastore: DatastoreDefinition) -> Self {
        self.datastores.push(datastore);
        self
    }

    pub fn custom_type(mut self, ty: CustomType) -> Self {
        self.types.push(ty);
        self
    }

    pub fn event(mut self, event: CustomEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn provider(mut self, provider: ProviderDefinition) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn widget(mut self, widget: WidgetDefinition) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Every declared node, in discovery order: workflows, datastores,
    /// events, functions, types, providers, widgets.
    pub fn nodes(&self) -> Vec<DeclarationNode<'_>> {
        let mut nodes = Vec::new();
        nodes.extend(self.workflows.iter().map(DeclarationNode::Workflow));
        nodes.extend(self.datastores.iter().map(DeclarationNode::Datastore));
        nodes.extend(self.events.iter().map(DeclarationNode::CustomEvent));
        nodes.extend(
            self.functions
                .iter()
                .map(|function| DeclarationNode::Function(function.as_ref())),
        );
        nodes.extend(self.types.iter().map(DeclarationNode::CustomType));
        nodes.extend(self.providers.iter().map(DeclarationNode::Provider));
        nodes.extend(self.widgets.iter().map(DeclarationNode::Widget));
        nodes
    }
}
