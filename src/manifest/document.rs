use super::application::RuntimeMode;
use crate::declaration::{
    DatastoreManifest, FunctionManifest, ProviderManifest, WidgetManifest, WorkflowManifest,
};
use crate::schema::ParameterDefinition;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Manifest schema version emitted in `_metadata`.
pub const MANIFEST_MAJOR_VERSION: u32 = 2;

/// The compiled application manifest. Field names and nesting follow the
/// platform's manifest schema exactly.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationDocument {
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,
    pub display_information: DisplayInformation,
    pub icon: String,
    pub oauth_config: OAuthConfig,
    pub features: Features,
    pub settings: Settings,
    pub outgoing_domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_directory: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub functions: IndexMap<String, FunctionManifest>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub workflows: IndexMap<String, WorkflowManifest>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub types: IndexMap<String, ParameterDefinition>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub datastores: IndexMap<String, DatastoreManifest>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub events: IndexMap<String, ParameterDefinition>,
    #[serde(skip_serializing_if = "ExternalAuthProviders::is_empty")]
    pub external_auth_providers: ExternalAuthProviders,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub widgets: IndexMap<String, WidgetManifest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub major_version: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayInformation {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OAuthConfig {
    pub scopes: Scopes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_management_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scopes {
    pub bot: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Features {
    pub bot_user: BotUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_home: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slash_commands: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfurl_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_steps: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotUser {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_online: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub function_runtime: RuntimeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_deploy_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_mode_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_rotation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_subscriptions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactivity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siws_links: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_webhooks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ip_address_ranges: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExternalAuthProviders {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub oauth2: IndexMap<String, ProviderManifest>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub jwt: IndexMap<String, ProviderManifest>,
}

impl ExternalAuthProviders {
    pub fn is_empty(&self) -> bool {
        self.oauth2.is_empty() && self.jwt.is_empty()
    }
}

impl ConfigurationDocument {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
