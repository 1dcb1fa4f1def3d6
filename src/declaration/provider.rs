use super::{Category, Declaration};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OAuth2ProviderType {
    #[serde(rename = "CUSTOM")]
    Custom,
    #[serde(rename = "GOOGLE")]
    Google,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OAuth2Options {
    pub client_id: String,
    pub scope: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url_extras: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_pkce: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JwtOptions {
    pub issuer: String,
    pub jwks_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProviderOptions {
    OAuth2(OAuth2Options),
    Jwt(JwtOptions),
}

/// An external authentication provider. OAuth2 and JWT providers share one
/// id space and are split into separate manifest sections on export.
#[derive(Debug, Clone)]
pub enum ProviderDefinition {
    OAuth2 {
        provider_key: String,
        provider_type: OAuth2ProviderType,
        options: OAuth2Options,
    },
    Jwt {
        provider_key: String,
        options: JwtOptions,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<OAuth2ProviderType>,
    pub options: ProviderOptions,
}

impl ProviderDefinition {
    pub fn oauth2(
        provider_key: &str,
        provider_type: OAuth2ProviderType,
        options: OAuth2Options,
    ) -> Self {
        ProviderDefinition::OAuth2 {
            provider_key: provider_key.to_string(),
            provider_type,
            options,
        }
    }

    pub fn jwt(provider_key: &str, options: JwtOptions) -> Self {
        ProviderDefinition::Jwt {
            provider_key: provider_key.to_string(),
            options,
        }
    }

    pub fn is_oauth2(&self) -> bool {
        matches!(self, ProviderDefinition::OAuth2 { .. })
    }
}

impl Declaration for ProviderDefinition {
    const CATEGORY: Category = Category::Provider;
    type Fragment = ProviderManifest;

    fn id(&self) -> &str {
        match self {
            ProviderDefinition::OAuth2 { provider_key, .. } => provider_key,
            ProviderDefinition::Jwt { provider_key, .. } => provider_key,
        }
    }

    fn export(&self) -> ProviderManifest {
        match self {
            ProviderDefinition::OAuth2 {
                provider_type,
                options,
                ..
            } => ProviderManifest {
                provider_type: Some(*provider_type),
                options: ProviderOptions::OAuth2(options.clone()),
            },
            ProviderDefinition::Jwt { options, .. } => ProviderManifest {
                provider_type: None,
                options: ProviderOptions::Jwt(options.clone()),
            },
        }
    }
}
