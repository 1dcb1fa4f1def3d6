use crate::declaration::{CustomType, Declaration, FunctionDefinition};
use crate::error::ManifestError;
use crate::schema::BUILTIN_NAMESPACE;
use ahash::AHashSet;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

mod application;
mod assign;
mod diff;
pub mod document;
mod registry;

pub use application::*;
pub use document::*;
pub use registry::TypeRegistry;

/// Bot scopes required as soon as the application declares a datastore.
pub const DATASTORE_SCOPES: [&str; 2] = ["datastore:read", "datastore:write"];

/// Compile-scoped state produced by the discovery walk.
#[derive(Debug, Clone)]
pub struct CompileContext {
    /// Declared functions followed by step functions pulled in from workflows.
    pub functions: Vec<Arc<FunctionDefinition>>,
    /// Declared types (reserved ones dropped) followed by discovered types.
    pub types: Vec<CustomType>,
    pub registry: TypeRegistry,
}

pub struct ManifestCompiler {
    app: ApplicationDeclaration,
    reserved_namespace: String,
    datastore_scopes: bool,
}

pub struct ManifestCompilerBuilder {
    app: ApplicationDeclaration,
    reserved_namespace: String,
    datastore_scopes: bool,
}

impl ManifestCompilerBuilder {
    pub fn new(app: ApplicationDeclaration) -> Self {
        Self {
            app,
            reserved_namespace: BUILTIN_NAMESPACE.to_string(),
            datastore_scopes: true,
        }
    }

    /// Overrides the id prefix of platform-provided types.
    pub fn with_reserved_namespace(mut self, namespace: &str) -> Self {
        self.reserved_namespace = namespace.to_string();
        self
    }

    /// Controls whether datastore scopes are added to the bot scopes.
    pub fn with_datastore_scopes(mut self, enabled: bool) -> Self {
        self.datastore_scopes = enabled;
        self
    }

    pub fn build(self) -> ManifestCompiler {
        ManifestCompiler {
            app: self.app,
            reserved_namespace: self.reserved_namespace,
            datastore_scopes: self.datastore_scopes,
        }
    }
}

impl ManifestCompiler {
    pub fn builder(app: ApplicationDeclaration) -> ManifestCompilerBuilder {
        ManifestCompilerBuilder::new(app)
    }

    pub fn new(app: ApplicationDeclaration) -> Self {
        ManifestCompilerBuilder::new(app).build()
    }

    pub fn application(&self) -> &ApplicationDeclaration {
        &self.app
    }

    /// Walks the declaration tree once, collecting every custom type it
    /// references and every local function its workflows invoke.
    pub fn discover(&self) -> CompileContext {
        let app = &self.app;
        let mut registry = TypeRegistry::with_reserved_namespace(&self.reserved_namespace);
        for ty in &app.types {
            registry.add(ty);
        }

        // A step function is skipped only when that same node is already
        // listed; a different node reusing its id must reach the duplicate check.
        let mut functions = app.functions.clone();
        for workflow in &app.workflows {
            for function in workflow.step_functions() {
                if !functions.iter().any(|listed| Arc::ptr_eq(listed, function)) {
                    debug!(
                        workflow = %workflow.callback_id,
                        function = %function.callback_id,
                        "registered step function"
                    );
                    functions.push(Arc::clone(function));
                }
            }
        }

        for node in app.nodes() {
            node.register_parameter_types(&mut registry);
        }
        for function in &functions[app.functions.len()..] {
            function.register_parameter_types(&mut registry);
        }
        registry.expand();

        let declared: Vec<CustomType> = app
            .types
            .iter()
            .filter(|ty| !registry.is_reserved(ty.id()))
            .cloned()
            .collect();
        let declared_ids: AHashSet<&str> = declared.iter().map(|ty| ty.id()).collect();
        let discovered: Vec<CustomType> = registry
            .iter()
            .filter(|ty| !declared_ids.contains(ty.id()))
            .cloned()
            .collect();
        let types = declared.iter().cloned().chain(discovered).collect();

        CompileContext {
            functions,
            types,
            registry,
        }
    }

    /// Compiles the application into its configuration document.
    ///
    /// Fails with [`ManifestError::DuplicateIdentifier`] if two nodes of the
    /// same category share an id; no partial document is produced.
    pub fn compile(&self) -> Result<ConfigurationDocument, ManifestError> {
        let app = &self.app;
        info!(app = %app.name, runtime = ?app.runtime, "compiling application manifest");

        let context = self.discover();

        let functions = export_category(context.functions.iter().map(Arc::as_ref))?;
        let workflows = export_category(&app.workflows)?;
        let types = export_category(&context.types)?;
        let datastores = export_category(&app.datastores)?;
        let events = export_category(&app.events)?;
        let providers = export_category(&app.providers)?;
        let widgets = export_category(&app.widgets)?;

        let mut document = self.skeleton();
        assign::assign_runtime_properties(app, &mut document);

        for provider in &app.providers {
            let id = provider.id();
            if let Some(fragment) = providers.get(id) {
                let section = if provider.is_oauth2() {
                    &mut document.external_auth_providers.oauth2
                } else {
                    &mut document.external_auth_providers.jwt
                };
                section.insert(id.to_string(), fragment.clone());
            }
        }

        info!(
            functions = functions.len(),
            workflows = workflows.len(),
            types = types.len(),
            datastores = datastores.len(),
            events = events.len(),
            providers = providers.len(),
            widgets = widgets.len(),
            "manifest compiled"
        );

        document.functions = functions;
        document.workflows = workflows;
        document.types = types;
        document.datastores = datastores;
        document.events = events;
        document.widgets = widgets;
        Ok(document)
    }

    /// The mode-independent part of the document.
    fn skeleton(&self) -> ConfigurationDocument {
        let app = &self.app;
        ConfigurationDocument {
            metadata: Metadata {
                major_version: MANIFEST_MAJOR_VERSION,
            },
            display_information: DisplayInformation {
                name: app.name.clone(),
                description: app.description.clone(),
                long_description: app.long_description.clone(),
                background_color: app.background_color.clone(),
            },
            icon: app.icon.clone(),
            oauth_config: OAuthConfig {
                scopes: Scopes {
                    bot: self.bot_scopes(),
                    user: None,
                },
                redirect_urls: None,
                token_management_enabled: None,
            },
            features: Features {
                bot_user: BotUser {
                    display_name: app.display_name.clone().unwrap_or_else(|| app.name.clone()),
                    always_online: None,
                },
                app_home: None,
                shortcuts: None,
                slash_commands: None,
                unfurl_domains: None,
                workflow_steps: None,
            },
            settings: Settings {
                function_runtime: app.runtime,
                org_deploy_enabled: None,
                socket_mode_enabled: None,
                token_rotation_enabled: None,
                event_subscriptions: None,
                interactivity: None,
                siws_links: None,
                incoming_webhooks: None,
                allowed_ip_address_ranges: None,
            },
            outgoing_domains: app.outgoing_domains.clone(),
            app_directory: None,
            functions: IndexMap::new(),
            workflows: IndexMap::new(),
            types: IndexMap::new(),
            datastores: IndexMap::new(),
            events: IndexMap::new(),
            external_auth_providers: ExternalAuthProviders::default(),
            widgets: IndexMap::new(),
        }
    }

    fn bot_scopes(&self) -> Vec<String> {
        let mut scopes = self.app.bot_scopes.clone();
        if self.datastore_scopes && !self.app.datastores.is_empty() {
            for scope in DATASTORE_SCOPES {
                if !scopes.iter().any(|s| s == scope) {
                    scopes.push(scope.to_string());
                }
            }
        }
        scopes
    }
}

/// Exports one category into an id-keyed map, rejecting repeated ids.
fn export_category<'a, D>(
    nodes: impl IntoIterator<Item = &'a D>,
) -> Result<IndexMap<String, D::Fragment>, ManifestError>
where
    D: Declaration + 'a,
{
    let mut exported: IndexMap<String, D::Fragment> = IndexMap::new();
    for node in nodes {
        let fragment = node.export();
        if let Some(existing) = exported.get(node.id()) {
            return Err(diff::duplicate_identifier(
                D::CATEGORY,
                node.id(),
                existing,
                &fragment,
            ));
        }
        exported.insert(node.id().to_string(), fragment);
    }
    Ok(exported)
}
