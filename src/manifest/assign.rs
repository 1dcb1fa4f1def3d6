use super::application::{ApplicationDeclaration, RuntimeMode};
use super::document::ConfigurationDocument;

/// Copies the mode-specific sections of `app` into `document` and fills in
/// the defaults for the selected runtime mode.
pub(super) fn assign_runtime_properties(
    app: &ApplicationDeclaration,
    document: &mut ConfigurationDocument,
) {
    match app.runtime {
        RuntimeMode::Hosted => assign_hosted(app, document),
        RuntimeMode::Remote => assign_remote(app, document),
    }
}

fn assign_hosted(app: &ApplicationDeclaration, document: &mut ConfigurationDocument) {
    document.settings.function_runtime = RuntimeMode::Hosted;
    document.oauth_config.token_management_enabled = Some(false);
    // Org-wide deployment cannot be turned off for hosted apps.
    document.settings.org_deploy_enabled = Some(true);

    document.features.app_home = app.features.app_home.clone();
    document.settings.event_subscriptions = app.settings.event_subscriptions.clone();
}

fn assign_remote(app: &ApplicationDeclaration, document: &mut ConfigurationDocument) {
    let features = &app.features;
    let settings = &app.settings;

    document.settings.function_runtime = RuntimeMode::Remote;
    document.oauth_config.token_management_enabled =
        Some(app.token_management_enabled.unwrap_or(true));
    document.settings.org_deploy_enabled = Some(settings.org_deploy_enabled.unwrap_or(true));

    document.app_directory = app.app_directory.clone();
    document.oauth_config.scopes.user = app.user_scopes.clone();
    document.oauth_config.redirect_urls = app.redirect_urls.clone();

    document.settings.socket_mode_enabled = settings.socket_mode_enabled;
    document.settings.token_rotation_enabled = settings.token_rotation_enabled;
    document.settings.event_subscriptions = settings.event_subscriptions.clone();
    document.settings.interactivity = settings.interactivity.clone();
    document.settings.siws_links = settings.siws_links.clone();
    document.settings.incoming_webhooks = settings.incoming_webhooks.clone();
    document.settings.allowed_ip_address_ranges = settings.allowed_ip_address_ranges.clone();

    document.features.bot_user.always_online = features.bot_always_online;
    document.features.app_home = features.app_home.clone();
    document.features.shortcuts = features.shortcuts.clone();
    document.features.slash_commands = features.slash_commands.clone();
    document.features.unfurl_domains = features.unfurl_domains.clone();
    document.features.workflow_steps = features.workflow_steps.clone();
}
