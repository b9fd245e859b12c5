//! Configuration resolution for aidet-server
//!
//! Provides tiered setting resolution with CLI → environment → TOML
//! priority. The result is an immutable [`ServiceConfig`] built once at
//! startup and threaded into handlers through application state;
//! nothing reads the process environment after this step.
//!
//! Environment variable names follow the service's original deployment
//! contract (`PORT`, `EXTERNAL_API_URL`, `SIGHTENGINE_*`).

use aidet_common::config::TomlConfig;
use tracing::warn;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default vendor analysis endpoint
pub const DEFAULT_ENDPOINT_URL: &str = "https://api.sightengine.com/1.0/check.json";

/// Default vendor model list sent with every analysis request
pub const DEFAULT_MODELS: &str = "nudity,wad,offensive,genai";

/// Vendor API credential pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub secret: String,
}

/// Immutable service configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub port: u16,
    /// Vendor analysis endpoint URL
    pub endpoint_url: String,
    /// Comma-separated vendor model list
    pub models: String,
    /// Vendor API user credential, if configured
    pub api_user: Option<String>,
    /// Vendor API secret credential, if configured
    pub api_secret: Option<String>,
}

impl ServiceConfig {
    /// Resolve configuration from CLI, environment, and TOML tiers
    pub fn resolve(cli_port: Option<u16>, toml: &TomlConfig) -> Self {
        Self {
            port: resolve_port(cli_port, toml),
            endpoint_url: resolve_setting("endpoint URL", "EXTERNAL_API_URL", toml.endpoint_url.as_deref())
                .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string()),
            models: resolve_setting("model list", "SIGHTENGINE_MODELS", toml.models.as_deref())
                .unwrap_or_else(|| DEFAULT_MODELS.to_string()),
            api_user: resolve_setting("API user", "SIGHTENGINE_API_USER", toml.api_user.as_deref()),
            api_secret: resolve_setting("API secret", "SIGHTENGINE_API_SECRET", toml.api_secret.as_deref()),
        }
    }

    /// Credential pair when both halves are configured
    ///
    /// Handlers call this per request; absence means the server is
    /// misconfigured and the vendor must not be contacted.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_user, &self.api_secret) {
            (Some(user), Some(secret)) => Some(Credentials {
                user: user.clone(),
                secret: secret.clone(),
            }),
            _ => None,
        }
    }
}

/// Resolve one string setting with environment → TOML priority
///
/// Empty strings count as unset. Warns when a lower tier is shadowed.
fn resolve_setting(name: &str, env_var: &str, toml_value: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|v| !v.is_empty());
    let toml_value = toml_value.filter(|v| !v.is_empty()).map(str::to_string);

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} set in both environment ({}) and config file; using environment",
            name, env_var
        );
    }

    env_value.or(toml_value)
}

/// Resolve the listen port with CLI → environment → TOML priority
fn resolve_port(cli_port: Option<u16>, toml: &TomlConfig) -> u16 {
    if let Some(port) = cli_port {
        if std::env::var("PORT").is_ok() || toml.port.is_some() {
            warn!("Port set on command line; ignoring environment and config file");
        }
        return port;
    }

    if let Ok(value) = std::env::var("PORT") {
        match value.parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring unparseable PORT value {:?}", value),
        }
    }

    toml.port.unwrap_or(DEFAULT_PORT)
}
