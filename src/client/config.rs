use std::env;

use serde::Deserialize;

use crate::app::FirebaseOptions;
use crate::client::logger::LOGGER;

/// Prefix of the six connection variables (`FIREBASE_API_KEY`, ...).
pub const DEFAULT_ENV_PREFIX: &str = "FIREBASE_";

/// JSON object consulted when none of the prefixed variables is set.
pub const CONFIG_JSON_VAR: &str = "FIREBASE_CONFIG";

const API_KEY: &str = "API_KEY";
const AUTH_DOMAIN: &str = "AUTH_DOMAIN";
const PROJECT_ID: &str = "PROJECT_ID";
const STORAGE_BUCKET: &str = "STORAGE_BUCKET";
const MESSAGING_SENDER_ID: &str = "MESSAGING_SENDER_ID";
const APP_ID: &str = "APP_ID";

/// Connection parameters captured once from the environment.
///
/// Values are passed through untouched: unset variables stay `None` and empty ones stay
/// `Some("")`. Validation is left to the services consuming them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl ClientConfig {
    /// Reads `FIREBASE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads `<prefix>API_KEY`, `<prefix>AUTH_DOMAIN`, ... from the process environment.
    pub fn from_env_with_prefix(prefix: &str) -> Self {
        Self::from_lookup(prefix, |key| env::var(key).ok())
    }

    /// Builds the record through an arbitrary variable lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |suffix: &str| lookup(&format!("{prefix}{suffix}"));
        let config = Self {
            api_key: read(API_KEY),
            auth_domain: read(AUTH_DOMAIN),
            project_id: read(PROJECT_ID),
            storage_bucket: read(STORAGE_BUCKET),
            messaging_sender_id: read(MESSAGING_SENDER_ID),
            app_id: read(APP_ID),
        };
        if config.is_empty() {
            if let Some(raw) = lookup(CONFIG_JSON_VAR) {
                return Self::from_json(&raw).unwrap_or_else(|err| {
                    LOGGER.warn(format!("Ignoring {CONFIG_JSON_VAR}: {err}"));
                    config
                });
            }
        }
        config
    }

    /// Parses a web-app config object (`{"apiKey": "...", "projectId": "..."}`).
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        !self.to_options().is_defined()
    }

    pub fn to_options(&self) -> FirebaseOptions {
        FirebaseOptions {
            api_key: self.api_key.clone(),
            auth_domain: self.auth_domain.clone(),
            project_id: self.project_id.clone(),
            storage_bucket: self.storage_bucket.clone(),
            messaging_sender_id: self.messaging_sender_id.clone(),
            app_id: self.app_id.clone(),
        }
    }
}

impl From<ClientConfig> for FirebaseOptions {
    fn from(config: ClientConfig) -> Self {
        config.to_options()
    }
}
