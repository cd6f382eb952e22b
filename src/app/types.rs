use std::fmt;
use std::sync::Arc;

use crate::component::ComponentContainer;

/// Connection parameters for one Firebase project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseOptions {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl FirebaseOptions {
    /// Returns `true` when at least one field carries a value.
    pub fn is_defined(&self) -> bool {
        self.api_key.is_some()
            || self.auth_domain.is_some()
            || self.project_id.is_some()
            || self.storage_bucket.is_some()
            || self.messaging_sender_id.is_some()
            || self.app_id.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseAppSettings {
    pub name: Option<String>,
    pub automatic_data_collection_enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirebaseAppConfig {
    pub name: Arc<str>,
    pub automatic_data_collection_enabled: bool,
}

impl FirebaseAppConfig {
    pub fn new(name: impl Into<String>, automatic_data_collection_enabled: bool) -> Self {
        Self {
            name: Arc::from(name.into()),
            automatic_data_collection_enabled,
        }
    }
}

/// Handle to one initialized app. Clones share the same underlying app.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<FirebaseAppInner>,
}

struct FirebaseAppInner {
    options: FirebaseOptions,
    config: FirebaseAppConfig,
    container: ComponentContainer,
}

impl FirebaseApp {
    pub(crate) fn new(options: FirebaseOptions, config: FirebaseAppConfig) -> Self {
        let container = ComponentContainer::new(config.name.to_string());
        Self {
            inner: Arc::new(FirebaseAppInner {
                options,
                config,
                container,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn options(&self) -> &FirebaseOptions {
        &self.inner.options
    }

    pub fn config(&self) -> &FirebaseAppConfig {
        &self.inner.config
    }

    pub fn automatic_data_collection_enabled(&self) -> bool {
        self.inner.config.automatic_data_collection_enabled
    }

    /// Services attached to this app (Auth, Firestore, ...).
    pub fn container(&self) -> &ComponentContainer {
        &self.inner.container
    }

    /// Returns `true` when both handles refer to the same initialized app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name())
            .field("options", self.options())
            .field(
                "automatic_data_collection_enabled",
                &self.automatic_data_collection_enabled(),
            )
            .finish()
    }
}
