use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use crate::app::constants::DEFAULT_ENTRY_NAME;
use crate::app::errors::{AppError, AppResult};
use crate::app::logger::LOGGER;
use crate::app::types::{FirebaseApp, FirebaseAppConfig, FirebaseAppSettings, FirebaseOptions};

static GLOBAL_REGISTRY: LazyLock<Arc<AppRegistry>> = LazyLock::new(|| Arc::new(AppRegistry::new()));

/// Bookkeeping of every initialized [`FirebaseApp`], in registration order.
///
/// The process-wide instance returned by [`AppRegistry::global`] outlives any client registry
/// built on top of it, which is what lets a re-created client adopt an app registered earlier.
#[derive(Debug, Default)]
pub struct AppRegistry {
    apps: Mutex<Vec<FirebaseApp>>,
}

impl AppRegistry {
    /// Creates an empty registry, isolated from the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> Arc<AppRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    fn apps_guard(&self) -> MutexGuard<'_, Vec<FirebaseApp>> {
        self.apps.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Creates and registers an app.
    ///
    /// Re-initializing an existing name with identical options and settings returns the existing
    /// app; anything else under that name is a [`AppError::DuplicateApp`].
    pub fn initialize_app(
        &self,
        options: FirebaseOptions,
        settings: Option<FirebaseAppSettings>,
    ) -> AppResult<FirebaseApp> {
        let mut apps = self.apps_guard();
        register_locked(&mut apps, options, settings)
    }

    /// Returns the oldest registered app, or registers a new one from `options` when none exists.
    ///
    /// The lookup and the registration happen under one lock, so concurrent callers all end up
    /// with the same app.
    pub fn first_or_initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        let mut apps = self.apps_guard();
        if let Some(existing) = apps.first() {
            return Ok(existing.clone());
        }
        register_locked(&mut apps, options, None)
    }

    /// Looks up an app by name, defaulting to [`DEFAULT_ENTRY_NAME`].
    pub fn get_app(&self, name: Option<&str>) -> AppResult<FirebaseApp> {
        let lookup = name.unwrap_or(DEFAULT_ENTRY_NAME);
        self.apps_guard()
            .iter()
            .find(|app| app.name() == lookup)
            .cloned()
            .ok_or_else(|| AppError::NoApp {
                app_name: lookup.to_string(),
            })
    }

    /// Every registered app, oldest first.
    pub fn get_apps(&self) -> Vec<FirebaseApp> {
        self.apps_guard().clone()
    }
}

fn register_locked(
    apps: &mut Vec<FirebaseApp>,
    options: FirebaseOptions,
    settings: Option<FirebaseAppSettings>,
) -> AppResult<FirebaseApp> {
    let settings = settings.unwrap_or_default();
    let name = normalize_name(&settings)?;
    if !options.is_defined() {
        return Err(AppError::NoOptions);
    }
    let config = FirebaseAppConfig::new(
        name.clone(),
        settings.automatic_data_collection_enabled.unwrap_or(true),
    );

    if let Some(existing) = apps.iter().find(|app| app.name() == name) {
        if existing.options() == &options && existing.config() == &config {
            return Ok(existing.clone());
        }
        return Err(AppError::DuplicateApp { app_name: name });
    }

    let app = FirebaseApp::new(options, config);
    apps.push(app.clone());
    LOGGER.debug(format!("Initialized Firebase App '{name}'"));
    Ok(app)
}

fn normalize_name(settings: &FirebaseAppSettings) -> AppResult<String> {
    let name = settings
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_ENTRY_NAME.to_string());
    if name.trim().is_empty() {
        return Err(AppError::BadAppName { app_name: name });
    }
    Ok(name)
}
