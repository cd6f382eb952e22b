//! Free functions operating on the process-wide [`AppRegistry`].

use crate::app::errors::AppResult;
use crate::app::registry::AppRegistry;
use crate::app::types::{FirebaseApp, FirebaseAppSettings, FirebaseOptions};

/// Initializes an app in the process-wide registry.
pub fn initialize_app(options: FirebaseOptions, settings: Option<FirebaseAppSettings>) -> AppResult<FirebaseApp> {
    AppRegistry::global().initialize_app(options, settings)
}

/// Retrieves a previously initialized app from the process-wide registry.
pub fn get_app(name: Option<&str>) -> AppResult<FirebaseApp> {
    AppRegistry::global().get_app(name)
}

/// Lists every app in the process-wide registry.
pub fn get_apps() -> Vec<FirebaseApp> {
    AppRegistry::global().get_apps()
}
