//! Firebase app handles and the registry that tracks them.
mod api;
mod constants;
mod errors;
mod logger;
mod registry;
mod types;

#[doc(inline)]
pub use api::{get_app, get_apps, initialize_app};

#[doc(inline)]
pub use constants::DEFAULT_ENTRY_NAME;

#[doc(inline)]
pub use errors::{AppError, AppResult};

#[doc(inline)]
pub use logger::LOGGER;

#[doc(inline)]
pub use registry::AppRegistry;

#[doc(inline)]
pub use types::{FirebaseApp, FirebaseAppConfig, FirebaseAppSettings, FirebaseOptions};
