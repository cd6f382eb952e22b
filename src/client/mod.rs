//! Lazily initialized client handles.
//!
//! [`LazyClientRegistry`] owns three memo slots (app, Auth, Firestore). Handles are created on
//! first access and then returned unchanged for the registry's lifetime. The app accessor refuses
//! to run outside a browser context and adopts an app that an earlier initialization pass already
//! registered, which keeps development hot-reloads from registering a second app.
//!
//! ```
//! use firebase_client_registry::app::AppRegistry;
//! use firebase_client_registry::client::{ClientConfig, LazyClientRegistry, SdkBackend};
//! use firebase_client_registry::platform::ExecutionContext;
//! use std::sync::Arc;
//!
//! let config = ClientConfig {
//!     api_key: Some("demo-key".into()),
//!     project_id: Some("demo-project".into()),
//!     ..Default::default()
//! };
//! let clients = LazyClientRegistry::new(
//!     SdkBackend::new(Arc::new(AppRegistry::new())),
//!     config,
//!     ExecutionContext::Browser,
//! );
//!
//! let auth = clients.auth().unwrap();
//! let db = clients.firestore().unwrap();
//! assert!(auth.app().ptr_eq(db.app()));
//! ```

mod backend;
mod config;
mod errors;
mod logger;
mod registry;

#[doc(inline)]
pub use backend::{Backend, SdkBackend};

#[doc(inline)]
pub use config::{ClientConfig, CONFIG_JSON_VAR, DEFAULT_ENV_PREFIX};

#[doc(inline)]
pub use errors::{ClientError, ClientResult};

#[doc(inline)]
pub use logger::LOGGER;

#[doc(inline)]
pub use registry::LazyClientRegistry;
