use std::sync::Arc;

use crate::app::{AppRegistry, AppResult, FirebaseApp, FirebaseOptions};
use crate::auth::{self, Auth, AuthResult};
use crate::firestore::{self, Firestore, FirestoreResult};

/// The SDK operations the client registry depends on.
pub trait Backend: Send + Sync {
    /// Apps already registered, oldest first.
    fn get_apps(&self) -> Vec<FirebaseApp>;

    /// Creates and registers a new app.
    fn initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp>;

    /// Adopts the oldest registered app, or registers one from `options` when there is none.
    ///
    /// The default runs [`Backend::get_apps`] then [`Backend::initialize_app`]; backends sharing a
    /// registry across threads should do both under one lock.
    fn first_or_initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        match self.get_apps().into_iter().next() {
            Some(existing) => Ok(existing),
            None => self.initialize_app(options),
        }
    }

    fn get_auth(&self, app: &FirebaseApp) -> AuthResult<Arc<Auth>>;

    fn get_firestore(&self, app: &FirebaseApp) -> FirestoreResult<Arc<Firestore>>;
}

/// [`Backend`] backed by this crate's app registry and services.
#[derive(Clone, Debug)]
pub struct SdkBackend {
    registry: Arc<AppRegistry>,
}

impl SdkBackend {
    pub fn new(registry: Arc<AppRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AppRegistry> {
        &self.registry
    }
}

impl Default for SdkBackend {
    /// Uses the process-wide [`AppRegistry::global`].
    fn default() -> Self {
        Self::new(AppRegistry::global())
    }
}

impl Backend for SdkBackend {
    fn get_apps(&self) -> Vec<FirebaseApp> {
        self.registry.get_apps()
    }

    fn initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        self.registry.initialize_app(options, None)
    }

    fn first_or_initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        self.registry.first_or_initialize_app(options)
    }

    fn get_auth(&self, app: &FirebaseApp) -> AuthResult<Arc<Auth>> {
        auth::get_auth(app)
    }

    fn get_firestore(&self, app: &FirebaseApp) -> FirestoreResult<Arc<Firestore>> {
        firestore::get_firestore(app)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn get_apps(&self) -> Vec<FirebaseApp> {
        (**self).get_apps()
    }

    fn initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        (**self).initialize_app(options)
    }

    fn first_or_initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
        (**self).first_or_initialize_app(options)
    }

    fn get_auth(&self, app: &FirebaseApp) -> AuthResult<Arc<Auth>> {
        (**self).get_auth(app)
    }

    fn get_firestore(&self, app: &FirebaseApp) -> FirestoreResult<Arc<Firestore>> {
        (**self).get_firestore(app)
    }
}
