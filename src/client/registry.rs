use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::app::FirebaseApp;
use crate::auth::Auth;
use crate::client::backend::{Backend, SdkBackend};
use crate::client::config::ClientConfig;
use crate::client::errors::{ClientError, ClientResult};
use crate::client::logger::LOGGER;
use crate::firestore::Firestore;
use crate::platform::ExecutionContext;

/// Hands out one app, one Auth and one Firestore handle, each built on first access.
///
/// Every slot is populated at most once and never cleared. Failed constructions leave the slot
/// empty, so the next call runs the whole sequence again. Slots are independently locked, which
/// keeps the single-construction guarantee when accessors race on several threads. Registries
/// sharing one [`AppRegistry`](crate::app::AppRegistry) adopt a single app even when they race,
/// because [`SdkBackend`] looks up and registers under the registry's lock.
pub struct LazyClientRegistry<B = SdkBackend> {
    backend: B,
    config: ClientConfig,
    context: ExecutionContext,
    app: OnceCell<FirebaseApp>,
    auth: OnceCell<Arc<Auth>>,
    firestore: OnceCell<Arc<Firestore>>,
}

impl LazyClientRegistry<SdkBackend> {
    /// Registry over the process-wide app registry, configured from `FIREBASE_*` variables and
    /// the detected execution context.
    pub fn from_env() -> Self {
        Self::new(SdkBackend::default(), ClientConfig::from_env(), ExecutionContext::detect())
    }
}

impl<B: Backend> LazyClientRegistry<B> {
    pub fn new(backend: B, config: ClientConfig, context: ExecutionContext) -> Self {
        Self {
            backend,
            config,
            context,
            app: OnceCell::new(),
            auth: OnceCell::new(),
            firestore: OnceCell::new(),
        }
    }

    /// Returns the app handle, adopting an already registered app before creating one.
    ///
    /// Fails with [`ClientError::ClientSideOnly`] outside a browser context.
    pub fn app(&self) -> ClientResult<FirebaseApp> {
        if !self.context.is_browser() {
            return Err(ClientError::ClientSideOnly { context: self.context });
        }
        self.app
            .get_or_try_init(|| -> ClientResult<FirebaseApp> {
                let app = self.backend.first_or_initialize_app(self.config.to_options())?;
                LOGGER.debug(format!("Using Firebase App '{}'", app.name()));
                Ok(app)
            })
            .cloned()
    }

    /// Returns the Auth handle derived from [`LazyClientRegistry::app`].
    pub fn auth(&self) -> ClientResult<Arc<Auth>> {
        self.auth
            .get_or_try_init(|| -> ClientResult<Arc<Auth>> {
                let app = self.app()?;
                Ok(self.backend.get_auth(&app)?)
            })
            .cloned()
    }

    /// Returns the Firestore handle derived from [`LazyClientRegistry::app`].
    pub fn firestore(&self) -> ClientResult<Arc<Firestore>> {
        self.firestore
            .get_or_try_init(|| -> ClientResult<Arc<Firestore>> {
                let app = self.app()?;
                Ok(self.backend.get_firestore(&app)?)
            })
            .cloned()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_app_initialized(&self) -> bool {
        self.app.get().is_some()
    }

    pub fn is_auth_initialized(&self) -> bool {
        self.auth.get().is_some()
    }

    pub fn is_firestore_initialized(&self) -> bool {
        self.firestore.get().is_some()
    }
}

impl<B> fmt::Debug for LazyClientRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyClientRegistry")
            .field("context", &self.context)
            .field("app", &self.app.get().map(FirebaseApp::name))
            .field("auth_initialized", &self.auth.get().is_some())
            .field("firestore_initialized", &self.firestore.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppError, AppRegistry, AppResult, FirebaseAppSettings, FirebaseOptions};
    use crate::auth::{AuthError, AuthResult};
    use crate::firestore::FirestoreResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct RecordingBackend {
        registry: Arc<AppRegistry>,
        get_apps_calls: AtomicUsize,
        initialize_calls: Mutex<Vec<FirebaseOptions>>,
        auth_calls: AtomicUsize,
        firestore_calls: AtomicUsize,
        failing_initializations: AtomicUsize,
    }

    impl RecordingBackend {
        fn with_registry(registry: Arc<AppRegistry>) -> Self {
            Self {
                registry,
                ..Default::default()
            }
        }

        fn fail_next_initializations(&self, count: usize) {
            self.failing_initializations.store(count, Ordering::SeqCst);
        }

        fn initialize_count(&self) -> usize {
            self.initialize_calls.lock().unwrap().len()
        }
    }

    impl Backend for RecordingBackend {
        fn get_apps(&self) -> Vec<FirebaseApp> {
            self.get_apps_calls.fetch_add(1, Ordering::SeqCst);
            self.registry.get_apps()
        }

        fn initialize_app(&self, options: FirebaseOptions) -> AppResult<FirebaseApp> {
            self.initialize_calls.lock().unwrap().push(options.clone());
            let remaining = self.failing_initializations.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failing_initializations.store(remaining - 1, Ordering::SeqCst);
                return Err(AppError::NoOptions);
            }
            self.registry.initialize_app(options, None)
        }

        fn get_auth(&self, app: &FirebaseApp) -> AuthResult<Arc<Auth>> {
            self.auth_calls.fetch_add(1, Ordering::SeqCst);
            crate::auth::get_auth(app)
        }

        fn get_firestore(&self, app: &FirebaseApp) -> FirestoreResult<Arc<Firestore>> {
            self.firestore_calls.fetch_add(1, Ordering::SeqCst);
            crate::firestore::get_firestore(app)
        }
    }

    fn config() -> ClientConfig {
        ClientConfig {
            api_key: Some("k1".into()),
            project_id: Some("p1".into()),
            ..Default::default()
        }
    }

    fn browser_registry() -> LazyClientRegistry<RecordingBackend> {
        LazyClientRegistry::new(RecordingBackend::default(), config(), ExecutionContext::Browser)
    }

    #[test]
    fn repeated_calls_return_identical_handles() {
        let registry = browser_registry();

        let app = registry.app().unwrap();
        let auth = registry.auth().unwrap();
        let firestore = registry.firestore().unwrap();
        for _ in 0..3 {
            assert!(registry.app().unwrap().ptr_eq(&app));
            assert!(Arc::ptr_eq(&registry.auth().unwrap(), &auth));
            assert!(Arc::ptr_eq(&registry.firestore().unwrap(), &firestore));
        }

        let backend = registry.backend();
        assert_eq!(backend.get_apps_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.initialize_count(), 1);
        assert_eq!(backend.auth_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.firestore_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn adopts_first_registered_app() {
        let shared = Arc::new(AppRegistry::new());
        let previous = shared
            .initialize_app(
                FirebaseOptions {
                    api_key: Some("from-earlier-pass".into()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        shared
            .initialize_app(
                FirebaseOptions {
                    api_key: Some("second".into()),
                    ..Default::default()
                },
                Some(FirebaseAppSettings {
                    name: Some("secondary".into()),
                    ..Default::default()
                }),
            )
            .unwrap();

        let registry =
            LazyClientRegistry::new(RecordingBackend::with_registry(shared), config(), ExecutionContext::Browser);

        let app = registry.app().unwrap();
        assert!(app.ptr_eq(&previous));
        assert_eq!(registry.backend().initialize_count(), 0);
    }

    #[test]
    fn registers_captured_configuration_when_registry_is_empty() {
        let registry = browser_registry();
        let app = registry.app().unwrap();

        let calls = registry.backend().initialize_calls.lock().unwrap().clone();
        assert_eq!(calls, vec![config().to_options()]);
        assert_eq!(app.options(), &config().to_options());
        assert_eq!(registry.backend().registry.get_apps().len(), 1);
    }

    #[test]
    fn registration_maps_every_captured_field() {
        let config = ClientConfig {
            api_key: Some("key-value".into()),
            auth_domain: Some("domain-value".into()),
            project_id: Some("project-value".into()),
            storage_bucket: Some("bucket-value".into()),
            messaging_sender_id: Some("sender-value".into()),
            app_id: Some("app-id-value".into()),
        };
        let registry = LazyClientRegistry::new(RecordingBackend::default(), config, ExecutionContext::Browser);
        let app = registry.app().unwrap();

        let expected = FirebaseOptions {
            api_key: Some("key-value".into()),
            auth_domain: Some("domain-value".into()),
            project_id: Some("project-value".into()),
            storage_bucket: Some("bucket-value".into()),
            messaging_sender_id: Some("sender-value".into()),
            app_id: Some("app-id-value".into()),
        };
        let calls = registry.backend().initialize_calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        for options in [&calls[0], app.options()] {
            assert_eq!(options.api_key.as_deref(), Some("key-value"));
            assert_eq!(options.auth_domain.as_deref(), Some("domain-value"));
            assert_eq!(options.project_id.as_deref(), Some("project-value"));
            assert_eq!(options.storage_bucket.as_deref(), Some("bucket-value"));
            assert_eq!(options.messaging_sender_id.as_deref(), Some("sender-value"));
            assert_eq!(options.app_id.as_deref(), Some("app-id-value"));
            assert_eq!(options, &expected);
        }
    }

    #[test]
    fn racing_registries_over_one_app_registry_adopt_the_same_app() {
        let shared = Arc::new(AppRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let registry = LazyClientRegistry::new(
                        SdkBackend::new(shared),
                        ClientConfig {
                            api_key: Some(format!("key-{i}")),
                            ..Default::default()
                        },
                        ExecutionContext::Browser,
                    );
                    registry.app()
                })
            })
            .collect();
        let apps: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        for app in &apps[1..] {
            assert!(app.ptr_eq(&apps[0]));
        }
        assert_eq!(shared.get_apps().len(), 1);
    }

    #[test]
    fn debug_output_reports_context_and_filled_slots() {
        let registry = browser_registry();
        let before = format!("{registry:?}");
        assert!(before.contains("context: Browser"));
        assert!(before.contains("app: None"));
        assert!(before.contains("auth_initialized: false"));

        registry.auth().unwrap();
        let after = format!("{registry:?}");
        assert!(after.contains("app: Some(\"[DEFAULT]\")"));
        assert!(after.contains("auth_initialized: true"));
        assert!(after.contains("firestore_initialized: false"));
    }

    #[test]
    fn non_browser_context_is_rejected_without_side_effects() {
        for context in [ExecutionContext::Server, ExecutionContext::WebWorker] {
            let registry = LazyClientRegistry::new(RecordingBackend::default(), config(), context);

            assert_eq!(registry.app().unwrap_err(), ClientError::ClientSideOnly { context });
            assert_eq!(registry.auth().unwrap_err(), ClientError::ClientSideOnly { context });
            assert_eq!(registry.firestore().unwrap_err(), ClientError::ClientSideOnly { context });

            assert!(!registry.is_app_initialized());
            assert!(!registry.is_auth_initialized());
            assert!(!registry.is_firestore_initialized());
            let backend = registry.backend();
            assert_eq!(backend.get_apps_calls.load(Ordering::SeqCst), 0);
            assert_eq!(backend.initialize_count(), 0);
            assert_eq!(backend.auth_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn derived_handles_share_the_app_in_either_order() {
        let auth_first = browser_registry();
        let auth = auth_first.auth().unwrap();
        let firestore = auth_first.firestore().unwrap();
        assert!(auth.app().ptr_eq(firestore.app()));
        assert!(auth.app().ptr_eq(&auth_first.app().unwrap()));

        let firestore_first = browser_registry();
        let firestore = firestore_first.firestore().unwrap();
        let auth = firestore_first.auth().unwrap();
        assert!(auth.app().ptr_eq(firestore.app()));
        assert_eq!(firestore_first.backend().initialize_count(), 1);
        assert_eq!(auth.api_key(), "k1");
        assert_eq!(firestore.project_id(), "p1");
    }

    #[test]
    fn failed_registration_is_retried() {
        let registry = browser_registry();
        registry.backend().fail_next_initializations(1);

        assert_eq!(registry.auth().unwrap_err(), ClientError::App(AppError::NoOptions));
        assert!(!registry.is_app_initialized());
        assert!(!registry.is_auth_initialized());

        let auth = registry.auth().unwrap();
        assert!(registry.is_app_initialized());
        assert_eq!(registry.backend().initialize_count(), 2);
        assert!(Arc::ptr_eq(&registry.auth().unwrap(), &auth));
    }

    #[test]
    fn derivation_failures_propagate_and_are_not_cached() {
        let registry = LazyClientRegistry::new(
            RecordingBackend::default(),
            ClientConfig {
                project_id: Some("p1".into()),
                ..Default::default()
            },
            ExecutionContext::Browser,
        );

        assert_eq!(registry.auth().unwrap_err(), ClientError::Auth(AuthError::InvalidApiKey));
        assert_eq!(registry.auth().unwrap_err(), ClientError::Auth(AuthError::InvalidApiKey));
        assert_eq!(registry.backend().auth_calls.load(Ordering::SeqCst), 2);
        assert!(!registry.is_auth_initialized());

        // The app itself was fine and stays cached.
        assert!(registry.is_app_initialized());
        assert_eq!(registry.backend().initialize_count(), 1);
        assert!(registry.firestore().is_ok());
    }

    #[test]
    fn concurrent_first_access_constructs_once() {
        let registry = Arc::new(browser_registry());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.auth().unwrap())
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

        for auth in &results[1..] {
            assert!(Arc::ptr_eq(auth, &results[0]));
        }
        assert_eq!(registry.backend().initialize_count(), 1);
        assert_eq!(registry.backend().auth_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn recreated_registry_adopts_app_from_previous_pass() {
        let shared = Arc::new(AppRegistry::new());
        let first_pass = LazyClientRegistry::new(SdkBackend::new(shared.clone()), config(), ExecutionContext::Browser);
        let app = first_pass.app().unwrap();
        drop(first_pass);

        let second_pass = LazyClientRegistry::new(
            SdkBackend::new(shared.clone()),
            ClientConfig {
                api_key: Some("changed".into()),
                ..Default::default()
            },
            ExecutionContext::Browser,
        );
        assert!(second_pass.app().unwrap().ptr_eq(&app));
        assert_eq!(shared.get_apps().len(), 1);
        // Services cached on the adopted app are shared with the earlier pass.
        assert!(Arc::ptr_eq(
            &second_pass.auth().unwrap(),
            &crate::auth::get_auth(&app).unwrap()
        ));
    }
}
