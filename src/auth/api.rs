use std::sync::{Arc, LazyLock};

use crate::app::FirebaseApp;
use crate::auth::constants::AUTH_COMPONENT_NAME;
use crate::auth::error::{AuthError, AuthResult};
use crate::logger::Logger;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@firebase/auth"));

/// Authentication service bound to one [`FirebaseApp`].
#[derive(Debug)]
pub struct Auth {
    app: FirebaseApp,
    api_key: String,
    auth_domain: Option<String>,
}

impl Auth {
    fn new(app: FirebaseApp) -> AuthResult<Self> {
        let api_key = app
            .options()
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AuthError::InvalidApiKey)?;
        let auth_domain = app.options().auth_domain.clone();
        Ok(Self {
            app,
            api_key,
            auth_domain,
        })
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn auth_domain(&self) -> Option<&str> {
        self.auth_domain.as_deref()
    }
}

/// Returns the Auth instance of `app`, creating it on first use.
///
/// Every call for the same app yields the same `Arc<Auth>`.
pub fn get_auth(app: &FirebaseApp) -> AuthResult<Arc<Auth>> {
    app.container().get_or_try_init::<Auth, AuthError, _>(AUTH_COMPONENT_NAME, || {
        let auth = Auth::new(app.clone())?;
        LOGGER.debug(format!("Auth instance created for app '{}'", app.name()));
        Ok(auth)
    })
}
