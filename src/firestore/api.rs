use std::sync::{Arc, LazyLock};

use crate::app::FirebaseApp;
use crate::firestore::constants::FIRESTORE_COMPONENT_NAME;
use crate::firestore::error::{FirestoreError, FirestoreResult};
use crate::firestore::model::DatabaseId;
use crate::logger::Logger;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@firebase/firestore"));

#[derive(Clone, Debug)]
pub struct Firestore {
    inner: Arc<FirestoreInner>,
}

#[derive(Debug)]
struct FirestoreInner {
    app: FirebaseApp,
    database_id: DatabaseId,
}

impl Firestore {
    pub(crate) fn new(app: FirebaseApp, database_id: DatabaseId) -> Self {
        Self {
            inner: Arc::new(FirestoreInner { app, database_id }),
        }
    }

    /// Returns the `FirebaseApp` this Firestore instance is scoped to.
    pub fn app(&self) -> &FirebaseApp {
        &self.inner.app
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.inner.database_id
    }

    pub fn project_id(&self) -> &str {
        self.inner.database_id.project_id()
    }

    /// Returns the logical database name (usually `"(default)"`).
    pub fn database(&self) -> &str {
        self.inner.database_id.database()
    }
}

/// Resolves (or lazily instantiates) the Firestore service for the provided app.
///
/// Multiple calls with the same app yield the same shared `Arc<Firestore>` handle.
pub fn get_firestore(app: &FirebaseApp) -> FirestoreResult<Arc<Firestore>> {
    app.container().get_or_try_init::<Firestore, FirestoreError, _>(FIRESTORE_COMPONENT_NAME, || {
        let database_id = DatabaseId::from_app(app)?;
        LOGGER.debug(format!(
            "Firestore instance created for projects/{}/databases/{}",
            database_id.project_id(),
            database_id.database()
        ));
        Ok(Firestore::new(app.clone(), database_id))
    })
}
