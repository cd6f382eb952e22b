use crate::app::FirebaseApp;
use crate::firestore::constants::DEFAULT_DATABASE_ID;
use crate::firestore::error::{missing_project_id, FirestoreResult};

/// Fully qualified database identifier (project + database name).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseId {
    project_id: String,
    database: String,
}

impl DatabaseId {
    pub fn new(project_id: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: database.into(),
        }
    }

    pub fn default(project_id: impl Into<String>) -> Self {
        Self::new(project_id, DEFAULT_DATABASE_ID)
    }

    /// Default database of the app's project; blank project ids count as missing.
    pub fn from_app(app: &FirebaseApp) -> FirestoreResult<Self> {
        let project_id = app
            .options()
            .project_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(missing_project_id)?;
        Ok(Self::default(project_id))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}
