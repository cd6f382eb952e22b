pub(crate) const FIRESTORE_COMPONENT_NAME: &str = "firestore";
pub const DEFAULT_DATABASE_ID: &str = "(default)";
