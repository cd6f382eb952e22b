/// Name given to apps initialized without an explicit name.
pub const DEFAULT_ENTRY_NAME: &str = "[DEFAULT]";
