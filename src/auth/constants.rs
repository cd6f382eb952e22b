pub const AUTH_COMPONENT_NAME: &str = "auth";
