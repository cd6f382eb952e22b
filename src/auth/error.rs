use crate::component::ComponentError;
use std::fmt;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The app was configured without a usable API key.
    InvalidApiKey,
    Component(ComponentError),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidApiKey => "auth/invalid-api-key",
            AuthError::Component(_) => "auth/internal-error",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidApiKey => {
                write!(f, "Your API key is invalid, please check you have copied it correctly. (auth/invalid-api-key)")
            }
            AuthError::Component(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<ComponentError> for AuthError {
    fn from(error: ComponentError) -> Self {
        AuthError::Component(error)
    }
}
