use std::fmt;

use crate::app::AppError;
use crate::auth::AuthError;
use crate::firestore::FirestoreError;
use crate::platform::ExecutionContext;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failures surfaced by [`LazyClientRegistry`](crate::client::LazyClientRegistry).
///
/// Apart from [`ClientError::ClientSideOnly`], every variant carries the service error unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The app accessor ran outside a browser context.
    ClientSideOnly { context: ExecutionContext },
    App(AppError),
    Auth(AuthError),
    Firestore(FirestoreError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::ClientSideOnly { context } => write!(
                f,
                "Firebase can only be initialized on the client side (current context: {context})"
            ),
            ClientError::App(err) => write!(f, "{err}"),
            ClientError::Auth(err) => write!(f, "{err}"),
            ClientError::Firestore(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::ClientSideOnly { .. } => None,
            ClientError::App(err) => Some(err),
            ClientError::Auth(err) => Some(err),
            ClientError::Firestore(err) => Some(err),
        }
    }
}

impl From<AppError> for ClientError {
    fn from(error: AppError) -> Self {
        ClientError::App(error)
    }
}

impl From<AuthError> for ClientError {
    fn from(error: AuthError) -> Self {
        ClientError::Auth(error)
    }
}

impl From<FirestoreError> for ClientError {
    fn from(error: FirestoreError) -> Self {
        ClientError::Firestore(error)
    }
}
