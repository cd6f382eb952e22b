//! Authentication service handles.
mod api;
mod constants;
mod error;

#[doc(inline)]
pub use api::{get_auth, Auth};

#[doc(inline)]
pub use error::{AuthError, AuthResult};
