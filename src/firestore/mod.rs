//! Cloud Firestore service handles.
mod api;
mod constants;
mod error;
mod model;

#[doc(inline)]
pub use api::{get_firestore, Firestore};

#[doc(inline)]
pub use constants::DEFAULT_DATABASE_ID;

#[doc(inline)]
pub use error::{FirestoreError, FirestoreErrorCode, FirestoreResult};

#[doc(inline)]
pub use model::DatabaseId;
