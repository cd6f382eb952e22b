//! Per-app service containers.
//!
//! Every [`FirebaseApp`](crate::app::FirebaseApp) owns one [`ComponentContainer`]; services such as
//! Auth and Firestore are instantiated through it so that each app hands out a single shared
//! instance per service name.

pub mod container;
pub mod types;

pub use container::ComponentContainer;
pub use types::{ComponentError, DynService};
