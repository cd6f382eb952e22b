//! Lazily initialized Firebase client handles.
//!
//! The [`client`] module exposes [`client::LazyClientRegistry`], which builds the app, Auth and
//! Firestore handles on first use and returns the same handles afterwards. The remaining modules
//! hold the pieces it is built on: the app registry, the Auth and Firestore services, per-app
//! service containers, environment detection and logging.

pub mod app;
pub mod auth;
pub mod client;
pub mod component;
pub mod firestore;
pub mod logger;
pub mod platform;
