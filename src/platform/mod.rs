//! Runtime environment detection.

pub mod environment;

#[doc(inline)]
pub use environment::{ExecutionContext, FORCE_ENVIRONMENT_VAR};
