//! Execution-context detection.
//!
//! The client registry only hands out handles inside a browser-like context. The context is
//! detected once and then injected, so callers and tests can also supply it explicitly.

use std::env;
use std::fmt;

/// Overrides detection: `browser`, `worker`, `node` or `server`.
pub const FORCE_ENVIRONMENT_VAR: &str = "FIREBASE_FORCE_ENVIRONMENT";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// A global `window` object is present.
    Browser,
    WebWorker,
    /// Native process or server-side rendering; no `window`.
    Server,
}

impl ExecutionContext {
    /// Detects the current context, honouring [`FORCE_ENVIRONMENT_VAR`] first.
    pub fn detect() -> Self {
        Self::detect_with(|key| env::var(key).ok())
    }

    /// Same as [`ExecutionContext::detect`] but reads the override through `lookup`.
    pub fn detect_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(forced) = lookup(FORCE_ENVIRONMENT_VAR).and_then(|raw| Self::from_label(&raw)) {
            return forced;
        }
        Self::from_globals()
    }

    /// Returns `true` when the context exposes a browser `window`.
    pub fn is_browser(self) -> bool {
        matches!(self, ExecutionContext::Browser)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionContext::Browser => "browser",
            ExecutionContext::WebWorker => "worker",
            ExecutionContext::Server => "server",
        }
    }

    fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "browser" => Some(ExecutionContext::Browser),
            "worker" | "webworker" | "web-worker" => Some(ExecutionContext::WebWorker),
            "node" | "server" => Some(ExecutionContext::Server),
            _ => None,
        }
    }

    #[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
    fn from_globals() -> Self {
        use wasm_bindgen::JsCast;

        let global = js_sys::global();
        if global.clone().dyn_into::<web_sys::Window>().is_ok() {
            ExecutionContext::Browser
        } else if global.dyn_into::<web_sys::WorkerGlobalScope>().is_ok() {
            ExecutionContext::WebWorker
        } else {
            ExecutionContext::Server
        }
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "wasm-web")))]
    fn from_globals() -> Self {
        ExecutionContext::Server
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
