//! Named loggers shared by every service module.
//!
//! Each service owns a static [`Logger`] (for example `@firebase/client`). Messages below the
//! logger's level are dropped; everything else goes to the optional user handler, to the `log`
//! facade and to the default stdout/stderr handler.

use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock, Weak};

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INSTANCES: LazyLock<Mutex<Vec<Weak<LoggerInner>>>> = LazyLock::new(|| Mutex::new(Vec::new()));

type SharedLogHandler = Arc<dyn Fn(&Logger, LogLevel, &str) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    name: String,
    log_level: AtomicU8,
    user_log_handler: RwLock<Option<SharedLogHandler>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        let inner = Arc::new(LoggerInner {
            name: name.into(),
            log_level: AtomicU8::new(GLOBAL_LOG_LEVEL.load(Ordering::SeqCst)),
            user_log_handler: RwLock::new(None),
        });
        INSTANCES
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(Arc::downgrade(&inner));
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.inner.log_level.load(Ordering::SeqCst))
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.inner.log_level.store(level as u8, Ordering::SeqCst);
    }

    /// Installs a handler that receives every message at or above the logger's level.
    pub fn set_user_log_handler<F>(&self, handler: Option<F>)
    where
        F: Fn(&Logger, LogLevel, &str) + Send + Sync + 'static,
    {
        *self
            .inner
            .user_log_handler
            .write()
            .unwrap_or_else(|poison| poison.into_inner()) = handler.map(|f| Arc::new(f) as SharedLogHandler);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Debug, message.into());
    }

    pub fn log(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Verbose, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.dispatch(LogLevel::Error, message.into());
    }

    fn dispatch(&self, level: LogLevel, message: String) {
        if level == LogLevel::Silent || level < self.log_level() {
            return;
        }
        let user_handler = self
            .inner
            .user_log_handler
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone();
        if let Some(handler) = user_handler {
            handler(self, level, &message);
        }
        if let Some(facade_level) = level.to_facade() {
            log::log!(target: self.name(), facade_level, "{message}");
        }
        default_log_handler(self, level, &message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("log_level", &self.log_level())
            .finish()
    }
}

fn default_log_handler(logger: &Logger, level: LogLevel, message: &str) {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let header = format!("[{}]  {}:", now, logger.name());
    match level {
        LogLevel::Warn | LogLevel::Error => eprintln!("{header} {message}"),
        _ => println!("{header} {message}"),
    }
}

/// Sets the level of every live logger and of loggers created afterwards.
pub fn set_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    let mut instances = INSTANCES.lock().unwrap_or_else(|poison| poison.into_inner());
    instances.retain(|weak| match weak.upgrade() {
        Some(inner) => {
            inner.log_level.store(level as u8, Ordering::SeqCst);
            true
        }
        None => false,
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Verbose = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Silent = 5,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Verbose,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Silent,
        }
    }

    fn to_facade(self) -> Option<log::Level> {
        match self {
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::Verbose => Some(log::Level::Trace),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Warn => Some(log::Level::Warn),
            LogLevel::Error => Some(log::Level::Error),
            LogLevel::Silent => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            other => Err(LogError::InvalidLogLevel(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    InvalidLogLevel(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::InvalidLogLevel(level) => write!(f, "Invalid log level: {level}"),
        }
    }
}

impl std::error::Error for LogError {}
