use std::sync::LazyLock;

pub use crate::logger::Logger;

pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@firebase/app"));
