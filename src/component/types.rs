use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub type DynService = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    MismatchingComponent { expected: String, found: String },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::MismatchingComponent { expected, found } => {
                write!(f, "Component {found} cannot satisfy provider for {expected}")
            }
        }
    }
}

impl std::error::Error for ComponentError {}
