use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::component::types::{ComponentError, DynService};

#[derive(Clone)]
pub struct ComponentContainer {
    inner: Arc<ComponentContainerInner>,
}

struct ComponentContainerInner {
    name: Arc<str>,
    services: Mutex<HashMap<Arc<str>, DynService>>,
}

impl ComponentContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ComponentContainerInner {
                name: Arc::from(name.into()),
                services: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Name of the app owning this container.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the cached service registered under `name`, if one was instantiated.
    pub fn get_immediate<T>(&self, name: &str) -> Result<Option<Arc<T>>, ComponentError>
    where
        T: Any + Send + Sync + 'static,
    {
        let services = self.inner.services.lock().unwrap_or_else(|poison| poison.into_inner());
        services.get(name).map(|service| downcast::<T>(name, service)).transpose()
    }

    /// Returns the service registered under `name`, instantiating it with `factory` on first use.
    ///
    /// The container lock is held while `factory` runs, so concurrent callers observe exactly one
    /// instance. A failing factory leaves nothing behind and the next call runs it again.
    pub fn get_or_try_init<T, E, F>(&self, name: &str, factory: F) -> Result<Arc<T>, E>
    where
        T: Any + Send + Sync + 'static,
        E: From<ComponentError>,
        F: FnOnce() -> Result<T, E>,
    {
        let mut services = self.inner.services.lock().unwrap_or_else(|poison| poison.into_inner());
        if let Some(service) = services.get(name) {
            return Ok(downcast::<T>(name, service)?);
        }
        let instance = Arc::new(factory()?);
        services.insert(Arc::from(name), instance.clone() as DynService);
        Ok(instance)
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.inner
            .services
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .contains_key(name)
    }
}

fn downcast<T>(name: &str, service: &DynService) -> Result<Arc<T>, ComponentError>
where
    T: Any + Send + Sync + 'static,
{
    Arc::clone(service)
        .downcast::<T>()
        .map_err(|_| ComponentError::MismatchingComponent {
            expected: type_name::<T>().to_string(),
            found: name.to_string(),
        })
}
