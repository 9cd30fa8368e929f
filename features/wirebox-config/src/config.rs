use std::{ops::Deref, sync::Arc};

use wirebox_di::{Container, ContainerError, Injectable};

/// A typed handle to a config installed in a [Container]
///
/// # Example
/// ```rust
/// use wirebox_config::{Config, ConfigProvider};
/// use wirebox_di::{Container, TypeRegistry};
///
/// struct MailConfig {
///     host: String,
/// }
///
/// let mut provider = ConfigProvider::initialize();
/// provider
///     .add_config("mail", MailConfig { host: "smtp.local".into() })
///     .unwrap();
///
/// let container = Container::new(TypeRegistry::new());
/// provider.install(&container);
///
/// let config = Config::<MailConfig>::resolve(&container, "mail").unwrap();
/// assert_eq!(config.host, "smtp.local");
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Config<T> {
    /// Looks up the config bound under `name`
    pub fn resolve(container: &Container, name: &str) -> Result<Self, ContainerError> {
        let inner = container.get_as::<T>(name)?;
        Ok(Config { inner })
    }
}
