use std::{fmt::Debug, sync::Arc};

use crate::{container::Container, errors::ContainerError, types::{Instance, Parameters}};

/// Builds an instance, taking over construction completely
pub type Factory =
    Arc<dyn Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync>;

/// How an abstract identifier is turned into an instance
#[derive(Clone)]
pub enum Concrete {
    /// Resolve this class name
    Class(String),
    /// Call this factory
    Factory(Factory),
}

impl Concrete {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Concrete::Factory(Arc::new(factory))
    }

    /// Can be built without another hop through `make`
    ///
    /// True for factories and for a class name equal to the requested abstract.
    pub fn is_buildable_for(&self, abstract_id: &str) -> bool {
        match self {
            Concrete::Class(name) => name == abstract_id,
            Concrete::Factory(_) => true,
        }
    }
}

impl Debug for Concrete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Concrete::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Concrete::Factory(_) => f.write_str("Factory(<function>)"),
        }
    }
}

impl From<&str> for Concrete {
    fn from(name: &str) -> Self {
        Concrete::Class(name.to_string())
    }
}

impl From<String> for Concrete {
    fn from(name: String) -> Self {
        Concrete::Class(name)
    }
}

/// A registered binding
#[derive(Clone, Debug)]
pub struct Binding {
    pub concrete: Concrete,
    pub shared: bool,
}
