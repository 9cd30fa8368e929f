use std::{
    any::{type_name, Any},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

/// Errors raised by user supplied constructors and factories
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything stored in the container may be shared between threads
/// So it needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A type erased value produced or stored by the container
///
/// Cloning an [Instance] clones the handle, not the value.
#[derive(Clone)]
pub struct Instance {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub fn new<T: Injectable>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without allocating a new one
    pub fn from_arc<T: Injectable>(value: Arc<T>) -> Self {
        Instance {
            type_name: type_name::<T>(),
            value,
        }
    }

    /// Rust type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the wrapped value, or the actual type name on mismatch
    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.type_name),
        }
    }

    pub fn is<T: Injectable>(&self) -> bool {
        self.value.is::<T>()
    }

    /// True if both handles point at the same value
    pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
        Arc::ptr_eq(&a.value, &b.value)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}

/// Named constructor parameter overrides for a single `make` call
#[derive(Clone, Debug, Default)]
pub struct Parameters {
    values: HashMap<String, Instance>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Injectable>(self, name: impl Into<String>, value: T) -> Self {
        self.with_instance(name, Instance::new(value))
    }

    pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
