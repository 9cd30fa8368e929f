use std::{
    any::type_name,
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{
    binding::{Binding, Concrete},
    errors::ContainerError,
    introspect::TypeIntrospector,
    types::{Injectable, Instance, Parameters},
};

/// Dependency injection container
///
/// Maps abstract identifiers to [Concrete] construction strategies and keeps
/// the instances of shared bindings. Cloning the container is cheap; all
/// clones share the same bindings and instances.
#[derive(Clone)]
pub struct Container(pub(crate) Arc<ContainerInner>);
pub(crate) struct ContainerInner {
    /// Bindings and cached instances are guarded together
    registry: Mutex<Registry>,
    pub(crate) introspector: Arc<dyn TypeIntrospector>,
}

#[derive(Default)]
struct Registry {
    bindings: HashMap<String, Binding>,
    instances: HashMap<String, Instance>,
}

impl Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.0.registry.lock();
        let mut map = f.debug_struct("Container");
        for (abstract_id, binding) in &registry.bindings {
            let val = if binding.shared { "shared" } else { "bound" };
            map.field(abstract_id, &val);
        }
        for abstract_id in registry.instances.keys() {
            map.field(abstract_id, &"instance");
        }
        map.finish()
    }
}

impl Container {
    pub fn new(introspector: impl TypeIntrospector + 'static) -> Self {
        Self::with_introspector(Arc::new(introspector))
    }

    pub fn with_introspector(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self(Arc::new(ContainerInner {
            registry: Mutex::new(Registry::default()),
            introspector,
        }))
    }

    pub fn introspector(&self) -> &dyn TypeIntrospector {
        self.0.introspector.as_ref()
    }
}

// Binding registry
impl Container {
    /// Registers `abstract_id -> concrete`, defaulting to the abstract itself
    ///
    /// Replaces any earlier binding of the same abstract.
    pub fn register(&self, abstract_id: impl Into<String>, concrete: Option<Concrete>, shared: bool) {
        let abstract_id = abstract_id.into();
        let concrete = concrete.unwrap_or_else(|| Concrete::Class(abstract_id.clone()));

        tracing::debug!("Binding {abstract_id} to {concrete:?} (shared: {shared})");
        self.0
            .registry
            .lock()
            .bindings
            .insert(abstract_id, Binding { concrete, shared });
    }

    pub fn bind(&self, abstract_id: impl Into<String>, concrete: impl Into<Concrete>) {
        self.register(abstract_id, Some(concrete.into()), false);
    }

    /// Binds an abstract to itself
    pub fn bind_self(&self, abstract_id: impl Into<String>) {
        self.register(abstract_id, None, false);
    }

    pub fn bind_factory<F>(&self, abstract_id: impl Into<String>, factory: F)
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.register(abstract_id, Some(Concrete::factory(factory)), false);
    }

    pub fn share(&self, abstract_id: impl Into<String>, concrete: impl Into<Concrete>) {
        self.register(abstract_id, Some(concrete.into()), true);
    }

    /// Shares an abstract built as itself
    pub fn share_self(&self, abstract_id: impl Into<String>) {
        self.register(abstract_id, None, true);
    }

    pub fn share_factory<F>(&self, abstract_id: impl Into<String>, factory: F)
    where
        F: Fn(&Container, &Parameters) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        self.register(abstract_id, Some(Concrete::factory(factory)), true);
    }

    /// Stores a pre built value, returned by every later resolution of `abstract_id`
    pub fn instance(&self, abstract_id: impl Into<String>, value: Instance) -> Instance {
        let abstract_id = abstract_id.into();
        tracing::debug!("Registered instance of {} as {abstract_id}", value.type_name());
        self.0
            .registry
            .lock()
            .instances
            .insert(abstract_id, value.clone());
        value
    }

    pub fn is_bound(&self, abstract_id: &str) -> bool {
        let registry = self.0.registry.lock();
        registry.bindings.contains_key(abstract_id) || registry.instances.contains_key(abstract_id)
    }

    pub fn is_shared(&self, abstract_id: &str) -> bool {
        let registry = self.0.registry.lock();
        registry.instances.contains_key(abstract_id)
            || registry
                .bindings
                .get(abstract_id)
                .is_some_and(|binding| binding.shared)
    }

    /// The registered descriptor, or the abstract itself as a class name
    pub fn get_concrete(&self, abstract_id: &str) -> Concrete {
        self.0
            .registry
            .lock()
            .bindings
            .get(abstract_id)
            .map(|binding| binding.concrete.clone())
            .unwrap_or_else(|| Concrete::Class(abstract_id.to_string()))
    }

    /// All bindings as `(abstract, shared)`, sorted by abstract
    pub fn bindings(&self) -> Vec<(String, bool)> {
        let registry = self.0.registry.lock();
        let mut bindings: Vec<_> = registry
            .bindings
            .iter()
            .map(|(abstract_id, binding)| (abstract_id.clone(), binding.shared))
            .collect();
        bindings.sort();
        bindings
    }

    pub(crate) fn cached(&self, abstract_id: &str) -> Option<Instance> {
        self.0.registry.lock().instances.get(abstract_id).cloned()
    }

    /// Caches a freshly built instance
    ///
    /// If another caller cached one first, that instance is kept and returned.
    pub(crate) fn cache(&self, abstract_id: &str, instance: Instance) -> Instance {
        match self.0.registry.lock().instances.entry(abstract_id.to_string()) {
            Entry::Occupied(existing) => {
                tracing::debug!("{abstract_id} was cached concurrently, discarding new instance");
                existing.get().clone()
            }
            Entry::Vacant(slot) => {
                tracing::debug!("Caching shared instance of {abstract_id}");
                slot.insert(instance).clone()
            }
        }
    }
}

// Lookup
impl Container {
    /// True if `id` is bound, cached or names an instantiable class
    ///
    /// Never fails: unknown types and introspection errors give `false`, as
    /// does the empty string.
    pub fn has(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }

        self.is_bound(id) || self.0.introspector.is_instantiable(id)
    }

    /// Resolves `id`
    ///
    /// Fails with [ContainerError::NotFound] for unknown identifiers and
    /// [ContainerError::NotInstantiable] for abstract types.
    pub fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        if id.is_empty() {
            return Err(ContainerError::NotFound { id: id.to_string() });
        }

        self.make(id)
    }

    pub fn get_as<T: Injectable>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        downcast_instance(self.get(id)?)
    }
}

pub(crate) fn downcast_instance<T: Injectable>(instance: Instance) -> Result<Arc<T>, ContainerError> {
    instance
        .downcast()
        .map_err(|actual_type| ContainerError::Downcast {
            required_type: type_name::<T>(),
            actual_type,
        })
}
