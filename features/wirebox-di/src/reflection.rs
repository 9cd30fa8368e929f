use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::IntrospectionError,
    introspect::{Arguments, ClassInfo, ClassKind, ConstructorFn, Parameter, TypeIntrospector},
    types::{DynError, Injectable, Instance},
};

/// A [TypeIntrospector] backed by classes declared up front
///
/// ```rust
/// use wirebox_di::{Parameter, TypeRegistry};
///
/// struct Logger;
/// struct Service {
///     logger: std::sync::Arc<Logger>,
/// }
///
/// let types = TypeRegistry::new()
///     .class("Logger", || Logger)
///     .class_with("Service", [Parameter::typed("logger", "Logger")], |args| {
///         Ok::<_, wirebox_di::ArgumentError>(Service { logger: args.get(0)? })
///     });
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    classes: HashMap<String, ClassInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a class without constructor parameters
    pub fn class<T, F>(self, name: impl Into<String>, constructor: F) -> Self
    where
        T: Injectable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let wrapped: ConstructorFn =
            Arc::new(move |_: Arguments| -> Result<Instance, DynError> {
                Ok(Instance::new(constructor()))
            });
        self.declare(ClassInfo {
            name: name.into(),
            kind: ClassKind::Concrete,
            parameters: None,
            constructor: Some(wrapped),
        })
    }

    /// Declares a class whose constructor takes the given parameters
    pub fn class_with<T, E, F>(
        self,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        constructor: F,
    ) -> Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(Arguments) -> Result<T, E> + Send + Sync + 'static,
    {
        let wrapped: ConstructorFn =
            Arc::new(move |args: Arguments| -> Result<Instance, DynError> {
                constructor(args).map(Instance::new).map_err(Into::into)
            });
        self.declare(ClassInfo {
            name: name.into(),
            kind: ClassKind::Concrete,
            parameters: Some(parameters.into_iter().collect()),
            constructor: Some(wrapped),
        })
    }

    pub fn abstract_class(self, name: impl Into<String>) -> Self {
        self.declare_uninstantiable(name.into(), ClassKind::Abstract)
    }

    pub fn interface(self, name: impl Into<String>) -> Self {
        self.declare_uninstantiable(name.into(), ClassKind::Interface)
    }

    /// Adds a class, replacing an earlier declaration of the same name
    pub fn declare(mut self, class: ClassInfo) -> Self {
        tracing::trace!("Declared class {} ({:?})", class.name, class.kind);
        self.classes.insert(class.name.clone(), class);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    fn declare_uninstantiable(self, name: String, kind: ClassKind) -> Self {
        self.declare(ClassInfo {
            name,
            kind,
            parameters: None,
            constructor: None,
        })
    }
}

impl TypeIntrospector for TypeRegistry {
    fn reflect(&self, name: &str) -> Result<ClassInfo, IntrospectionError> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| IntrospectionError::UnknownType(name.to_string()))
    }
}
