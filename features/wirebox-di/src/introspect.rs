use std::{fmt::Debug, sync::Arc};

use crate::{
    errors::{ArgumentError, IntrospectionError},
    types::{DynError, Injectable, Instance},
};

/// Supplies class metadata to the container
///
/// The container never inspects types itself. Everything it knows about a
/// class name (kind, constructor parameters, how to call the constructor)
/// comes through this trait.
pub trait TypeIntrospector: Send + Sync {
    /// Looks up a class by name
    fn reflect(&self, name: &str) -> Result<ClassInfo, IntrospectionError>;

    /// Returns false for unknown, abstract and interface types
    fn is_instantiable(&self, name: &str) -> bool {
        self.reflect(name)
            .map(|class| class.is_instantiable())
            .unwrap_or(false)
    }

    /// Constructor parameters in declaration order, `None` if there is no constructor
    fn constructor_parameters(&self, name: &str) -> Result<Option<Vec<Parameter>>, IntrospectionError> {
        self.reflect(name).map(|class| class.parameters)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Concrete,
    Abstract,
    Interface,
}

/// Calls a constructor with its resolved arguments
pub type ConstructorFn = Arc<dyn Fn(Arguments) -> Result<Instance, DynError> + Send + Sync>;

/// Metadata about a single class
#[derive(Clone)]
pub struct ClassInfo {
    pub name: String,
    pub kind: ClassKind,
    /// `None` = the class declares no constructor
    pub parameters: Option<Vec<Parameter>>,
    pub constructor: Option<ConstructorFn>,
}

impl ClassInfo {
    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Concrete
    }

    /// Calls the constructor function with arguments in parameter order
    pub fn instantiate(&self, arguments: Vec<Instance>) -> Result<Instance, DynError> {
        let Some(constructor) = &self.constructor else {
            return Err(IntrospectionError::NoConstructor(self.name.clone()).into());
        };

        constructor(Arguments::new(arguments))
    }
}

impl Debug for ClassInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A single constructor parameter
#[derive(Clone, Debug)]
pub struct Parameter {
    name: String,
    declared_type: Option<String>,
    default: Option<Instance>,
}

impl Parameter {
    /// A parameter whose declared type is a class the container can resolve
    pub fn typed(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            default: None,
        }
    }

    /// A parameter without a resolvable type (strings, numbers, untyped)
    pub fn primitive(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    pub fn with_default<T: Injectable>(self, value: T) -> Self {
        self.with_default_instance(Instance::new(value))
    }

    pub fn with_default_instance(mut self, value: Instance) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&Instance> {
        self.default.as_ref()
    }
}

/// Resolved constructor arguments, in declaration order
#[derive(Debug, Default)]
pub struct Arguments(Vec<Instance>);

impl Arguments {
    pub fn new(values: Vec<Instance>) -> Self {
        Arguments(values)
    }

    pub fn instance(&self, index: usize) -> Result<&Instance, ArgumentError> {
        self.0.get(index).ok_or(ArgumentError::Missing(index))
    }

    pub fn get<T: Injectable>(&self, index: usize) -> Result<Arc<T>, ArgumentError> {
        self.instance(index)?
            .downcast::<T>()
            .map_err(|actual_type| ArgumentError::Mismatch {
                index,
                required_type: std::any::type_name::<T>(),
                actual_type,
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
