use std::sync::Arc;

use thiserror::Error;

use crate::types::DynError;

/// Errors when trying to make or get an instance from the container
#[derive(Error, Debug, Clone)]
pub enum ContainerError {
    /// The requested identifier does not name any known type
    #[error("Target '{id}' could not be found.")]
    NotFound { id: String },
    /// The type exists but is abstract or an interface
    #[error("Target '{class}' is not instantiable.")]
    NotInstantiable { class: String },
    /// A constructor parameter could not be resolved and has no default
    #[error("{}", unresolvable_message(.parameter, .class))]
    UnresolvableDependency {
        parameter: String,
        class: Option<String>,
    },
    /// The constructor function of a class failed
    #[error("Constructor of '{class}' failed - error: {error}")]
    Construction { class: String, error: Arc<DynError> },
    /// A factory binding failed
    #[error("Factory for '{abstract_id}' failed - error: {error}")]
    Factory {
        abstract_id: String,
        error: Arc<DynError>,
    },

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    Downcast {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

impl ContainerError {
    /// Wraps an arbitrary error raised inside a factory binding
    pub fn factory(abstract_id: impl Into<String>, error: impl Into<DynError>) -> Self {
        Self::Factory {
            abstract_id: abstract_id.into(),
            error: Arc::new(error.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Failures that a declared default value may stand in for
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotInstantiable { .. } | Self::UnresolvableDependency { .. }
        )
    }
}

fn unresolvable_message(parameter: &str, class: &Option<String>) -> String {
    match class {
        Some(class) => format!("Unresolvable dependency resolving '${parameter}' in class '{class}'"),
        None => format!("Unresolvable dependency resolving '${parameter}'"),
    }
}

/// A primitive parameter without a default
///
/// Only ever produced and consumed while resolving a constructor's parameters.
#[derive(Debug)]
pub(crate) struct Unresolvable {
    pub parameter: String,
    pub class: Option<String>,
}

impl From<Unresolvable> for ContainerError {
    fn from(signal: Unresolvable) -> Self {
        Self::UnresolvableDependency {
            parameter: signal.parameter,
            class: signal.class,
        }
    }
}

/// Errors raised by a [TypeIntrospector](crate::introspect::TypeIntrospector)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    #[error("The type '{0}' is not known.")]
    UnknownType(String),
    #[error("The type '{0}' can not be constructed.")]
    NoConstructor(String),
}

/// Errors when reading constructor arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("No argument at position {0}")]
    Missing(usize),
    #[error("Argument {index} has type '{actual_type}', expected '{required_type}'")]
    Mismatch {
        index: usize,
        required_type: &'static str,
        actual_type: &'static str,
    },
}
