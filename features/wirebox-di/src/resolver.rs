//! Recursive construction of instances
//!
//! `make` consults the bindings, follows indirections between abstract
//! identifiers and caches shared results. `build` does the actual work:
//! calling a factory, or reflecting a class and resolving each of its
//! constructor parameters through the container again.
//!
//! There is no cycle detection. A binding chain or constructor graph that
//! leads back to itself recurses until the stack is exhausted.

use std::sync::Arc;

use crate::{
    binding::Concrete,
    container::{downcast_instance, Container},
    errors::{ContainerError, IntrospectionError, Unresolvable},
    introspect::{ClassInfo, Parameter},
    types::{Injectable, Instance, Parameters},
};

impl Container {
    pub fn make(&self, abstract_id: &str) -> Result<Instance, ContainerError> {
        self.make_with(abstract_id, &Parameters::new())
    }

    /// Resolves `abstract_id`, using `overrides` for the constructor parameters of the same name
    pub fn make_with(&self, abstract_id: &str, overrides: &Parameters) -> Result<Instance, ContainerError> {
        if let Some(instance) = self.cached(abstract_id) {
            tracing::trace!("Resolved {abstract_id} from cache");
            return Ok(instance);
        }

        let concrete = self.get_concrete(abstract_id);
        let instance = match &concrete {
            Concrete::Class(next) if !concrete.is_buildable_for(abstract_id) => {
                tracing::trace!("Resolving {abstract_id} through {next}");
                self.make_with(next, overrides)?
            }
            _ => self.build(&concrete, overrides)?,
        };

        // Sharing is decided by the requested abstract, not by whatever it resolved through
        if self.is_shared(abstract_id) {
            return Ok(self.cache(abstract_id, instance));
        }

        Ok(instance)
    }

    pub fn make_as<T: Injectable>(
        &self,
        abstract_id: &str,
        overrides: &Parameters,
    ) -> Result<Arc<T>, ContainerError> {
        downcast_instance(self.make_with(abstract_id, overrides)?)
    }

    /// Constructs `concrete` directly, bypassing bindings and the cache
    pub fn build(&self, concrete: &Concrete, overrides: &Parameters) -> Result<Instance, ContainerError> {
        let name = match concrete {
            Concrete::Factory(factory) => return factory(self, overrides),
            Concrete::Class(name) => name,
        };

        let class = self.0.introspector.reflect(name).map_err(|e| match e {
            IntrospectionError::UnknownType(_) => ContainerError::NotFound { id: name.clone() },
            IntrospectionError::NoConstructor(_) => ContainerError::NotInstantiable {
                class: name.clone(),
            },
        })?;

        if !class.is_instantiable() {
            return Err(ContainerError::NotInstantiable { class: class.name });
        }

        let arguments = match &class.parameters {
            Some(parameters) if !parameters.is_empty() => {
                self.resolve_dependencies(&class, parameters, overrides)?
            }
            _ => Vec::new(),
        };

        let instance = class
            .instantiate(arguments)
            .map_err(|error| ContainerError::Construction {
                class: class.name.clone(),
                error: Arc::new(error),
            })?;

        tracing::debug!("Constructed instance of {}", class.name);
        Ok(instance)
    }

    fn resolve_dependencies(
        &self,
        class: &ClassInfo,
        parameters: &[Parameter],
        overrides: &Parameters,
    ) -> Result<Vec<Instance>, ContainerError> {
        let mut arguments = Vec::with_capacity(parameters.len());

        for parameter in parameters {
            let argument = if let Some(value) = overrides.get(parameter.name()) {
                tracing::trace!("{}: using override for ${}", class.name, parameter.name());
                value.clone()
            } else if let Some(declared_type) = parameter.declared_type() {
                self.resolve_class_param(class, parameter, declared_type)?
            } else {
                self.resolve_primitive_param(class, parameter)?
            };

            arguments.push(argument);
        }

        Ok(arguments)
    }

    /// Resolves a class typed parameter, falling back to its default
    fn resolve_class_param(
        &self,
        class: &ClassInfo,
        parameter: &Parameter,
        declared_type: &str,
    ) -> Result<Instance, ContainerError> {
        tracing::trace!("{}: resolving ${} as {declared_type}", class.name, parameter.name());

        match self.make(declared_type) {
            Ok(instance) => Ok(instance),
            Err(error) if error.is_resolution_failure() => match parameter.default_value() {
                Some(default) => {
                    tracing::warn!(
                        "{}: could not resolve ${} ({error}), using default",
                        class.name,
                        parameter.name()
                    );
                    Ok(default.clone())
                }
                None => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    fn resolve_primitive_param(
        &self,
        class: &ClassInfo,
        parameter: &Parameter,
    ) -> Result<Instance, Unresolvable> {
        parameter.default_value().cloned().ok_or_else(|| Unresolvable {
            parameter: parameter.name().to_string(),
            class: Some(class.name.clone()),
        })
    }
}
