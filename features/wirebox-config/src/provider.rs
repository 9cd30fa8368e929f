use std::{collections::BTreeMap, sync::Arc};

use wirebox_di::{Container, Injectable, Instance};

use crate::errors::ConfigError;

/// A provider to register all configs.
///
/// Configs are registered under a name and can be installed into a
/// [Container], where each one becomes a pre built instance bound to its name.
#[derive(Default)]
pub struct ConfigProvider {
    configs: BTreeMap<String, Instance>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Retrieve a config by name.
    ///
    /// Returns `Ok(None)` if no config has that name, and a [ConfigError] if it
    /// holds a different type
    pub fn get_config<T: Injectable>(&self, name: &str) -> Result<Option<Arc<T>>, ConfigError> {
        self.configs
            .get(name)
            .map(|entry| entry.downcast::<T>())
            .transpose()
            .map_err(|actual_type| ConfigError::TypeMismatch {
                name: name.to_string(),
                required_type: std::any::type_name::<T>(),
                actual_type,
            })
    }

    /// Add a config to the registry.
    ///
    /// If the name is already taken, it will return a [ConfigError]
    pub fn add_config<T: Injectable>(
        &mut self,
        name: impl Into<String>,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let name = name.into();

        if self.configs.contains_key(&name) {
            return Err(ConfigError::AlreadyRegistered(name));
        }

        tracing::debug!("Added config {name} ({})", std::any::type_name::<T>());
        self.configs.insert(name, Instance::new(config));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Injectable>(
        &mut self,
        name: impl Into<String>,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(name, c),
            None => Ok(self),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Registers every config as an instance on the container
    ///
    /// Returns the number of installed configs.
    pub fn install(&self, container: &Container) -> usize {
        for (name, config) in &self.configs {
            container.instance(name.clone(), config.clone());
        }

        tracing::debug!("Installed {} configs", self.configs.len());
        self.configs.len()
    }
}
