//! Wirebox Config provides a registry of named configs that can be installed
//! into a [wirebox_di::Container].
//!
//! Wirebox Config is split into two major parts:
//! 1. ConfigProvider: Used to collect all configs and install them in a container
//! 2. Config<T>: A wrapper type to retrieve a typed config from a container
//!
//! Installed configs are plain instances, so a constructor parameter whose
//! declared type is the config's name receives the config.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use wirebox_config::ConfigProvider;
//! use wirebox_di::{ArgumentError, Container, Parameter, TypeRegistry};
//!
//! struct AppConfig {
//!     port: u16,
//! }
//!
//! struct Server {
//!     config: Arc<AppConfig>,
//! }
//!
//! let types = TypeRegistry::new().class_with(
//!     "Server",
//!     [Parameter::typed("config", "config.app")],
//!     |args| Ok::<_, ArgumentError>(Server { config: args.get(0)? }),
//! );
//! let container = Container::new(types);
//!
//! let mut provider = ConfigProvider::initialize();
//! provider.add_config("config.app", AppConfig { port: 8080 }).unwrap();
//! provider.install(&container);
//!
//! let server = container.get_as::<Server>("Server").unwrap();
//! assert_eq!(server.config.port, 8080);
//! ```

pub mod config;
pub mod errors;
pub mod provider;

pub use config::Config;
pub use errors::ConfigError;
pub use provider::ConfigProvider;
