//! Wirebox DI is a string keyed dependency injection container.
//!
//! Abstract identifiers (interface or class names) are bound to a
//! [Concrete]: either another class name or a factory. Resolving an
//! identifier follows the bindings, reflects the class through a
//! [TypeIntrospector] and recursively resolves each constructor parameter.
//!
//! The container consists of three parts:
//! 1. A [TypeIntrospector] describing classes - [TypeRegistry] is the bundled one
//! 2. The binding registry on [Container] (`bind`, `share`, `instance`, ...)
//! 3. The resolver (`make`, `make_with`, `get`, `build`)
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use wirebox_di::{ArgumentError, Container, Parameter, TypeRegistry};
//!
//! struct Logger;
//! struct Service {
//!     logger: Arc<Logger>,
//!     name: Arc<String>,
//! }
//!
//! let types = TypeRegistry::new()
//!     .class("Logger", || Logger)
//!     .class_with(
//!         "Service",
//!         [
//!             Parameter::typed("logger", "Logger"),
//!             Parameter::primitive("name").with_default("default".to_string()),
//!         ],
//!         |args| {
//!             Ok::<_, ArgumentError>(Service {
//!                 logger: args.get(0)?,
//!                 name: args.get(1)?,
//!             })
//!         },
//!     );
//!
//! let container = Container::new(types);
//! container.bind_self("Logger");
//!
//! let service = container.get_as::<Service>("Service").unwrap();
//! assert_eq!(service.name.as_str(), "default");
//! ```

pub mod binding;
pub mod container;
pub mod errors;
pub mod introspect;
pub mod reflection;
pub mod resolver;
pub mod types;

pub use binding::{Binding, Concrete, Factory};
pub use container::Container;
pub use errors::{ArgumentError, ContainerError, IntrospectionError};
pub use introspect::{Arguments, ClassInfo, ClassKind, ConstructorFn, Parameter, TypeIntrospector};
pub use reflection::TypeRegistry;
pub use types::{DynError, Injectable, Instance, Parameters};
