use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use wirebox_di::{
    ArgumentError, ClassInfo, Container, ContainerError, DynError, Instance, IntrospectionError,
    Parameter, Parameters, TypeIntrospector, TypeRegistry,
};

#[derive(Debug)]
struct Logger;

#[derive(Debug)]
struct FileLogger {
    path: Arc<String>,
}

#[derive(Debug)]
struct Service {
    logger: Arc<Logger>,
    name: Arc<String>,
}

#[derive(Debug)]
struct Mailer {
    transport: Instance,
}

fn types() -> TypeRegistry {
    TypeRegistry::new()
        .class("Logger", || Logger)
        .interface("LoggerInterface")
        .abstract_class("BaseLogger")
        .class_with(
            "FileLogger",
            [Parameter::primitive("path").with_default("/var/log/app.log".to_string())],
            |args| Ok::<_, ArgumentError>(FileLogger { path: args.get(0)? }),
        )
        .class_with(
            "Service",
            [
                Parameter::typed("logger", "Logger"),
                Parameter::primitive("name").with_default("default".to_string()),
            ],
            |args| {
                Ok::<_, ArgumentError>(Service {
                    logger: args.get(0)?,
                    name: args.get(1)?,
                })
            },
        )
        .class_with(
            "Mailer",
            [Parameter::typed("transport", "Transport").with_default("null".to_string())],
            |args| {
                Ok::<_, ArgumentError>(Mailer {
                    transport: args.instance(0)?.clone(),
                })
            },
        )
}

#[test]
fn service_receives_fresh_logger_and_default_name() {
    let container = Container::new(types());
    container.bind_self("Logger");

    let service = container.make_as::<Service>("Service", &Parameters::new()).unwrap();
    let other = container.make_as::<Service>("Service", &Parameters::new()).unwrap();

    assert_eq!(service.name.as_str(), "default");
    assert!(!Arc::ptr_eq(&service.logger, &other.logger));
}

#[test]
fn unbound_types_resolve_as_themselves() {
    let container = Container::new(types());

    let a = container.make("Logger").unwrap();
    let b = container.make("Logger").unwrap();

    assert!(a.is::<Logger>());
    assert!(!Instance::ptr_eq(&a, &b));
}

#[test]
fn shared_binding_returns_same_instance() {
    let container = Container::new(types());
    container.share_self("Logger");

    let a = container.make("Logger").unwrap();
    let b = container.make("Logger").unwrap();

    assert!(Instance::ptr_eq(&a, &b));
    assert!(container.is_shared("Logger"));
}

#[test]
fn registered_instance_wins_over_binding() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let counter = constructed.clone();
    let container = Container::new(types());
    container.bind_factory("Logger", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Instance::new(Logger))
    });

    let existing = container.instance("Logger", Instance::new(Logger));
    let resolved = container.make("Logger").unwrap();

    assert!(container.is_bound("Logger"));
    assert!(Instance::ptr_eq(&existing, &resolved));
    assert_eq!(constructed.load(Ordering::SeqCst), 0);
}

#[test]
fn instance_without_binding_is_bound_and_shared() {
    let container = Container::new(TypeRegistry::new());

    container.instance("config.name", Instance::new("wirebox".to_string()));

    assert!(container.is_bound("config.name"));
    assert!(container.is_shared("config.name"));
    assert!(container.has("config.name"));
    assert_eq!(
        container.get_as::<String>("config.name").unwrap().as_str(),
        "wirebox"
    );
}

#[test]
fn binding_chain_applies_intermediate_sharing() {
    let container = Container::new(types());
    container.bind("LoggerInterface", "BaseLogger");
    container.share("BaseLogger", "FileLogger");

    let first = container.make("LoggerInterface").unwrap();
    let second = container.make("LoggerInterface").unwrap();
    let direct = container.make("BaseLogger").unwrap();

    assert!(first.is::<FileLogger>());
    // BaseLogger is shared, LoggerInterface is not: both hops return the cached FileLogger
    assert!(Instance::ptr_eq(&first, &second));
    assert!(Instance::ptr_eq(&first, &direct));
    assert!(!container.is_shared("LoggerInterface"));
}

#[test]
fn sharing_is_decided_by_requested_abstract() {
    let container = Container::new(types());
    container.share("LoggerInterface", "FileLogger");

    let a = container.make("LoggerInterface").unwrap();
    let b = container.make("LoggerInterface").unwrap();
    let c = container.make("FileLogger").unwrap();

    assert!(Instance::ptr_eq(&a, &b));
    assert!(!Instance::ptr_eq(&a, &c));
}

#[test]
fn rebinding_replaces_previous_binding() {
    let container = Container::new(types());
    container.bind("LoggerInterface", "Logger");
    container.bind("LoggerInterface", "FileLogger");

    assert!(container.make("LoggerInterface").unwrap().is::<FileLogger>());
    assert_eq!(container.bindings(), vec![("LoggerInterface".to_string(), false)]);
}

#[test]
fn overrides_are_used_verbatim() {
    let container = Container::new(types());
    let logger = Instance::new(Logger);

    let service = container
        .make_as::<Service>(
            "Service",
            &Parameters::new()
                .with_instance("logger", logger.clone())
                .with("name", "custom".to_string()),
        )
        .unwrap();

    assert!(Arc::ptr_eq(&service.logger, &logger.downcast::<Logger>().unwrap()));
    assert_eq!(service.name.as_str(), "custom");
}

#[test]
fn overrides_follow_binding_chain() {
    let container = Container::new(types());
    container.bind("LoggerInterface", "FileLogger");

    let logger = container
        .make_as::<FileLogger>("LoggerInterface", &Parameters::new().with("path", "/tmp/a".to_string()))
        .unwrap();

    assert_eq!(logger.path.as_str(), "/tmp/a");
}

#[test]
fn overrides_do_not_reach_nested_dependencies() {
    let types = TypeRegistry::new()
        .class_with(
            "FileLogger",
            [Parameter::primitive("path").with_default("/var/log/app.log".to_string())],
            |args| Ok::<_, ArgumentError>(FileLogger { path: args.get(0)? }),
        )
        .class_with(
            "App",
            [
                Parameter::typed("logger", "FileLogger"),
                Parameter::primitive("path").with_default("/srv".to_string()),
            ],
            |args| Ok::<_, ArgumentError>((args.get::<FileLogger>(0)?, args.get::<String>(1)?)),
        );
    let container = Container::new(types);

    let app = container
        .make_as::<(Arc<FileLogger>, Arc<String>)>("App", &Parameters::new().with("path", "/tmp/b".to_string()))
        .unwrap();
    let (logger, path) = &*app;

    assert_eq!(path.as_str(), "/tmp/b");
    assert_eq!(logger.path.as_str(), "/var/log/app.log");
}

#[test]
fn unresolvable_class_dependency_falls_back_to_default() {
    let container = Container::new(types());

    let mailer = container.make_as::<Mailer>("Mailer", &Parameters::new()).unwrap();

    assert_eq!(
        mailer.transport.downcast::<String>().unwrap().as_str(),
        "null"
    );
}

#[test]
fn unresolvable_class_dependency_without_default_propagates_unchanged() {
    let types = TypeRegistry::new().class_with(
        "Consumer",
        [Parameter::typed("queue", "Queue")],
        |args| args.instance(0).cloned(),
    );
    let container = Container::new(types);

    let error = container.make("Consumer").unwrap_err();

    assert!(matches!(&error, ContainerError::NotFound { id } if id == "Queue"));
}

#[test]
fn nested_unresolvable_primitive_reaches_top_level_caller() {
    let types = TypeRegistry::new()
        .class_with("Database", [Parameter::primitive("dsn")], |args| {
            args.get::<String>(0)
        })
        .class_with(
            "Repository",
            [Parameter::typed("db", "Database")],
            |args| args.get::<String>(0),
        );
    let container = Container::new(types);

    let error = container.get("Repository").unwrap_err();

    assert_eq!(
        error.to_string(),
        "Unresolvable dependency resolving '$dsn' in class 'Database'"
    );
}

#[test]
fn factory_errors_never_fall_back_to_default() {
    let types = TypeRegistry::new().class_with(
        "Mailer",
        [Parameter::typed("transport", "Transport").with_default("null".to_string())],
        |args| args.instance(0).cloned(),
    );
    let container = Container::new(types);
    container.bind_factory("Transport", |_, _| {
        Err(ContainerError::factory("Transport", "smtp unreachable"))
    });

    let error = container.make("Mailer").unwrap_err();

    assert!(matches!(error, ContainerError::Factory { abstract_id, .. } if abstract_id == "Transport"));
}

#[test]
fn factories_can_resolve_through_the_container() {
    let container = Container::new(types());
    container.share_self("Logger");
    container.share_factory("Service", |c, _| {
        let logger = c.make("Logger")?;
        Ok(Instance::new(Service {
            logger: logger.downcast().map_err(|_| ContainerError::factory("Service", "bad logger"))?,
            name: Arc::new("from factory".to_string()),
        }))
    });

    let service = container.get_as::<Service>("Service").unwrap();
    let logger = container.get_as::<Logger>("Logger").unwrap();

    assert_eq!(service.name.as_str(), "from factory");
    assert!(Arc::ptr_eq(&service.logger, &logger));
}

#[test]
fn get_classifies_failures() {
    let container = Container::new(types());

    assert!(container.get("Nonexistent").unwrap_err().is_not_found());
    assert!(matches!(
        container.get("LoggerInterface"),
        Err(ContainerError::NotInstantiable { class }) if class == "LoggerInterface"
    ));
    assert!(matches!(
        container.get("BaseLogger"),
        Err(ContainerError::NotInstantiable { .. })
    ));
    assert!(container.get("").unwrap_err().is_not_found());
}

#[test]
fn get_as_reports_downcast_failure() {
    let container = Container::new(types());

    assert!(matches!(
        container.get_as::<String>("Logger"),
        Err(ContainerError::Downcast { .. })
    ));
}

#[test]
fn has_fails_closed() {
    let container = Container::new(types());
    container.bind("Cache", "RedisCache");

    assert!(!container.has("NonexistentClassName"));
    assert!(!container.has(""));
    assert!(!container.has("LoggerInterface"));
    assert!(container.has("Logger"));
    assert!(container.has("Cache"));
}

struct FailingIntrospector;

impl TypeIntrospector for FailingIntrospector {
    fn reflect(&self, name: &str) -> Result<ClassInfo, IntrospectionError> {
        Err(IntrospectionError::NoConstructor(name.to_string()))
    }
}

#[test]
fn introspection_errors_are_contained() {
    let container = Container::new(FailingIntrospector);

    assert!(!container.has("Anything"));
    assert!(matches!(
        container.make("Anything"),
        Err(ContainerError::NotInstantiable { .. })
    ));
}

#[test]
fn container_is_shared_between_threads() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = built.clone();
    let types = TypeRegistry::new().class("Pool", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Logger
    });
    let container = Container::new(types);
    container.share_self("Pool");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            std::thread::spawn(move || container.make("Pool"))
        })
        .collect();
    let instances: Vec<Instance> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    // Racing builders may construct more than once, but every caller sees the first cached value
    let cached = container.make("Pool").unwrap();
    assert!(instances.iter().all(|i| Instance::ptr_eq(i, &cached)));
    assert!(built.load(Ordering::SeqCst) >= 1);
}

#[test]
fn constructor_errors_keep_the_source() {
    let types = TypeRegistry::new().class_with("Socket", [], |_| {
        Err::<Logger, DynError>("address in use".into())
    });
    let container = Container::new(types);

    let error = container.make("Socket").unwrap_err();

    assert_eq!(
        error.to_string(),
        "Constructor of 'Socket' failed - error: address in use"
    );
}
