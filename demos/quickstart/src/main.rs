use std::{error::Error, sync::Arc};

use tracing_subscriber::EnvFilter;
use wirebox_config::ConfigProvider;
use wirebox_di::{ArgumentError, Container, Parameter, Parameters, TypeRegistry};

trait Greeter: Send + Sync {
    fn greet(&self, who: &str) -> String;
}

#[derive(Debug)]
struct ConsoleGreeter {
    prefix: Arc<String>,
}
impl Greeter for ConsoleGreeter {
    fn greet(&self, who: &str) -> String {
        format!("{} {who}", self.prefix)
    }
}

#[derive(Debug)]
struct AppConfig {
    name: String,
}

struct App {
    greeter: Arc<Arc<dyn Greeter>>,
    config: Arc<AppConfig>,
    audience: Arc<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let types = TypeRegistry::new()
        .interface("Greeter")
        .class_with(
            "ConsoleGreeter",
            [Parameter::primitive("prefix").with_default("Hello,".to_string())],
            |args| {
                let greeter: Arc<dyn Greeter> = Arc::new(ConsoleGreeter {
                    prefix: args.get(0)?,
                });
                Ok::<_, ArgumentError>(greeter)
            },
        )
        .class_with(
            "App",
            [
                Parameter::typed("greeter", "Greeter"),
                Parameter::typed("config", "config.app"),
                Parameter::primitive("audience").with_default("world".to_string()),
            ],
            |args| {
                Ok::<_, ArgumentError>(App {
                    greeter: args.get(0)?,
                    config: args.get(1)?,
                    audience: args.get(2)?,
                })
            },
        );

    let container = Container::new(types);
    container.share("Greeter", "ConsoleGreeter");

    let mut configs = ConfigProvider::initialize();
    configs.add_config("config.app", AppConfig { name: "quickstart".into() })?;
    configs.install(&container);

    let app = container.get_as::<App>("App")?;
    tracing::info!("[{}] {}", app.config.name, app.greeter.greet(&app.audience));

    let custom = container.make_as::<App>("App", &Parameters::new().with("audience", "wirebox".to_string()))?;
    tracing::info!("[{}] {}", custom.config.name, custom.greeter.greet(&custom.audience));

    tracing::info!("Same greeter: {}", Arc::ptr_eq(&app.greeter, &custom.greeter));
    tracing::info!("{container:?}");

    Ok(())
}
