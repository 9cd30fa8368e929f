/// Errors when trying to register or retrieve a config
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A config with this name is already registered
    #[error("The config '{0}' is already registered")]
    AlreadyRegistered(String),
    /// The config exists but holds another type
    #[error("The config '{name}' has type '{actual_type}', expected '{required_type}'")]
    TypeMismatch {
        name: String,
        required_type: &'static str,
        actual_type: &'static str,
    },
}
