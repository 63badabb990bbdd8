/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("environment variable {var} is not set")]
    MissingEnv { var: String },

    #[error("unknown {kind} provider: {name}")]
    UnknownProvider { kind: String, name: String },
}
