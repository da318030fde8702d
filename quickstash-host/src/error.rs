use quickstash_core::ConfigError;
use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}

#[derive(Debug, Error)]
pub enum WorldErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(serde_yaml::Error),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment: {0}")]
    Env(#[source] ConfigErrorKind),

    #[error("invalid world in {path}: {source}")]
    World {
        path: std::path::PathBuf,
        #[source]
        source: WorldErrorKind,
    },

    #[error(transparent)]
    Validation(#[from] ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),
}
