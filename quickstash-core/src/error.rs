use crate::types::ContainerId;
use thiserror::Error;

/// Errors raised by a container that can no longer be used, typically because the world
/// destroyed it after it was handed to the engine.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Container was destroyed
    #[error("container {0} was destroyed")]
    Destroyed(ContainerId),

    /// Container exists but cannot answer right now
    #[error("container {id} unavailable: {reason}")]
    Unavailable { id: ContainerId, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {field}: {message}")]
    Validation { field: &'static str, message: String },
}
