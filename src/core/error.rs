use thiserror::Error;

use crate::core::types::UserId;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("User already registered: {0}")]
    UserExists(UserId),

    #[error("Store lock was poisoned")]
    LockPoisoned,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CampusError>;
