use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures raised by a persistence backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Snapshot checksum mismatch")]
    ChecksumMismatch,
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound { entity, id: id.to_string() }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Io(_) => true,
            StoreError::NotFound { .. } => false,
            StoreError::Constraint(_) => false,
            StoreError::ChecksumMismatch => false,
            StoreError::VersionMismatch { .. } => false,
            StoreError::Json(_) => false,
        }
    }
}

/// Coarse classification handed to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    DomainRule,
    DependencyFailure,
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Rule violation: {0}")]
    DomainRule(String),

    #[error("Persistence failure: {0}")]
    Dependency(StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LeagueError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        LeagueError::NotFound { entity, id: id.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::InvalidInput(_) | LeagueError::Config(_) => ErrorKind::InvalidInput,
            LeagueError::NotFound { .. } => ErrorKind::NotFound,
            LeagueError::DomainRule(_) => ErrorKind::DomainRule,
            LeagueError::Dependency(_) => ErrorKind::DependencyFailure,
        }
    }
}

impl From<StoreError> for LeagueError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => LeagueError::NotFound { entity, id },
            other => LeagueError::Dependency(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
