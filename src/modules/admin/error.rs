use std::io;

use thiserror::Error;

/// Errors surfaced by the write path of the admin store.
///
/// Read paths never return these to callers; they log them and fall back
/// to an empty collection, `None`, or `false`.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to persist admins file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
