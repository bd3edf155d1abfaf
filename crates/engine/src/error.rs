//! The module contains the errors the engine can return.
//!
//! Business-rule failures carry the human readable message shown to API
//! clients, while [`Database`] wraps every persistence failure, including
//! constraint violations on required columns.
//!
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    KeyNotFound(String),
    #[error("{0}")]
    InvalidItem(String),
    #[error("You cannot change the wallet")]
    WalletChange,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidItem(a), Self::InvalidItem(b)) => a == b,
            (Self::WalletChange, Self::WalletChange) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
