use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unrecognized theme value: {0:?}")]
    Unrecognized(String),
}

/// Failures of the browser-local preference storage.
///
/// None of these are fatal: the controller keeps working from memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Preference storage is unavailable")]
    Unavailable,
    #[error("Could not read preference: {0}")]
    Read(String),
    #[error("Could not write preference: {0}")]
    Write(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Could not update document root: {0}")]
    Dom(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Storage key must not be empty")]
    EmptyStorageKey,
    #[error("Invalid marker class name: {0:?}")]
    InvalidClassName(String),
    #[error("Invalid marker attribute name: {0:?}")]
    InvalidAttributeName(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;
