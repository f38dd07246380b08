use std::path::PathBuf;
use thiserror::Error;
use vallink_core::ValidationErrors;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid proposal: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("storage quota exceeded: {required} bytes needed, {quota} allowed")]
    QuotaExceeded { required: usize, quota: usize },
    #[error("stored collection is unreadable: {0}")]
    Corrupt(String),
    #[error("stored collection version {0} is not supported")]
    UnsupportedVersion(u32),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("migration error: {0}")]
    Migration(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    Serialize,
    Invalid,
    QuotaExceeded,
    Corrupt,
    UnsupportedVersion,
    MissingHomeDir,
    InvalidDataPath,
    Migration,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::Serialize(_) => StoreErrorKind::Serialize,
            StoreError::Invalid(_) => StoreErrorKind::Invalid,
            StoreError::QuotaExceeded { .. } => StoreErrorKind::QuotaExceeded,
            StoreError::Corrupt(_) => StoreErrorKind::Corrupt,
            StoreError::UnsupportedVersion(_) => StoreErrorKind::UnsupportedVersion,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::Migration(_) => StoreErrorKind::Migration,
        }
    }
}
