use profile_vault::VaultError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't load configuration: {0}")]
    ConfigError(String),

    #[error("Couldn't open the vault at {0}: {1}")]
    StorageOpenError(String, String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Provide either --id or a username and platform")]
    MissingRecordKey,

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    VaultError(#[from] VaultError),
}
