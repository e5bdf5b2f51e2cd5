use std::str::Utf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Lookup failed: {0}")]
    Lookup(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid link: {0}")]
    Link(#[from] url::ParseError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Utf8Error> for VaultError {
    fn from(_: Utf8Error) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<toml::de::Error> for VaultError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<minijinja::Error> for VaultError {
    fn from(e: minijinja::Error) -> Self {
        Self::Render(e.to_string())
    }
}
