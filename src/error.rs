use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum TreeError {
    #[error("Invalid name hint: {0}")]
    InvalidHint(String),
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),
    #[error("No unused name found after {attempts} attempts (prefix '{prefix}', base '{base}')")]
    NamespaceExhausted {
        prefix: String,
        base: String,
        attempts: u64,
    },
    #[error("Item already exists: {0}")]
    ItemExists(String),
    #[error("Invalid item name: {0}")]
    InvalidName(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("Entropy source error: {0}")]
    Entropy(String),
}

impl TreeError {
    /// True for the two failure kinds raised by hint classification, as opposed to errors coming
    /// out of the tree layer or the environment.
    pub fn is_hint_error(&self) -> bool {
        matches!(
            self,
            TreeError::InvalidHint(_) | TreeError::UnknownNamespace(_)
        )
    }
}

impl From<toml::de::Error> for TreeError {
    fn from(src: toml::de::Error) -> TreeError {
        TreeError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for TreeError {
    fn from(src: toml::ser::Error) -> TreeError {
        TreeError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<UrlParseError> for TreeError {
    fn from(src: UrlParseError) -> TreeError {
        TreeError::Serialization(format!("Invalid URL: {src}"))
    }
}

impl From<io::Error> for TreeError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => TreeError::NotFound(format!("{x}")),
            _ => TreeError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<getrandom::Error> for TreeError {
    fn from(x: getrandom::Error) -> Self {
        TreeError::Entropy(format!("{x}"))
    }
}
