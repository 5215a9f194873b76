use crate::attr::AttributeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrKitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Attribute error: {0}")]
    Attribute(#[from] AttributeError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AttrKitError>;
