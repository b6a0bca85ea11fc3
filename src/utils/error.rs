use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value '{value}' for {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    InvalidOption(#[from] ValidationError),

    #[error("unknown source: {0}")]
    UnknownSource(String),

    #[error("source {name} failed: {message}")]
    Source { name: String, message: String },

    #[error("context canceled")]
    Cancelled,

    #[error("{0}")]
    Message(String),
}

impl EngineError {
    pub fn source_failure(name: &str, message: impl Into<String>) -> Self {
        EngineError::Source {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("failed to create enumeration runner: {0}")]
    InitFailure(String),

    #[error("failed to enumerate single domain: {0}")]
    EnumerationFailure(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
