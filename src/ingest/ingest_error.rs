use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum IngestError {
    Config(String),
    Network(String),
    JsonParse(String),
    UnexpectedShape(String),
    Deserialize(String),
    Db(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Config(msg) => write!(f, "Config error: {msg}"),
            IngestError::Network(msg) => write!(f, "Network error: {msg}"),
            IngestError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            IngestError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            IngestError::Deserialize(msg) => write!(f, "Deserialize error: {msg}"),
            IngestError::Db(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl Error for IngestError {}
