use std::io;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config file: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("paragraph pack {name} not found")]
    PackNotFound { name: String },

    #[error("paragraph pack {name} is unreadable: {reason}")]
    PackUnreadable { name: String, reason: String },

    #[error("paragraph pack {name} has no paragraphs")]
    EmptyPack { name: String },

    #[error("custom prompt must contain text")]
    EmptyPrompt,

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}
