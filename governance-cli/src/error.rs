//! Console error types

use governance_lib::error::PagingError;
use governance_lib::error::SessionError;
use governance_lib::error::SourceError;

/// Errors surfaced to the console user.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("no child selected")]
    NothingSelected,

    #[error("no edit in progress, use `edit` first")]
    NotEditing,

    #[error(transparent)]
    Paging(#[from] PagingError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
