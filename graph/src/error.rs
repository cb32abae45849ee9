use thiserror::Error;

/// Fatal conditions raised while turning commit records into a history graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Malformed commit record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Short id {short_id} is shared by commits {first} and {second}")]
    DuplicateShortId {
        short_id: String,
        first: String,
        second: String,
    },

    #[error("Branch head {short_id} has {refs} references but {parents} parents")]
    RefParentMismatch {
        short_id: String,
        refs: usize,
        parents: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
