use vocora_generator::GenerateError;

use crate::dictionary::StoreError;

/// Failures absorbed by the definition cache. None of these reach the
/// caller as an error; they travel alongside a placeholder definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Generation request failed: {0}")]
    NetworkFailure(String),

    #[error("Generation returned an unusable payload: {0}")]
    MalformedResponse(String),

    #[error("Could not cache definition: {0}")]
    StoreWriteFailure(String),
}

impl From<&GenerateError> for LookupError {
    fn from(e: &GenerateError) -> Self {
        match e {
            GenerateError::MalformedResponse(msg) => LookupError::MalformedResponse(msg.clone()),
            other => LookupError::NetworkFailure(other.to_string()),
        }
    }
}

/// Recoverable problems while editing a vocabulary list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabError {
    #[error("No signed-in user")]
    NoUser,

    #[error("Word is empty")]
    EmptyWord,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No active session")]
    NotLoaded,

    #[error("No signed-in user")]
    NoUser,

    #[error(transparent)]
    Store(#[from] StoreError),
}
