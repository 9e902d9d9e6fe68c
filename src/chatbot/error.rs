//! Chatbot error types.

use crate::store::StoreError;

/// Errors surfaced at the chatbot request boundary.
#[derive(thiserror::Error, Debug)]
pub enum ChatbotError {
    /// The caller sent no usable message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The training table could not be loaded.
    #[error("Training table unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}
