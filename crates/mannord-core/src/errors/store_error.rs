//! Errors raised by the persistence collaborator.

use super::error_code::{self, MannordErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    #[error("vote not found: user {user_id} on item {item_id}")]
    VoteNotFound { user_id: String, item_id: String },

    #[error("write-back rejected: {reason}")]
    WriteBackRejected { reason: String },
}

impl MannordErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        error_code::STORE_ERROR
    }
}
