//! Errors raised by the moderation layer (item lifecycle and vote handling).

use super::error_code::{self, MannordErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("item already exists: {id}")]
    DuplicateItem { id: String },

    #[error("item {item_id} cannot be the target of its own action")]
    SelfVote { item_id: String },

    #[error("action item {item_id} needs a parent to act on")]
    ActionWithoutParent { item_id: String },

    #[error("vote kind {kind} carries no spam signal")]
    NotASpamSignal { kind: String },
}

impl MannordErrorCode for ModerationError {
    fn error_code(&self) -> &'static str {
        error_code::MODERATION_ERROR
    }
}
