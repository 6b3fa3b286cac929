//! Top-level error aggregating every subsystem error via `From` conversions.

use super::error_code::MannordErrorCode;
use super::{ConfigError, ModerationError, PropagationError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum MannordError {
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("moderation error: {0}")]
    Moderation(#[from] ModerationError),
}

impl MannordError {
    /// True for failures that must abort a batch run without write-back.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Propagation(_))
    }
}

impl MannordErrorCode for MannordError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Propagation(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Moderation(e) => e.error_code(),
        }
    }
}

pub type MannordResult<T> = Result<T, MannordError>;
