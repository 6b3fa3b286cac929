//! Stable, machine-readable error codes attached to every mannord error.

/// Implemented by every error enum so callers can log or branch on a stable code.
pub trait MannordErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const EVIDENCE_OVERFLOW: &str = "EVIDENCE_OVERFLOW";
pub const NON_FINITE_VALUE: &str = "NON_FINITE_VALUE";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MODERATION_ERROR: &str = "MODERATION_ERROR";
