//! Propagation engine errors.
//!
//! Every variant is fatal to the current batch run. Degenerate normalization
//! and insufficient evidence are recovered inline and never surface here.

use super::error_code::{self, MannordErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropagationError {
    #[error("invariant violation: {details}")]
    InvariantViolation { details: String },

    #[error("evidence overflow: alpha {alpha}, beta {beta} exceed bound {bound}")]
    EvidenceOverflow { alpha: f64, beta: f64, bound: f64 },

    #[error("non-finite value {value} produced for {entity}")]
    NonFiniteValue { entity: String, value: f64 },
}

impl MannordErrorCode for PropagationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvariantViolation { .. } => error_code::INVARIANT_VIOLATION,
            Self::EvidenceOverflow { .. } => error_code::EVIDENCE_OVERFLOW,
            Self::NonFiniteValue { .. } => error_code::NON_FINITE_VALUE,
        }
    }
}
