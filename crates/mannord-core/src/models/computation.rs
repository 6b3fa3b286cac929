use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_NORMALIZATION;

/// Persisted result of the last batch run for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationRecord {
    pub name: String,
    /// Normalization coefficient used by incremental updates.
    pub normalization: f64,
    /// Completed batch runs.
    pub runs: u64,
}

impl ComputationRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            normalization: NEUTRAL_NORMALIZATION,
            runs: 0,
        }
    }
}
