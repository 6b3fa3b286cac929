use serde::{Deserialize, Serialize};

use super::{EvidencePair, UserId};

/// Persisted reputation state of a user.
///
/// Scalar fields belong to the weighted-normalized engine, evidence pairs
/// to the Dirichlet engine. A store is driven by one algorithm at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Prior, moved only by votes on frozen items.
    pub base_reliability: f64,
    pub reliability: f64,
    /// Accumulator before saturation and normalization.
    pub reliability_raw: f64,
    pub base_evidence: EvidencePair,
    pub evidence: EvidencePair,
    /// State of this user's KarmaUser (author prior).
    pub karma: KarmaRecord,
}

/// Author-prior node state, keyed `-<user id>` in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KarmaRecord {
    pub base_reliability: f64,
    pub reliability: f64,
    pub base_evidence: EvidencePair,
    pub evidence: EvidencePair,
}

impl UserRecord {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            base_reliability: 0.0,
            reliability: 0.0,
            reliability_raw: 0.0,
            base_evidence: EvidencePair::ZERO,
            evidence: EvidencePair::ZERO,
            karma: KarmaRecord::default(),
        }
    }
}
