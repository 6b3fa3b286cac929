use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EvidencePair, ItemId, NodeKey};

/// Prior a user node enters the graph with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPrior {
    pub base_reliability: f64,
    pub base_evidence: EvidencePair,
}

impl UserPrior {
    pub fn scalar(base_reliability: f64) -> Self {
        Self {
            base_reliability,
            base_evidence: EvidencePair::ZERO,
        }
    }

    pub fn evidence(base_evidence: EvidencePair) -> Self {
        Self {
            base_reliability: 0.0,
            base_evidence,
        }
    }
}

/// Read-only view of a user node after propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub key: NodeKey,
    pub reliability: f64,
    pub reliability_raw: f64,
    pub evidence: EvidencePair,
}

/// Read-only view of an item node after propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub weight: f64,
    pub evidence: EvidencePair,
}

/// Result of a full propagation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropagationOutcome {
    pub item_weights: BTreeMap<ItemId, f64>,
    pub user_reliabilities: BTreeMap<NodeKey, f64>,
    pub normalization: f64,
    pub rounds: usize,
}
