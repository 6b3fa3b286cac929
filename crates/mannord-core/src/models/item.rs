use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Classification, EvidencePair, ItemId, UserId, VoteKind};

/// Persisted state of a moderated item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub author: UserId,
    /// Item this one responds to, if any.
    pub parent: Option<ItemId>,
    /// Set when the item stands for its author's vote on `parent`.
    #[serde(default)]
    pub action: Option<VoteKind>,
    /// Signed aggregate score; negative leans spam.
    pub weight: f64,
    /// Aggregate `(c_n, c_p)` evidence, Dirichlet engine only.
    pub evidence: EvidencePair,
    /// Irreversible once set.
    pub frozen: bool,
    pub classification: Classification,
    pub spam_flag_count: u32,
    pub created_at: DateTime<Utc>,
}

impl ItemRecord {
    pub fn new(id: ItemId, author: UserId, parent: Option<ItemId>) -> Self {
        Self {
            id,
            author,
            parent,
            action: None,
            weight: 0.0,
            evidence: EvidencePair::ZERO,
            frozen: false,
            classification: Classification::Ambiguous,
            spam_flag_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_spam(&self) -> bool {
        self.classification == Classification::Spam
    }

    pub fn is_ham(&self) -> bool {
        self.classification == Classification::Ham
    }
}
