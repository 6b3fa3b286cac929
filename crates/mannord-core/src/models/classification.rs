use serde::{Deserialize, Serialize};

use crate::config::ClassificationThresholds;

/// Moderation verdict derived from an item's weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Spam,
    Ham,
    /// Neither threshold crossed; the item needs human review.
    #[default]
    Ambiguous,
}

impl Classification {
    /// Pure threshold mapping from weight to verdict.
    pub fn from_weight(weight: f64, thresholds: &ClassificationThresholds) -> Self {
        if weight < thresholds.spam {
            Self::Spam
        } else if weight > thresholds.ham {
            Self::Ham
        } else {
            Self::Ambiguous
        }
    }

    /// Signed verdict: -1 for spam, +1 for ham, 0 otherwise.
    pub fn verdict(self) -> f64 {
        match self {
            Self::Spam => -1.0,
            Self::Ham => 1.0,
            Self::Ambiguous => 0.0,
        }
    }

    pub fn needs_review(self) -> bool {
        self == Self::Ambiguous
    }
}
