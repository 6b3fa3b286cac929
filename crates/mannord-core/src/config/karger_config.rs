use serde::{Deserialize, Serialize};

use super::defaults;
use super::thresholds::ClassificationThresholds;

/// Weighted-normalized ("Karger-style") engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KargerConfig {
    /// Scatter/gather rounds per batch run.
    pub k_max: usize,
    /// Saturation asymptote: how many default votes the most reliable user is worth.
    pub asymptote: f64,
    /// Slope of the saturating function at the origin.
    pub gain: f64,
    /// Apply the saturating function to accumulated evidence.
    pub use_saturation: bool,
    /// Reliability assigned to users with fewer than two messages in a round.
    pub default_reliability: f64,
    /// Fixed vote a KarmaUser casts on each item of its author.
    pub karma_user_vote: f64,
    /// Base reliability nudge for a vote on a frozen item.
    pub base_increment: f64,
    pub thresholds: ClassificationThresholds,
}

impl Default for KargerConfig {
    fn default() -> Self {
        Self {
            k_max: defaults::DEFAULT_KARGER_K_MAX,
            asymptote: defaults::DEFAULT_ASYMPTOTE,
            gain: defaults::DEFAULT_GAIN,
            use_saturation: defaults::DEFAULT_USE_SATURATION,
            default_reliability: defaults::DEFAULT_RELIABILITY,
            karma_user_vote: defaults::DEFAULT_KARGER_KARMA_USER_VOTE,
            base_increment: defaults::DEFAULT_KARGER_BASE_INCREMENT,
            thresholds: ClassificationThresholds {
                spam: defaults::DEFAULT_KARGER_SPAM,
                ham: defaults::DEFAULT_KARGER_HAM,
                definitely_spam: defaults::DEFAULT_KARGER_DEFINITELY_SPAM,
                definitely_ham: defaults::DEFAULT_KARGER_DEFINITELY_HAM,
            },
        }
    }
}
