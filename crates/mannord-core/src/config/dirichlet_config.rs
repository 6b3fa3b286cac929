use serde::{Deserialize, Serialize};

use super::defaults;
use super::thresholds::ClassificationThresholds;

/// Dirichlet-posterior engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirichletConfig {
    /// Scatter/gather rounds per batch run.
    pub k_max: usize,
    /// Upper-tail mass used for the Beta percentile statistic.
    pub percentile: f64,
    /// Integration grid step on (0, 1).
    pub grid_step: f64,
    /// Largest pseudo-count accepted before the run is aborted.
    pub evidence_bound: f64,
    /// Fixed vote a KarmaUser casts on each item of its author.
    pub karma_user_vote: f64,
    /// Base evidence nudge for a vote on a frozen item.
    pub base_increment: f64,
    pub thresholds: ClassificationThresholds,
}

impl Default for DirichletConfig {
    fn default() -> Self {
        Self {
            k_max: defaults::DEFAULT_DIRICHLET_K_MAX,
            percentile: defaults::DEFAULT_PERCENTILE,
            grid_step: defaults::DEFAULT_GRID_STEP,
            evidence_bound: defaults::DEFAULT_EVIDENCE_BOUND,
            karma_user_vote: defaults::DEFAULT_DIRICHLET_KARMA_USER_VOTE,
            base_increment: defaults::DEFAULT_DIRICHLET_BASE_INCREMENT,
            thresholds: ClassificationThresholds {
                spam: defaults::DEFAULT_DIRICHLET_SPAM,
                ham: defaults::DEFAULT_DIRICHLET_HAM,
                definitely_spam: defaults::DEFAULT_DIRICHLET_DEFINITELY_SPAM,
                definitely_ham: defaults::DEFAULT_DIRICHLET_DEFINITELY_HAM,
            },
        }
    }
}
