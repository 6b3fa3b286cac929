use mannord_core::config::{Algorithm, ClassificationThresholds, MannordConfig};
use mannord_core::models::{Classification, ItemRecord};

/// Maps a final weight to a verdict and decides when an item freezes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationPolicy {
    thresholds: ClassificationThresholds,
}

impl ClassificationPolicy {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds of the configured algorithm.
    pub fn from_config(config: &MannordConfig) -> Self {
        match config.algorithm {
            Algorithm::Karger => Self::new(config.karger.thresholds),
            Algorithm::Dirichlet => Self::new(config.dirichlet.thresholds),
        }
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    pub fn classify(&self, weight: f64) -> Classification {
        Classification::from_weight(weight, &self.thresholds)
    }

    /// Outside the `definitely_*` band.
    pub fn should_freeze(&self, weight: f64) -> bool {
        weight < self.thresholds.definitely_spam || weight > self.thresholds.definitely_ham
    }

    /// Re-derive the item's classification from its current weight.
    pub fn reclassify(&self, item: &mut ItemRecord) {
        item.classification = self.classify(item.weight);
    }
}
