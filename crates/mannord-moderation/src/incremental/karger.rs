use mannord_core::config::KargerConfig;
use mannord_core::models::{ItemRecord, ReliabilityTrail, UserRecord, VoteContribution};
use mannord_propagation::Saturation;

/// Weighted-normalized rule: `weight += a · rel`, `raw += a · weight_before`,
/// `rel = squash(raw) / norm`.
#[derive(Debug, Clone)]
pub struct KargerIncremental {
    saturation: Saturation,
    base_increment: f64,
    karma_user_vote: f64,
}

impl KargerIncremental {
    pub fn from_config(config: &KargerConfig) -> Self {
        Self {
            saturation: Saturation::from_config(config),
            base_increment: config.base_increment,
            karma_user_vote: config.karma_user_vote,
        }
    }

    pub fn base_increment(&self) -> f64 {
        self.base_increment
    }

    fn refresh(&self, user: &mut UserRecord, normalization: f64) {
        user.reliability = self.saturation.apply(user.reliability_raw) / normalization;
    }

    pub(super) fn apply(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> VoteContribution {
        let before = caster.reliability;
        let weight_delta = answer * before;
        let raw_delta = answer * item.weight;
        item.weight += weight_delta;
        caster.reliability_raw += raw_delta;
        self.refresh(caster, normalization);
        VoteContribution::Scalar {
            weight_delta,
            raw_delta,
            trail: ReliabilityTrail {
                before,
                after: caster.reliability,
            },
        }
    }

    pub(super) fn subtract(
        &self,
        weight_delta: f64,
        raw_delta: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) {
        item.weight -= weight_delta;
        caster.reliability_raw -= raw_delta;
        self.refresh(caster, normalization);
    }

    pub(super) fn inverse(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) {
        item.weight -= answer * caster.reliability;
        caster.reliability_raw -= answer * item.weight;
        self.refresh(caster, normalization);
    }

    pub(super) fn shift_base(&self, user: &mut UserRecord, delta: f64, normalization: f64) {
        user.base_reliability += delta;
        user.reliability_raw += delta;
        self.refresh(user, normalization);
    }

    pub(super) fn seed_item(&self, item: &mut ItemRecord, author: &UserRecord) {
        item.weight = self
            .saturation
            .apply(author.karma.reliability * self.karma_user_vote);
    }
}
