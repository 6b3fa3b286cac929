use mannord_core::config::DirichletConfig;
use mannord_core::errors::MannordResult;
use mannord_core::models::{EvidencePair, ItemRecord, UserRecord, VoteContribution};
use mannord_propagation::numeric::sign;
use mannord_propagation::{split_by_sign, BetaPercentile};

/// Dirichlet rule: item evidence gains `sign(a) · rel` on the matching side,
/// caster evidence gains `split_by_sign(sign(a) · c_n, sign(a) · c_p)` of the
/// item's evidence before the vote.
#[derive(Debug, Clone)]
pub struct DirichletIncremental {
    statistic: BetaPercentile,
    base_increment: f64,
}

impl DirichletIncremental {
    pub fn from_config(config: &DirichletConfig) -> Self {
        Self {
            statistic: BetaPercentile::from_config(config),
            base_increment: config.base_increment,
        }
    }

    pub fn base_increment(&self) -> f64 {
        self.base_increment
    }

    fn refresh_item(&self, item: &mut ItemRecord) -> MannordResult<()> {
        item.weight = self.statistic.item_weight(item.evidence)?;
        Ok(())
    }

    fn refresh_user(&self, user: &mut UserRecord) -> MannordResult<()> {
        user.reliability = self.statistic.reliability(user.evidence)?;
        Ok(())
    }

    pub(super) fn apply(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
    ) -> MannordResult<VoteContribution> {
        let s = sign(answer);
        let before = item.evidence;
        let item_delta = EvidencePair::from_signed(s * caster.reliability);
        let user_delta = split_by_sign(s * before.negative, s * before.positive)?;

        item.evidence += item_delta;
        caster.evidence += user_delta;
        self.refresh_item(item)?;
        self.refresh_user(caster)?;
        Ok(VoteContribution::Evidence {
            item_delta,
            user_delta,
        })
    }

    pub(super) fn subtract(
        &self,
        item_delta: EvidencePair,
        user_delta: EvidencePair,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
    ) -> MannordResult<()> {
        item.evidence -= item_delta;
        caster.evidence -= user_delta;
        self.refresh_item(item)?;
        self.refresh_user(caster)
    }

    /// Algebraic inverse for votes absorbed by a batch run. The reliability
    /// used may have drifted since, so each side is clamped back onto its half-line.
    pub(super) fn inverse(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
    ) -> MannordResult<()> {
        let s = sign(answer);
        item.evidence = (item.evidence - EvidencePair::from_signed(s * caster.reliability)).clamped();
        let after = item.evidence;
        let user_delta = split_by_sign(s * after.negative, s * after.positive)?;
        caster.evidence = (caster.evidence - user_delta).clamped();
        self.refresh_item(item)?;
        self.refresh_user(caster)
    }

    /// Add (or with `revert`, remove) `delta` on its own side of the caster's prior and evidence.
    pub(super) fn shift_base(&self, user: &mut UserRecord, delta: f64, revert: bool) -> MannordResult<()> {
        let shift = EvidencePair::from_signed(delta);
        if revert {
            user.base_evidence = (user.base_evidence - shift).clamped();
            user.evidence = (user.evidence - shift).clamped();
        } else {
            user.base_evidence += shift;
            user.evidence += shift;
        }
        self.refresh_user(user)
    }

    pub(super) fn shift_karma(&self, author: &mut UserRecord, delta: f64, revert: bool) -> MannordResult<()> {
        let shift = EvidencePair::from_signed(delta);
        let karma = &mut author.karma;
        if revert {
            karma.base_evidence = (karma.base_evidence - shift).clamped();
            karma.evidence = (karma.evidence - shift).clamped();
        } else {
            karma.base_evidence += shift;
            karma.evidence += shift;
        }
        karma.reliability = self.statistic.reliability(karma.evidence)?;
        Ok(())
    }

    pub(super) fn seed_item(&self, item: &mut ItemRecord, author: &UserRecord) -> MannordResult<()> {
        item.evidence = author.karma.evidence;
        self.refresh_item(item)
    }
}
