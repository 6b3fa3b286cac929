//! O(1) single-vote updates against committed state.
//!
//! Applying a vote returns the exact [`VoteContribution`] it made so that
//! removing the vote can subtract it again. Votes whose effect was absorbed
//! by a batch run carry no contribution and are removed with the algebraic
//! inverse of the add rule instead.

mod dirichlet;
mod karger;

pub use dirichlet::DirichletIncremental;
pub use karger::KargerIncremental;

use mannord_core::config::{Algorithm, MannordConfig};
use mannord_core::errors::MannordResult;
use mannord_core::models::{ItemRecord, ReliabilityTrail, UserRecord, VoteContribution};
use mannord_propagation::numeric::sign;

/// Per-algorithm incremental rules, selected by configuration.
#[derive(Debug, Clone)]
pub enum IncrementalController {
    Karger(KargerIncremental),
    Dirichlet(DirichletIncremental),
}

impl IncrementalController {
    pub fn from_config(config: &MannordConfig) -> Self {
        match config.algorithm {
            Algorithm::Karger => Self::Karger(KargerIncremental::from_config(&config.karger)),
            Algorithm::Dirichlet => {
                Self::Dirichlet(DirichletIncremental::from_config(&config.dirichlet))
            }
        }
    }

    pub fn base_increment(&self) -> f64 {
        match self {
            Self::Karger(k) => k.base_increment(),
            Self::Dirichlet(d) => d.base_increment(),
        }
    }

    /// Apply `answer` from `caster` to `item`.
    ///
    /// Frozen items keep their weight; the caster's prior moves instead and
    /// the returned contribution carries the author karma nudge still to apply.
    pub fn apply(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> MannordResult<VoteContribution> {
        if item.frozen {
            let verdict = item.classification.verdict();
            let base_delta = sign(answer) * verdict * self.base_increment();
            let karma_delta = verdict * self.base_increment();
            let trail = self.nudge_base_traced(caster, base_delta, normalization)?;
            return Ok(VoteContribution::FrozenNudge {
                base_delta,
                karma_delta,
                trail,
            });
        }
        match self {
            Self::Karger(k) => Ok(k.apply(answer, item, caster, normalization)),
            Self::Dirichlet(d) => d.apply(answer, item, caster),
        }
    }

    /// Undo a vote. Returns the author karma delta that must be reverted, if any.
    ///
    /// When the caster's reliability is still the one the vote left behind,
    /// the reliability held before the vote is restored instead of re-derived.
    pub fn undo(
        &self,
        answer: f64,
        contribution: Option<VoteContribution>,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> MannordResult<Option<f64>> {
        let trail = contribution
            .and_then(|c| c.trail())
            .filter(|t| t.is_current(caster.reliability));
        let karma = self.remove_contribution(answer, contribution, item, caster, normalization)?;
        if let Some(trail) = trail {
            caster.reliability = trail.before;
        }
        Ok(karma)
    }

    fn remove_contribution(
        &self,
        answer: f64,
        contribution: Option<VoteContribution>,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> MannordResult<Option<f64>> {
        match (contribution, self) {
            (Some(VoteContribution::FrozenNudge { base_delta, karma_delta, .. }), _) => {
                self.revert_base(caster, base_delta, normalization)?;
                Ok(Some(karma_delta))
            }
            (Some(VoteContribution::Scalar { weight_delta, raw_delta, .. }), Self::Karger(k)) => {
                k.subtract(weight_delta, raw_delta, item, caster, normalization);
                Ok(None)
            }
            (Some(VoteContribution::Evidence { item_delta, user_delta }), Self::Dirichlet(d)) => {
                d.subtract(item_delta, user_delta, item, caster)?;
                Ok(None)
            }
            (Some(other), _) => {
                tracing::warn!(?other, "contribution recorded by another algorithm, using inverse rule");
                self.inverse(answer, item, caster, normalization)
            }
            (None, _) => self.inverse(answer, item, caster, normalization),
        }
    }

    fn inverse(
        &self,
        answer: f64,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> MannordResult<Option<f64>> {
        if item.frozen {
            let verdict = item.classification.verdict();
            let base_delta = sign(answer) * verdict * self.base_increment();
            self.revert_base(caster, base_delta, normalization)?;
            return Ok(Some(verdict * self.base_increment()));
        }
        match self {
            Self::Karger(k) => k.inverse(answer, item, caster, normalization),
            Self::Dirichlet(d) => d.inverse(answer, item, caster)?,
        }
        Ok(None)
    }

    /// Move the caster's prior and its accumulator together, then re-derive reliability.
    pub fn nudge_base(&self, user: &mut UserRecord, delta: f64, normalization: f64) -> MannordResult<()> {
        match self {
            Self::Karger(k) => {
                k.shift_base(user, delta, normalization);
                Ok(())
            }
            Self::Dirichlet(d) => d.shift_base(user, delta, false),
        }
    }

    /// [`IncrementalController::nudge_base`], recording the reliability it replaced.
    pub fn nudge_base_traced(
        &self,
        user: &mut UserRecord,
        delta: f64,
        normalization: f64,
    ) -> MannordResult<ReliabilityTrail> {
        let before = user.reliability;
        self.nudge_base(user, delta, normalization)?;
        Ok(ReliabilityTrail {
            before,
            after: user.reliability,
        })
    }

    /// Exact inverse of [`IncrementalController::nudge_base`] with the same `delta`.
    pub fn revert_base(&self, user: &mut UserRecord, delta: f64, normalization: f64) -> MannordResult<()> {
        match self {
            Self::Karger(k) => {
                k.shift_base(user, -delta, normalization);
                Ok(())
            }
            Self::Dirichlet(d) => d.shift_base(user, delta, true),
        }
    }

    /// Move the author's KarmaUser prior.
    pub fn nudge_karma(&self, author: &mut UserRecord, delta: f64) -> MannordResult<()> {
        match self {
            Self::Karger(_) => {
                author.karma.base_reliability += delta;
                Ok(())
            }
            Self::Dirichlet(d) => d.shift_karma(author, delta, false),
        }
    }

    /// Exact inverse of [`IncrementalController::nudge_karma`] with the same `delta`.
    pub fn revert_karma(&self, author: &mut UserRecord, delta: f64) -> MannordResult<()> {
        match self {
            Self::Karger(_) => {
                author.karma.base_reliability -= delta;
                Ok(())
            }
            Self::Dirichlet(d) => d.shift_karma(author, delta, true),
        }
    }

    /// Seed a new item's score from its author's KarmaUser.
    pub fn seed_item(&self, item: &mut ItemRecord, author: &UserRecord) -> MannordResult<()> {
        match self {
            Self::Karger(k) => {
                k.seed_item(item, author);
                Ok(())
            }
            Self::Dirichlet(d) => d.seed_item(item, author),
        }
    }
}
