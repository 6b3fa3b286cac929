//! [`ReputationSystem`]: the moderation facade over a store and a configuration.
//!
//! Every vote event is applied incrementally and classified right away;
//! [`ReputationSystem::run_offline`] recomputes everything that is not frozen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use mannord_core::config::MannordConfig;
use mannord_core::errors::{MannordResult, ModerationError, StoreError};
use mannord_core::incremental_span;
use mannord_core::models::{
    ItemId, ItemRecord, UserId, UserRecord, VoteContribution, VoteKind, VoteRecord,
};
use mannord_core::traits::IReputationStore;
use mannord_propagation::numeric::sign;

use crate::batch::{BatchReport, BatchRunner};
use crate::classification::ClassificationPolicy;
use crate::incremental::IncrementalController;

/// What a vote event did to stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    /// First vote of this user on this item.
    Applied,
    /// The same vote already existed.
    Unchanged,
    /// A different vote by the same user was undone first.
    Replaced,
    /// Recorded, but carries no spam signal.
    Ignored,
}

/// Karma nudges owed to an item's author by one vote event.
#[derive(Debug, Default)]
struct KarmaDebt {
    revert: Option<f64>,
    nudge: Option<f64>,
}

impl KarmaDebt {
    fn is_empty(&self) -> bool {
        self.revert.is_none() && self.nudge.is_none()
    }

    fn settle(&self, controller: &IncrementalController, author: &mut UserRecord) -> MannordResult<()> {
        if let Some(delta) = self.revert {
            controller.revert_karma(author, delta)?;
        }
        if let Some(delta) = self.nudge {
            controller.nudge_karma(author, delta)?;
        }
        Ok(())
    }
}

pub struct ReputationSystem<S: IReputationStore> {
    store: S,
    config: MannordConfig,
    policy: ClassificationPolicy,
    controller: IncrementalController,
    runner: BatchRunner,
}

impl<S: IReputationStore> ReputationSystem<S> {
    pub fn new(store: S, config: MannordConfig) -> MannordResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            policy: ClassificationPolicy::from_config(&config),
            controller: IncrementalController::from_config(&config),
            runner: BatchRunner::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &MannordConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn item(&self, id: &ItemId) -> MannordResult<Option<ItemRecord>> {
        self.store.get_item(id)
    }

    pub fn user(&self, id: &UserId) -> MannordResult<Option<UserRecord>> {
        self.store.get_user(id)
    }

    fn require_item(&self, id: &ItemId) -> MannordResult<ItemRecord> {
        self.store
            .get_item(id)?
            .ok_or_else(|| StoreError::ItemNotFound { id: id.to_string() }.into())
    }

    fn user_or_new(&self, id: &UserId) -> MannordResult<UserRecord> {
        Ok(self
            .store
            .get_user(id)?
            .unwrap_or_else(|| UserRecord::new(id.clone())))
    }

    fn normalization(&self) -> MannordResult<f64> {
        Ok(self
            .store
            .computation(self.config.algorithm.computation_name())?
            .normalization)
    }

    /// Register a new item. Its initial score comes from the author's KarmaUser.
    ///
    /// With `action` set the item stands for its author's vote on `parent`,
    /// which is cast before the item is stored.
    pub fn add_item(
        &mut self,
        id: ItemId,
        author: UserId,
        parent: Option<ItemId>,
        action: Option<VoteKind>,
    ) -> MannordResult<ItemRecord> {
        if self.store.get_item(&id)?.is_some() {
            return Err(ModerationError::DuplicateItem { id: id.to_string() }.into());
        }
        if let Some(parent) = &parent {
            if *parent == id {
                return Err(ModerationError::SelfVote { item_id: id.to_string() }.into());
            }
            self.require_item(parent)?;
        }
        if let Some(kind) = action {
            let Some(parent) = &parent else {
                return Err(ModerationError::ActionWithoutParent { item_id: id.to_string() }.into());
            };
            self.cast_vote(parent, &author, kind)?;
        }

        let author_record = self.user_or_new(&author)?;
        let mut item = ItemRecord::new(id, author, parent);
        item.action = action;
        self.controller.seed_item(&mut item, &author_record)?;
        self.policy.reclassify(&mut item);

        self.store.upsert_user(author_record)?;
        self.store.upsert_item(item.clone())?;
        info!(item = %item.id, author = %item.author, weight = item.weight, action = ?item.action, "item added");
        Ok(item)
    }

    pub fn flag_spam(&mut self, item: &ItemId, user: &UserId) -> MannordResult<VoteOutcome> {
        self.cast_vote(item, user, VoteKind::FlagSpam)
    }

    pub fn flag_ham(&mut self, item: &ItemId, user: &UserId) -> MannordResult<VoteOutcome> {
        self.cast_vote(item, user, VoteKind::FlagHam)
    }

    pub fn upvote(&mut self, item: &ItemId, user: &UserId) -> MannordResult<VoteOutcome> {
        self.cast_vote(item, user, VoteKind::Upvote)
    }

    pub fn downvote(&mut self, item: &ItemId, user: &UserId) -> MannordResult<VoteOutcome> {
        self.cast_vote(item, user, VoteKind::Downvote)
    }

    /// Record `kind` from `user` on `item` and update scores in O(1).
    ///
    /// A user holds at most one vote per item; a different earlier vote is
    /// undone exactly before the new one is applied.
    pub fn cast_vote(
        &mut self,
        item_id: &ItemId,
        user_id: &UserId,
        kind: VoteKind,
    ) -> MannordResult<VoteOutcome> {
        let span = incremental_span!(item_id, user_id);
        let _guard = span.enter();

        let mut item = self.require_item(item_id)?;
        let previous = self.store.get_vote(user_id, item_id)?;
        if previous.as_ref().is_some_and(|v| v.kind == kind) {
            return Ok(VoteOutcome::Unchanged);
        }

        let normalization = self.normalization()?;
        let mut caster = self.user_or_new(user_id)?;
        let mut debt = KarmaDebt::default();
        if let Some(previous) = &previous {
            debt.revert = self.undo_vote(previous, &mut item, &mut caster, normalization)?;
        }

        let mut vote = VoteRecord::new(user_id.clone(), item_id.clone(), kind);
        let outcome = match kind.signal() {
            None => VoteOutcome::Ignored,
            Some(answer) => {
                let contribution = self.controller.apply(answer, &mut item, &mut caster, normalization)?;
                if let VoteContribution::FrozenNudge { karma_delta, .. } = contribution {
                    debt.nudge = Some(karma_delta);
                }
                vote.contribution = Some(contribution);
                vote.frozen = item.frozen;
                if kind == VoteKind::FlagSpam {
                    item.spam_flag_count += 1;
                }
                if previous.is_some() {
                    VoteOutcome::Replaced
                } else {
                    VoteOutcome::Applied
                }
            }
        };
        if !item.frozen {
            self.policy.reclassify(&mut item);
        }

        self.commit(item, caster, &debt)?;
        self.store.upsert_vote(vote)?;
        debug!(?outcome, %kind, "vote cast");
        Ok(outcome)
    }

    /// Undo and delete the vote of `user` on `item`.
    pub fn remove_vote(&mut self, item_id: &ItemId, user_id: &UserId) -> MannordResult<()> {
        let span = incremental_span!(item_id, user_id);
        let _guard = span.enter();

        let vote = self
            .store
            .get_vote(user_id, item_id)?
            .ok_or_else(|| StoreError::VoteNotFound {
                user_id: user_id.to_string(),
                item_id: item_id.to_string(),
            })?;
        let mut item = self.require_item(item_id)?;
        let mut caster = self.user_or_new(user_id)?;
        let normalization = self.normalization()?;

        let debt = KarmaDebt {
            revert: self.undo_vote(&vote, &mut item, &mut caster, normalization)?,
            nudge: None,
        };
        if !item.frozen {
            self.policy.reclassify(&mut item);
        }
        self.commit(item, caster, &debt)?;
        self.store.delete_vote(user_id, item_id)?;
        debug!(kind = %vote.kind, "vote removed");
        Ok(())
    }

    /// Remove `vote`'s effect from `item` and `caster`. Returns the karma
    /// delta the item's author must give back, if any.
    fn undo_vote(
        &self,
        vote: &VoteRecord,
        item: &mut ItemRecord,
        caster: &mut UserRecord,
        normalization: f64,
    ) -> MannordResult<Option<f64>> {
        if vote.kind == VoteKind::FlagSpam {
            item.spam_flag_count = item.spam_flag_count.saturating_sub(1);
        }
        match vote.kind.signal() {
            Some(answer) => self
                .controller
                .undo(answer, vote.contribution, item, caster, normalization),
            None => Ok(None),
        }
    }

    /// Settle the author's karma, then persist the item, caster and author.
    /// Every fallible update runs before the first write.
    fn commit(&mut self, item: ItemRecord, caster: UserRecord, debt: &KarmaDebt) -> MannordResult<()> {
        if debt.is_empty() {
            self.store.upsert_item(item)?;
            return self.store.upsert_user(caster);
        }
        if item.author == caster.id {
            let mut author = caster;
            debt.settle(&self.controller, &mut author)?;
            self.store.upsert_item(item)?;
            return self.store.upsert_user(author);
        }
        let mut author = self.user_or_new(&item.author)?;
        debt.settle(&self.controller, &mut author)?;
        self.store.upsert_item(item)?;
        self.store.upsert_user(caster)?;
        self.store.upsert_user(author)
    }

    /// Full recomputation over all non-frozen votes; see [`BatchRunner`].
    #[instrument(skip(self), fields(algorithm = %self.config.algorithm))]
    pub fn run_offline(&mut self) -> MannordResult<BatchReport> {
        self.runner.run(&mut self.store)
    }

    /// Delete an item at its author's request.
    ///
    /// Voters on a still-active item have their contribution removed, then
    /// spam flaggers gain and ham voters lose one base increment. On a frozen
    /// item the nudges were already applied at freeze time and stay. The
    /// author's karma is left alone in both cases. Deleting an action item
    /// also withdraws the vote it stands for.
    pub fn delete_item_by_author(&mut self, item_id: &ItemId) -> MannordResult<()> {
        self.withdraw_action(item_id)?;
        let mut item = self.require_item(item_id)?;
        let normalization = self.normalization()?;
        let increment = self.controller.base_increment();
        let mut voters: BTreeMap<UserId, UserRecord> = BTreeMap::new();

        if !item.frozen {
            for vote in self.store.votes_on_item(item_id)? {
                let Some(answer) = vote.kind.signal() else {
                    continue;
                };
                let mut caster = match voters.remove(&vote.user) {
                    Some(caster) => caster,
                    None => self.user_or_new(&vote.user)?,
                };
                self.controller
                    .undo(answer, vote.contribution, &mut item, &mut caster, normalization)?;
                self.controller
                    .nudge_base(&mut caster, -sign(answer) * increment, normalization)?;
                voters.insert(caster.id.clone(), caster);
            }
        }

        for (_, caster) in voters {
            self.store.upsert_user(caster)?;
        }
        self.store.delete_item(item_id)?;
        info!(item = %item_id, frozen = item.frozen, "item deleted by author");
        Ok(())
    }

    /// Remove the vote an action item stands for, if it is still in place.
    fn withdraw_action(&mut self, item_id: &ItemId) -> MannordResult<()> {
        let item = self.require_item(item_id)?;
        let (Some(kind), Some(parent)) = (item.action, &item.parent) else {
            return Ok(());
        };
        let cast = self.store.get_vote(&item.author, parent)?;
        if cast.is_some_and(|v| v.kind == kind) {
            self.remove_vote(parent, &item.author)?;
        }
        Ok(())
    }

    /// Up to `limit` ambiguous items, in id order.
    pub fn items_for_review(&self, limit: usize) -> MannordResult<Vec<ItemRecord>> {
        self.store.items_marked_for_review(limit)
    }
}
