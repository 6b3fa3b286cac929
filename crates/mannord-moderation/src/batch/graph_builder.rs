//! Phase 1: load active state from the store and build the propagation graph.

use std::collections::BTreeMap;

use mannord_core::errors::MannordResult;
use mannord_core::models::{ItemId, ItemRecord, NodeKey, UserId, UserPrior, UserRecord, VoteRecord};
use mannord_core::traits::{IPropagationEngine, IReputationStore};
use tracing::debug;

use crate::karma;

/// Everything a batch run reads from the store, keyed for write-back.
#[derive(Debug, Default)]
pub struct BatchInput {
    pub items: BTreeMap<ItemId, ItemRecord>,
    pub users: BTreeMap<UserId, UserRecord>,
    /// Votes fed to the engine.
    pub counted: Vec<VoteRecord>,
    /// Active votes without a spam signal.
    pub ignored: Vec<VoteRecord>,
}

fn load_user(
    store: &dyn IReputationStore,
    users: &mut BTreeMap<UserId, UserRecord>,
    id: &UserId,
) -> MannordResult<()> {
    if !users.contains_key(id) {
        let user = store
            .get_user(id)?
            .unwrap_or_else(|| UserRecord::new(id.clone()));
        users.insert(id.clone(), user);
    }
    Ok(())
}

fn prior_of(user: &UserRecord) -> UserPrior {
    UserPrior {
        base_reliability: user.base_reliability,
        base_evidence: user.base_evidence,
    }
}

/// Read active items and votes, then register every counted vote and every
/// KarmaUser vote with `engine`.
pub fn build(
    store: &dyn IReputationStore,
    engine: &mut dyn IPropagationEngine,
    karma_vote: f64,
) -> MannordResult<BatchInput> {
    let mut input = BatchInput {
        items: store
            .active_items()?
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect(),
        ..BatchInput::default()
    };

    for vote in store.active_votes()? {
        let Some(answer) = vote.kind.signal() else {
            input.ignored.push(vote);
            continue;
        };
        if !input.items.contains_key(&vote.item) {
            debug!(item = %vote.item, user = %vote.user, "skipping vote on inactive item");
            continue;
        }
        load_user(store, &mut input.users, &vote.user)?;
        if let Some(user) = input.users.get(&vote.user) {
            engine.add_vote(NodeKey::User(vote.user.clone()), vote.item.clone(), answer, prior_of(user));
        }
        input.counted.push(vote);
    }

    let authored: Vec<(UserId, ItemId)> = input
        .items
        .values()
        .map(|i| (i.author.clone(), i.id.clone()))
        .collect();
    for (author, item) in authored {
        load_user(store, &mut input.users, &author)?;
        if let Some(record) = input.users.get(&author) {
            engine.add_vote(karma::karma_key(&author), item, karma_vote, karma::karma_prior(record));
        }
    }
    Ok(input)
}
