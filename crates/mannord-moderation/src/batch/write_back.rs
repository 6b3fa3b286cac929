//! Phase 3: turn engine snapshots into a single [`WriteBack`].

use mannord_core::errors::{MannordResult, StoreError};
use mannord_core::models::{ComputationRecord, ItemId, NodeKey, VoteContribution, WriteBack};
use mannord_core::traits::IPropagationEngine;
use mannord_propagation::numeric::sign;

use super::graph_builder::BatchInput;
use crate::classification::ClassificationPolicy;
use crate::incremental::IncrementalController;
use crate::karma;

/// Assembled write-back plus the ids of items frozen by this run.
#[derive(Debug)]
pub struct Assembled {
    pub write_back: WriteBack,
    pub newly_frozen: Vec<ItemId>,
}

/// Copy scores back onto the loaded records, freeze decided items and apply
/// the freeze-time nudges for their votes. Nothing touches the store here.
pub fn assemble(
    mut input: BatchInput,
    engine: &dyn IPropagationEngine,
    policy: &ClassificationPolicy,
    controller: &IncrementalController,
    mut computation: ComputationRecord,
) -> MannordResult<Assembled> {
    let normalization = engine.normalization();
    let mut newly_frozen = Vec::new();

    for item in input.items.values_mut() {
        if let Some(snapshot) = engine.get_item(&item.id) {
            item.weight = snapshot.weight;
            item.evidence = snapshot.evidence;
        }
        policy.reclassify(item);
        if policy.should_freeze(item.weight) {
            item.frozen = true;
            newly_frozen.push(item.id.clone());
        }
    }

    for user in input.users.values_mut() {
        if let Some(snapshot) = engine.get_user(&NodeKey::User(user.id.clone())) {
            user.reliability = snapshot.reliability;
            user.reliability_raw = snapshot.reliability_raw;
            user.evidence = snapshot.evidence;
        }
        if let Some(snapshot) = engine.get_user(&karma::karma_key(&user.id)) {
            karma::absorb_snapshot(user, &snapshot);
        }
    }

    let base_increment = controller.base_increment();
    let mut votes = Vec::with_capacity(input.counted.len() + input.ignored.len());
    for mut vote in input.counted {
        vote.contribution = None;
        if let Some(item) = input.items.get(&vote.item).filter(|i| i.frozen) {
            let verdict = item.classification.verdict();
            let answer = vote.kind.answer()?;
            let base_delta = sign(answer) * verdict * base_increment;
            let karma_delta = verdict * base_increment;
            let author = item.author.clone();
            let caster = input
                .users
                .get_mut(&vote.user)
                .ok_or_else(|| StoreError::UserNotFound { id: vote.user.to_string() })?;
            let trail = controller.nudge_base_traced(caster, base_delta, normalization)?;
            if let Some(author) = input.users.get_mut(&author) {
                controller.nudge_karma(author, karma_delta)?;
            }
            vote.frozen = true;
            vote.contribution = Some(VoteContribution::FrozenNudge {
                base_delta,
                karma_delta,
                trail,
            });
        }
        votes.push(vote);
    }
    for mut vote in input.ignored {
        vote.frozen = true;
        votes.push(vote);
    }

    computation.runs += 1;
    computation.normalization = normalization;

    Ok(Assembled {
        write_back: WriteBack {
            users: input.users.into_values().collect(),
            items: input.items.into_values().collect(),
            votes,
            computation,
        },
        newly_frozen,
    })
}
