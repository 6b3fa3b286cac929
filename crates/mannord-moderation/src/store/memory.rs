//! `BTreeMap`-backed [`IReputationStore`] with deterministic iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mannord_core::errors::{MannordResult, StoreError};
use mannord_core::models::{
    ComputationRecord, ItemId, ItemRecord, UserId, UserRecord, VoteRecord, WriteBack,
};
use mannord_core::traits::IReputationStore;

/// In-process store. Suitable for tests, demos and single-process embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryStore {
    users: BTreeMap<UserId, UserRecord>,
    items: BTreeMap<ItemId, ItemRecord>,
    votes: BTreeMap<(ItemId, UserId), VoteRecord>,
    computations: BTreeMap<String, ComputationRecord>,
}

/// Flat, serializable image of an [`InMemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDump {
    pub users: Vec<UserRecord>,
    pub items: Vec<ItemRecord>,
    pub votes: Vec<VoteRecord>,
    pub computations: Vec<ComputationRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn dump(&self) -> StoreDump {
        StoreDump {
            users: self.users.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
            votes: self.votes.values().cloned().collect(),
            computations: self.computations.values().cloned().collect(),
        }
    }

    pub fn restore(dump: StoreDump) -> Self {
        Self {
            users: dump.users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            items: dump.items.into_iter().map(|i| (i.id.clone(), i)).collect(),
            votes: dump
                .votes
                .into_iter()
                .map(|v| ((v.item.clone(), v.user.clone()), v))
                .collect(),
            computations: dump
                .computations
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.dump())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self::restore)
    }

    fn check_write_back(&self, write_back: &WriteBack) -> Result<(), StoreError> {
        for item in &write_back.items {
            if !self.items.contains_key(&item.id) {
                return Err(StoreError::WriteBackRejected {
                    reason: format!("item {} does not exist", item.id),
                });
            }
        }
        for vote in &write_back.votes {
            if !self.votes.contains_key(&(vote.item.clone(), vote.user.clone())) {
                return Err(StoreError::WriteBackRejected {
                    reason: format!("vote by {} on {} does not exist", vote.user, vote.item),
                });
            }
        }
        Ok(())
    }
}

impl IReputationStore for InMemoryStore {
    fn get_user(&self, id: &UserId) -> MannordResult<Option<UserRecord>> {
        Ok(self.users.get(id).cloned())
    }

    fn upsert_user(&mut self, user: UserRecord) -> MannordResult<()> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn get_item(&self, id: &ItemId) -> MannordResult<Option<ItemRecord>> {
        Ok(self.items.get(id).cloned())
    }

    fn upsert_item(&mut self, item: ItemRecord) -> MannordResult<()> {
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    fn delete_item(&mut self, id: &ItemId) -> MannordResult<()> {
        if self.items.remove(id).is_none() {
            return Err(StoreError::ItemNotFound { id: id.to_string() }.into());
        }
        self.votes.retain(|(item, _), _| item != id);
        Ok(())
    }

    fn get_vote(&self, user: &UserId, item: &ItemId) -> MannordResult<Option<VoteRecord>> {
        Ok(self.votes.get(&(item.clone(), user.clone())).cloned())
    }

    fn upsert_vote(&mut self, vote: VoteRecord) -> MannordResult<()> {
        if !self.items.contains_key(&vote.item) {
            return Err(StoreError::ItemNotFound {
                id: vote.item.to_string(),
            }
            .into());
        }
        self.votes
            .insert((vote.item.clone(), vote.user.clone()), vote);
        Ok(())
    }

    fn delete_vote(&mut self, user: &UserId, item: &ItemId) -> MannordResult<()> {
        match self.votes.remove(&(item.clone(), user.clone())) {
            Some(_) => Ok(()),
            None => Err(StoreError::VoteNotFound {
                user_id: user.to_string(),
                item_id: item.to_string(),
            }
            .into()),
        }
    }

    fn votes_on_item(&self, item: &ItemId) -> MannordResult<Vec<VoteRecord>> {
        Ok(self
            .votes
            .range((item.clone(), UserId::new(""))..)
            .take_while(|((i, _), _)| i == item)
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn active_votes(&self) -> MannordResult<Vec<VoteRecord>> {
        Ok(self.votes.values().filter(|v| !v.frozen).cloned().collect())
    }

    fn active_items(&self) -> MannordResult<Vec<ItemRecord>> {
        Ok(self.items.values().filter(|i| !i.frozen).cloned().collect())
    }

    fn items_marked_for_review(&self, limit: usize) -> MannordResult<Vec<ItemRecord>> {
        Ok(self
            .items
            .values()
            .filter(|i| i.classification.needs_review())
            .take(limit)
            .cloned()
            .collect())
    }

    fn computation(&self, name: &str) -> MannordResult<ComputationRecord> {
        Ok(self
            .computations
            .get(name)
            .cloned()
            .unwrap_or_else(|| ComputationRecord::new(name)))
    }

    fn apply_write_back(&mut self, write_back: WriteBack) -> MannordResult<()> {
        self.check_write_back(&write_back)?;
        let WriteBack {
            users,
            items,
            votes,
            computation,
        } = write_back;
        tracing::debug!(
            users = users.len(),
            items = items.len(),
            votes = votes.len(),
            "applying write-back"
        );
        for user in users {
            self.users.insert(user.id.clone(), user);
        }
        for item in items {
            self.items.insert(item.id.clone(), item);
        }
        for vote in votes {
            self.votes.insert((vote.item.clone(), vote.user.clone()), vote);
        }
        self.computations.insert(computation.name.clone(), computation);
        Ok(())
    }
}
