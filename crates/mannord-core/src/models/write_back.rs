use serde::{Deserialize, Serialize};

use super::{ComputationRecord, ItemRecord, UserRecord, VoteRecord};

/// Complete result of a batch run, applied to the store in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteBack {
    pub users: Vec<UserRecord>,
    pub items: Vec<ItemRecord>,
    pub votes: Vec<VoteRecord>,
    pub computation: ComputationRecord,
}

impl WriteBack {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.items.is_empty() && self.votes.is_empty()
    }
}
