use crate::errors::MannordResult;
use crate::models::{ComputationRecord, ItemId, ItemRecord, UserId, UserRecord, VoteRecord, WriteBack};

/// Persistence collaborator for users, items, votes and computation records.
///
/// Callers provide single-writer discipline; writers take `&mut self`.
pub trait IReputationStore {
    // --- Users ---
    fn get_user(&self, id: &UserId) -> MannordResult<Option<UserRecord>>;
    fn upsert_user(&mut self, user: UserRecord) -> MannordResult<()>;

    // --- Items ---
    fn get_item(&self, id: &ItemId) -> MannordResult<Option<ItemRecord>>;
    fn upsert_item(&mut self, item: ItemRecord) -> MannordResult<()>;
    /// Delete an item and every vote cast on it.
    fn delete_item(&mut self, id: &ItemId) -> MannordResult<()>;

    // --- Votes ---
    fn get_vote(&self, user: &UserId, item: &ItemId) -> MannordResult<Option<VoteRecord>>;
    fn upsert_vote(&mut self, vote: VoteRecord) -> MannordResult<()>;
    fn delete_vote(&mut self, user: &UserId, item: &ItemId) -> MannordResult<()>;
    fn votes_on_item(&self, item: &ItemId) -> MannordResult<Vec<VoteRecord>>;

    // --- Batch inputs ---
    /// Non-frozen votes, in deterministic order.
    fn active_votes(&self) -> MannordResult<Vec<VoteRecord>>;
    /// Non-frozen items, in deterministic order.
    fn active_items(&self) -> MannordResult<Vec<ItemRecord>>;
    /// Up to `limit` ambiguous items in id order.
    fn items_marked_for_review(&self, limit: usize) -> MannordResult<Vec<ItemRecord>>;

    // --- Computation ---
    /// Last computation record for `name`, or a fresh one.
    fn computation(&self, name: &str) -> MannordResult<ComputationRecord>;

    /// Apply a whole batch result. Either every record lands or none does.
    fn apply_write_back(&mut self, write_back: WriteBack) -> MannordResult<()>;
}
