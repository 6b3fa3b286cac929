use crate::errors::PropagationError;
use crate::models::{ItemId, ItemSnapshot, NodeKey, PropagationOutcome, UserPrior, UserSnapshot};

/// Shared contract of the propagation engine variants.
pub trait IPropagationEngine {
    /// Register or overwrite the judgment of `user` on `item`.
    ///
    /// The prior is taken from the first vote that creates the user node.
    fn add_vote(&mut self, user: NodeKey, item: ItemId, value: f64, prior: UserPrior);

    /// Run `k_max` scatter/gather rounds and aggregate final scores.
    ///
    /// On error the engine's previously computed scores are left as they were.
    fn compute_all(&mut self, k_max: usize) -> Result<PropagationOutcome, PropagationError>;

    fn get_item(&self, id: &ItemId) -> Option<ItemSnapshot>;

    fn get_user(&self, key: &NodeKey) -> Option<UserSnapshot>;

    /// Normalization coefficient of the last run (1.0 when not applicable).
    fn normalization(&self) -> f64;
}
