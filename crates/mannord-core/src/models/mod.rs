mod classification;
mod computation;
mod evidence;
mod ids;
mod item;
mod snapshot;
mod user;
mod vote;
mod write_back;

pub use classification::Classification;
pub use computation::ComputationRecord;
pub use evidence::EvidencePair;
pub use ids::{ItemId, NodeKey, UserId};
pub use item::ItemRecord;
pub use snapshot::{ItemSnapshot, PropagationOutcome, UserPrior, UserSnapshot};
pub use user::{KarmaRecord, UserRecord};
pub use vote::{ReliabilityTrail, VoteContribution, VoteKind, VoteRecord};
pub use write_back::WriteBack;
