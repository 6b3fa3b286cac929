//! KarmaUser: the synthetic per-author node that feeds an author-reputation
//! prior into every item that author creates.
//!
//! During a batch run the node `-<author>` casts a fixed small positive vote
//! on each of the author's active items. Its resulting reliability is stored
//! on the author and seeds the score of the author's next items.

use mannord_core::config::MannordConfig;
use mannord_core::models::{NodeKey, UserId, UserPrior, UserRecord, UserSnapshot};

/// Graph key of `author`'s KarmaUser.
pub fn karma_key(author: &UserId) -> NodeKey {
    NodeKey::Karma(author.clone())
}

/// The fixed vote a KarmaUser casts under `config`'s algorithm.
pub fn karma_vote(config: &MannordConfig) -> f64 {
    config.karma_user_vote()
}

/// Prior the KarmaUser node enters the graph with.
pub fn karma_prior(author: &UserRecord) -> UserPrior {
    UserPrior {
        base_reliability: author.karma.base_reliability,
        base_evidence: author.karma.base_evidence,
    }
}

/// Store a batch result for the KarmaUser on its author.
pub fn absorb_snapshot(author: &mut UserRecord, snapshot: &UserSnapshot) {
    author.karma.reliability = snapshot.reliability;
    author.karma.evidence = snapshot.evidence;
}
