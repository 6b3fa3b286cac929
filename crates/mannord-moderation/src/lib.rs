//! # mannord-moderation
//!
//! Turns propagated scores into moderation decisions and keeps stored state
//! consistent between full batch runs and single-vote incremental updates.
//!
//! [`ReputationSystem`] is the entry point: it owns an [`IReputationStore`]
//! and a [`MannordConfig`], both injected at construction.
//!
//! [`IReputationStore`]: mannord_core::traits::IReputationStore
//! [`MannordConfig`]: mannord_core::config::MannordConfig

pub mod batch;
pub mod classification;
pub mod incremental;
pub mod karma;
pub mod store;
pub mod system;

pub use batch::{BatchReport, BatchRunner};
pub use classification::ClassificationPolicy;
pub use incremental::IncrementalController;
pub use store::{InMemoryStore, StoreDump};
pub use system::{ReputationSystem, VoteOutcome};
