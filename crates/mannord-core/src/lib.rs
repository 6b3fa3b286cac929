//! # mannord-core
//!
//! Foundation crate for the mannord reputation engine.
//! Defines ids, records, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::{Algorithm, MannordConfig};
pub use errors::{MannordError, MannordResult};
pub use models::{
    Classification, EvidencePair, ItemId, ItemRecord, NodeKey, UserId, UserRecord, VoteKind,
    VoteRecord,
};
