//! Reference persistence collaborator.

mod memory;

pub use memory::{InMemoryStore, StoreDump};
