//! Bipartite user/item graph with stable integer handles.
//!
//! Nodes never point at each other. Every judgment is an [`Edge`] in one
//! flat list, both endpoints keep the ids of their edges, and per-round
//! messages live in edge-indexed [`Mailbox`]es that are cleared between phases.

mod arena;
mod message;

pub use arena::{BipartiteGraph, Edge, EdgeId, ItemHandle, ItemNode, UserHandle, UserNode};
pub use message::Mailbox;
