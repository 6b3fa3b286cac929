//! # mannord-propagation
//!
//! Iterative message passing over the user/item bipartite graph.
//! Two engines share one contract ([`mannord_core::traits::IPropagationEngine`]):
//! the weighted-normalized engine and the Dirichlet-posterior engine.

pub mod engines;
pub mod graph;
pub mod numeric;

pub use engines::{DirichletEngine, KargerEngine, PropagationEngine};
pub use graph::{BipartiteGraph, EdgeId, ItemHandle, UserHandle};
pub use numeric::{split_by_sign, BetaPercentile, Saturation};
