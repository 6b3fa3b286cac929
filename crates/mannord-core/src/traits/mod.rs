mod propagation_engine;
mod reputation_store;

pub use propagation_engine::IPropagationEngine;
pub use reputation_store::IReputationStore;
