//! Engine variants and the configuration-selected dispatcher.

mod dirichlet;
mod karger;

pub use dirichlet::DirichletEngine;
pub use karger::KargerEngine;

use mannord_core::config::{Algorithm, MannordConfig};
use mannord_core::errors::PropagationError;
use mannord_core::models::{ItemId, ItemSnapshot, NodeKey, PropagationOutcome, UserPrior, UserSnapshot};
use mannord_core::traits::IPropagationEngine;

use crate::graph::BipartiteGraph;

/// One of the two engines, chosen by [`MannordConfig::algorithm`].
#[derive(Debug, Clone)]
pub enum PropagationEngine {
    Karger(KargerEngine),
    Dirichlet(DirichletEngine),
}

impl PropagationEngine {
    pub fn from_config(config: &MannordConfig) -> Self {
        match config.algorithm {
            Algorithm::Karger => Self::Karger(KargerEngine::from_config(&config.karger)),
            Algorithm::Dirichlet => Self::Dirichlet(DirichletEngine::from_config(&config.dirichlet)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Karger(_) => Algorithm::Karger,
            Self::Dirichlet(_) => Algorithm::Dirichlet,
        }
    }

    pub fn graph(&self) -> &BipartiteGraph {
        match self {
            Self::Karger(e) => e.graph(),
            Self::Dirichlet(e) => e.graph(),
        }
    }

    fn inner(&self) -> &dyn IPropagationEngine {
        match self {
            Self::Karger(e) => e,
            Self::Dirichlet(e) => e,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn IPropagationEngine {
        match self {
            Self::Karger(e) => e,
            Self::Dirichlet(e) => e,
        }
    }
}

impl IPropagationEngine for PropagationEngine {
    fn add_vote(&mut self, user: NodeKey, item: ItemId, value: f64, prior: UserPrior) {
        self.inner_mut().add_vote(user, item, value, prior);
    }

    fn compute_all(&mut self, k_max: usize) -> Result<PropagationOutcome, PropagationError> {
        self.inner_mut().compute_all(k_max)
    }

    fn get_item(&self, id: &ItemId) -> Option<ItemSnapshot> {
        self.inner().get_item(id)
    }

    fn get_user(&self, key: &NodeKey) -> Option<UserSnapshot> {
        self.inner().get_user(key)
    }

    fn normalization(&self) -> f64 {
        self.inner().normalization()
    }
}

pub(crate) fn check_finite(
    entity: impl FnOnce() -> String,
    value: f64,
) -> Result<(), PropagationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PropagationError::NonFiniteValue {
            entity: entity(),
            value,
        })
    }
}

pub(crate) fn collect_outcome(
    graph: &BipartiteGraph,
    weights: &[f64],
    reliability: &[f64],
    normalization: f64,
    rounds: usize,
) -> PropagationOutcome {
    PropagationOutcome {
        item_weights: graph
            .items()
            .map(|(h, n)| (n.id.clone(), weights[h.index()]))
            .collect(),
        user_reliabilities: graph
            .users()
            .map(|(h, n)| (n.key.clone(), reliability[h.index()]))
            .collect(),
        normalization,
        rounds,
    }
}
