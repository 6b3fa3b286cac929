//! Full batch recomputation over every non-frozen vote.
//!
//! Phase 1 builds the graph from the store, phase 2 runs the configured
//! engine, phase 3 assembles a single write-back. The store is touched only
//! after all three succeed, so a failed run leaves committed state as it was.

pub mod graph_builder;
pub mod write_back;

use serde::Serialize;
use tracing::info;

use mannord_core::batch_span;
use mannord_core::config::{Algorithm, MannordConfig};
use mannord_core::errors::MannordResult;
use mannord_core::models::{Classification, ItemId};
use mannord_core::traits::{IPropagationEngine, IReputationStore};
use mannord_propagation::PropagationEngine;

use crate::classification::ClassificationPolicy;
use crate::incremental::IncrementalController;
use crate::karma;

/// Summary of one completed batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub algorithm: Algorithm,
    /// User-side graph nodes, KarmaUsers included.
    pub users: usize,
    pub items: usize,
    /// Votes fed to the engine, KarmaUser votes included.
    pub votes: usize,
    pub newly_frozen: Vec<ItemId>,
    pub normalization: f64,
    pub spam: usize,
    pub ham: usize,
    pub ambiguous: usize,
    pub rounds: usize,
}

/// Runs batch recomputations under one configuration.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: MannordConfig,
    policy: ClassificationPolicy,
    controller: IncrementalController,
}

impl BatchRunner {
    pub fn new(config: MannordConfig) -> Self {
        Self {
            policy: ClassificationPolicy::from_config(&config),
            controller: IncrementalController::from_config(&config),
            config,
        }
    }

    pub fn run(&self, store: &mut dyn IReputationStore) -> MannordResult<BatchReport> {
        let span = batch_span!(self.config.algorithm);
        let _guard = span.enter();

        let algorithm = self.config.algorithm;
        let computation = store.computation(algorithm.computation_name())?;

        // Phase 1: graph.
        let mut engine = PropagationEngine::from_config(&self.config);
        let input = graph_builder::build(&*store, &mut engine, karma::karma_vote(&self.config))?;
        let graph = engine.graph();
        let (users, items, votes) = (graph.user_count(), graph.item_count(), graph.edge_count());
        info!(users, items, votes, "batch graph built");

        // Phase 2: propagation.
        let outcome = engine.compute_all(self.config.k_max())?;

        // Phase 3: write-back.
        let assembled = write_back::assemble(input, &engine, &self.policy, &self.controller, computation)?;
        let mut report = BatchReport {
            algorithm,
            users,
            items,
            votes,
            newly_frozen: assembled.newly_frozen,
            normalization: outcome.normalization,
            spam: 0,
            ham: 0,
            ambiguous: 0,
            rounds: outcome.rounds,
        };
        for item in &assembled.write_back.items {
            match item.classification {
                Classification::Spam => report.spam += 1,
                Classification::Ham => report.ham += 1,
                Classification::Ambiguous => report.ambiguous += 1,
            }
        }

        store.apply_write_back(assembled.write_back)?;
        info!(
            newly_frozen = report.newly_frozen.len(),
            spam = report.spam,
            ham = report.ham,
            ambiguous = report.ambiguous,
            normalization = report.normalization,
            "batch run committed"
        );
        Ok(report)
    }
}
