//! Weighted-normalized propagation in the spirit of Karger's iterative
//! reliability estimation.
//!
//! Each round runs two phases. Items with at least two incoming user
//! messages sum them into a weight and send every voter the leave-one-out
//! remainder, signed by that voter's answer. Users with at least two
//! incoming item messages accumulate `raw = base + Σ messages`, and send
//! each item `squash(raw - own) / norm`, signed by their answer, where
//! `norm` is the RMS of all those squashed residuals across the round.
//! Entities below the two-message floor sit the round out with a default
//! reliability.

use mannord_core::config::KargerConfig;
use mannord_core::constants::{COMPUTATION_KARGER, MIN_MESSAGES_PER_ROUND, NEUTRAL_NORMALIZATION};
use mannord_core::errors::PropagationError;
use mannord_core::models::{
    EvidencePair, ItemId, ItemSnapshot, NodeKey, PropagationOutcome, UserPrior, UserSnapshot,
};
use mannord_core::traits::IPropagationEngine;
use tracing::{debug, info};

use super::{check_finite, collect_outcome};
use crate::graph::{BipartiteGraph, EdgeId, Mailbox, UserHandle};
use crate::numeric::{rms_or_neutral, Saturation};

/// Committed results of the last successful run.
#[derive(Debug, Clone, Default)]
struct KargerState {
    weights: Vec<f64>,
    reliability: Vec<f64>,
    raw: Vec<f64>,
    normalization: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct KargerEngine {
    graph: BipartiteGraph,
    saturation: Saturation,
    default_reliability: f64,
    state: KargerState,
}

impl KargerEngine {
    pub fn new(saturation: Saturation, default_reliability: f64) -> Self {
        Self {
            graph: BipartiteGraph::new(),
            saturation,
            default_reliability,
            state: KargerState::default(),
        }
    }

    pub fn from_config(config: &KargerConfig) -> Self {
        Self::new(Saturation::from_config(config), config.default_reliability)
    }

    pub fn graph(&self) -> &BipartiteGraph {
        &self.graph
    }

    pub fn saturation(&self) -> Saturation {
        self.saturation
    }

    /// Items phase. Returns how many items had too few messages.
    fn from_items(&self, to_item: &Mailbox<f64>, to_user: &mut Mailbox<f64>, weights: &mut [f64]) -> usize {
        to_user.clear();
        let mut skipped = 0;
        for (h, node) in self.graph.items() {
            let incoming: Vec<(EdgeId, f64)> = to_item.received(&node.edges).collect();
            if incoming.len() < MIN_MESSAGES_PER_ROUND {
                skipped += 1;
                continue;
            }
            let weight: f64 = incoming.iter().map(|(_, m)| m).sum();
            weights[h.index()] = weight;
            for (e, m) in incoming {
                to_user.send(e, (weight - m) * self.graph.edge(e).answer);
            }
        }
        skipped
    }

    /// Users phase. Returns the round's normalization coefficient.
    fn from_users(
        &self,
        to_user: &Mailbox<f64>,
        to_item: &mut Mailbox<f64>,
        raw: &mut [f64],
        reliability: &mut [f64],
    ) -> f64 {
        to_item.clear();
        let mut residuals: Vec<(EdgeId, f64)> = Vec::new();
        let mut eligible: Vec<UserHandle> = Vec::new();
        for (h, node) in self.graph.users() {
            let incoming: Vec<(EdgeId, f64)> = to_user.received(&node.edges).collect();
            if incoming.len() < MIN_MESSAGES_PER_ROUND {
                raw[h.index()] = self.default_reliability;
                reliability[h.index()] = self.default_reliability;
                continue;
            }
            let accumulated =
                node.prior.base_reliability + incoming.iter().map(|(_, m)| m).sum::<f64>();
            raw[h.index()] = accumulated;
            residuals.extend(
                incoming
                    .iter()
                    .map(|&(e, m)| (e, self.saturation.apply(accumulated - m))),
            );
            eligible.push(h);
        }

        let values: Vec<f64> = residuals.iter().map(|&(_, v)| v).collect();
        let normalization = rms_or_neutral(&values);
        for (e, residual) in residuals {
            to_item.send(e, residual / normalization * self.graph.edge(e).answer);
        }
        for h in eligible {
            reliability[h.index()] = self.saturation.apply(raw[h.index()]) / normalization;
        }
        normalization
    }
}

impl Default for KargerEngine {
    fn default() -> Self {
        Self::from_config(&KargerConfig::default())
    }
}

impl IPropagationEngine for KargerEngine {
    fn add_vote(&mut self, user: NodeKey, item: ItemId, value: f64, prior: UserPrior) {
        self.graph.add_answer(user, item, value, prior);
    }

    fn compute_all(&mut self, k_max: usize) -> Result<PropagationOutcome, PropagationError> {
        let span = mannord_core::propagation_span!(COMPUTATION_KARGER, k_max);
        let _guard = span.enter();

        let g = &self.graph;
        let mut to_item = Mailbox::new(g.edge_count());
        let mut to_user = Mailbox::new(g.edge_count());
        for (e, edge) in g.edges() {
            to_item.send(e, edge.answer);
        }

        let mut weights = vec![0.0; g.item_count()];
        let mut raw: Vec<f64> = g.users().map(|(_, n)| n.prior.base_reliability).collect();
        let mut reliability = vec![self.default_reliability; g.user_count()];
        let mut normalization = NEUTRAL_NORMALIZATION;

        for round in 0..k_max {
            let thin_items = self.from_items(&to_item, &mut to_user, &mut weights);
            normalization = self.from_users(&to_user, &mut to_item, &mut raw, &mut reliability);
            debug!(round, thin_items, normalization, "round complete");
        }

        // Aggregate: propagated messages plus every direct voter's final reliability.
        for (h, node) in g.items() {
            let propagated: f64 = to_item.received(&node.edges).map(|(_, m)| m).sum();
            let direct: f64 = node
                .edges
                .iter()
                .map(|&e| {
                    let edge = g.edge(e);
                    reliability[edge.user.index()] * edge.answer
                })
                .sum();
            weights[h.index()] = propagated + direct;
        }

        for (h, node) in g.items() {
            check_finite(|| format!("item {}", node.id), weights[h.index()])?;
        }
        for (h, node) in g.users() {
            check_finite(|| format!("user {}", node.key), reliability[h.index()])?;
            check_finite(|| format!("user {}", node.key), raw[h.index()])?;
        }
        check_finite(|| "normalization".to_string(), normalization)?;

        let outcome = collect_outcome(g, &weights, &reliability, normalization, k_max);
        info!(
            users = g.user_count(),
            items = g.item_count(),
            votes = g.edge_count(),
            normalization,
            "weighted-normalized propagation complete"
        );
        self.state = KargerState {
            weights,
            reliability,
            raw,
            normalization: Some(normalization),
        };
        Ok(outcome)
    }

    fn get_item(&self, id: &ItemId) -> Option<ItemSnapshot> {
        let h = self.graph.item_handle(id)?;
        Some(ItemSnapshot {
            id: id.clone(),
            weight: self.state.weights.get(h.index()).copied().unwrap_or(0.0),
            evidence: EvidencePair::ZERO,
        })
    }

    fn get_user(&self, key: &NodeKey) -> Option<UserSnapshot> {
        let h = self.graph.user_handle(key)?;
        let node = self.graph.user(h);
        Some(UserSnapshot {
            key: key.clone(),
            reliability: self
                .state
                .reliability
                .get(h.index())
                .copied()
                .unwrap_or(self.default_reliability),
            reliability_raw: self
                .state
                .raw
                .get(h.index())
                .copied()
                .unwrap_or(node.prior.base_reliability),
            evidence: EvidencePair::ZERO,
        })
    }

    fn normalization(&self) -> f64 {
        self.state.normalization.unwrap_or(NEUTRAL_NORMALIZATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(engine: &mut KargerEngine, user: &str, item: &str, value: f64) {
        engine.add_vote(NodeKey::User(user.into()), item.into(), value, UserPrior::default());
    }

    #[test]
    fn single_vote_uses_default_reliability() {
        let mut engine = KargerEngine::default();
        vote(&mut engine, "u1", "it1", 1.0);
        let outcome = engine.compute_all(10).unwrap();
        assert_eq!(outcome.item_weights[&ItemId::from("it1")], 0.5);
        let user = engine.get_user(&NodeKey::User("u1".into())).unwrap();
        assert_eq!(user.reliability, 0.5);
        assert_eq!(engine.normalization(), 1.0);
    }

    #[test]
    fn empty_graph_computes_nothing() {
        let mut engine = KargerEngine::default();
        let outcome = engine.compute_all(10).unwrap();
        assert!(outcome.item_weights.is_empty());
        assert_eq!(outcome.normalization, 1.0);
    }

    #[test]
    fn unknown_ids_have_no_snapshot() {
        let engine = KargerEngine::default();
        assert!(engine.get_item(&"nope".into()).is_none());
        assert!(engine.get_user(&NodeKey::User("nope".into())).is_none());
    }
}
