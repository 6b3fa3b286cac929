//! Dirichlet-posterior propagation.
//!
//! Same two-phase leave-one-out structure as the weighted-normalized engine,
//! but items accumulate signed `(c_n, c_p)` evidence pairs and users turn
//! their `(u_n, u_p)` pairs into reliability through the Beta percentile
//! statistic. No saturation and no normalization: the statistic is bounded.

use mannord_core::config::DirichletConfig;
use mannord_core::constants::{COMPUTATION_DIRICHLET, NEUTRAL_NORMALIZATION};
use mannord_core::errors::PropagationError;
use mannord_core::models::{
    EvidencePair, ItemId, ItemSnapshot, NodeKey, PropagationOutcome, UserPrior, UserSnapshot,
};
use mannord_core::traits::IPropagationEngine;
use tracing::{debug, info};

use super::{check_finite, collect_outcome};
use crate::graph::{BipartiteGraph, EdgeId, Mailbox};
use crate::numeric::{sign, split_by_sign, BetaPercentile};

#[derive(Debug, Clone, Default)]
struct DirichletState {
    item_evidence: Vec<EvidencePair>,
    weights: Vec<f64>,
    user_evidence: Vec<EvidencePair>,
    reliability: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct DirichletEngine {
    graph: BipartiteGraph,
    statistic: BetaPercentile,
    state: DirichletState,
}

impl DirichletEngine {
    pub fn new(statistic: BetaPercentile) -> Self {
        Self {
            graph: BipartiteGraph::new(),
            statistic,
            state: DirichletState::default(),
        }
    }

    pub fn from_config(config: &DirichletConfig) -> Self {
        Self::new(BetaPercentile::from_config(config))
    }

    pub fn graph(&self) -> &BipartiteGraph {
        &self.graph
    }

    pub fn statistic(&self) -> &BetaPercentile {
        &self.statistic
    }

    /// Items phase: every item sends each voter its evidence minus that voter's message.
    fn from_items(&self, to_item: &Mailbox<f64>, to_user: &mut Mailbox<EvidencePair>) {
        to_user.clear();
        for (_, node) in self.graph.items() {
            let incoming: Vec<(EdgeId, f64)> = to_item.received(&node.edges).collect();
            let total = incoming
                .iter()
                .fold(EvidencePair::ZERO, |acc, &(_, m)| acc + EvidencePair::from_signed(m));
            for (e, m) in incoming {
                to_user.send(e, total - EvidencePair::from_signed(m));
            }
        }
    }

    /// Users phase: fold item evidence into `(u_n, u_p)` and answer with leave-one-out reliability.
    fn from_users(
        &self,
        to_user: &Mailbox<EvidencePair>,
        to_item: &mut Mailbox<f64>,
        evidence: &mut [EvidencePair],
        reliability: &mut [f64],
    ) -> Result<(), PropagationError> {
        to_item.clear();
        for (h, node) in self.graph.users() {
            let mut accumulated = node.prior.base_evidence;
            let mut contributions: Vec<(EdgeId, EvidencePair)> = Vec::new();
            for (e, c) in to_user.received(&node.edges) {
                let s = sign(self.graph.edge(e).answer);
                let v = split_by_sign(c.negative * s, c.positive * s)?;
                accumulated += v;
                contributions.push((e, v));
            }
            evidence[h.index()] = accumulated;
            reliability[h.index()] = self.statistic.reliability(accumulated)?;
            for (e, v) in contributions {
                let leave_one_out = self.statistic.reliability(accumulated - v)?;
                to_item.send(e, self.graph.edge(e).answer * leave_one_out);
            }
        }
        Ok(())
    }

    fn run(&self, k_max: usize) -> Result<DirichletState, PropagationError> {
        let g = &self.graph;
        let mut to_item = Mailbox::new(g.edge_count());
        let mut to_user = Mailbox::new(g.edge_count());
        for (e, edge) in g.edges() {
            to_item.send(e, edge.answer);
        }

        let mut user_evidence: Vec<EvidencePair> =
            g.users().map(|(_, n)| n.prior.base_evidence).collect();
        let mut reliability = user_evidence
            .iter()
            .map(|&ev| self.statistic.reliability(ev))
            .collect::<Result<Vec<f64>, _>>()?;

        for round in 0..k_max {
            self.from_items(&to_item, &mut to_user);
            self.from_users(&to_user, &mut to_item, &mut user_evidence, &mut reliability)?;
            debug!(round, "round complete");
        }

        // Aggregate from each direct voter's final reliability.
        let mut item_evidence = Vec::with_capacity(g.item_count());
        let mut weights = Vec::with_capacity(g.item_count());
        for (_, node) in g.items() {
            let c = node.edges.iter().fold(EvidencePair::ZERO, |acc, &e| {
                let edge = g.edge(e);
                acc + EvidencePair::from_signed(reliability[edge.user.index()] * edge.answer)
            });
            let weight = self.statistic.item_weight(c)?;
            check_finite(|| format!("item {}", node.id), weight)?;
            item_evidence.push(c);
            weights.push(weight);
        }
        for (h, node) in g.users() {
            check_finite(|| format!("user {}", node.key), reliability[h.index()])?;
        }

        Ok(DirichletState {
            item_evidence,
            weights,
            user_evidence,
            reliability,
        })
    }
}

impl Default for DirichletEngine {
    fn default() -> Self {
        Self::from_config(&DirichletConfig::default())
    }
}

impl IPropagationEngine for DirichletEngine {
    fn add_vote(&mut self, user: NodeKey, item: ItemId, value: f64, prior: UserPrior) {
        self.graph.add_answer(user, item, value, prior);
    }

    fn compute_all(&mut self, k_max: usize) -> Result<PropagationOutcome, PropagationError> {
        let span = mannord_core::propagation_span!(COMPUTATION_DIRICHLET, k_max);
        let _guard = span.enter();

        let state = self.run(k_max)?;
        let outcome = collect_outcome(
            &self.graph,
            &state.weights,
            &state.reliability,
            NEUTRAL_NORMALIZATION,
            k_max,
        );
        info!(
            users = self.graph.user_count(),
            items = self.graph.item_count(),
            votes = self.graph.edge_count(),
            "dirichlet propagation complete"
        );
        self.state = state;
        Ok(outcome)
    }

    fn get_item(&self, id: &ItemId) -> Option<ItemSnapshot> {
        let h = self.graph.item_handle(id)?;
        Some(ItemSnapshot {
            id: id.clone(),
            weight: self.state.weights.get(h.index()).copied().unwrap_or(0.0),
            evidence: self
                .state
                .item_evidence
                .get(h.index())
                .copied()
                .unwrap_or(EvidencePair::ZERO),
        })
    }

    fn get_user(&self, key: &NodeKey) -> Option<UserSnapshot> {
        let h = self.graph.user_handle(key)?;
        let prior = self.graph.user(h).prior.base_evidence;
        Some(UserSnapshot {
            key: key.clone(),
            reliability: self.state.reliability.get(h.index()).copied().unwrap_or(0.0),
            reliability_raw: 0.0,
            evidence: self.state.user_evidence.get(h.index()).copied().unwrap_or(prior),
        })
    }

    fn normalization(&self) -> f64 {
        NEUTRAL_NORMALIZATION
    }
}
