use std::collections::HashMap;

use mannord_core::models::{ItemId, NodeKey, UserPrior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl UserHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ItemHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One user's judgment on one item. The sign encodes spam (-) or ham (+).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub user: UserHandle,
    pub item: ItemHandle,
    pub answer: f64,
}

#[derive(Debug, Clone)]
pub struct UserNode {
    pub key: NodeKey,
    pub prior: UserPrior,
    pub edges: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
pub struct ItemNode {
    pub id: ItemId,
    pub edges: Vec<EdgeId>,
}

/// Arena holding the graph topology. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct BipartiteGraph {
    users: Vec<UserNode>,
    items: Vec<ItemNode>,
    edges: Vec<Edge>,
    user_index: HashMap<NodeKey, UserHandle>,
    item_index: HashMap<ItemId, ItemHandle>,
    edge_index: HashMap<(UserHandle, ItemHandle), EdgeId>,
}

impl BipartiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `user`'s judgment on `item`, creating either node on first reference.
    ///
    /// A second judgment for the same pair overwrites the answer, keeping the
    /// user/edge relation 1:1. The prior is only read when the user node is created.
    pub fn add_answer(&mut self, user: NodeKey, item: ItemId, answer: f64, prior: UserPrior) -> EdgeId {
        let u = self.ensure_user(user, prior);
        let i = self.ensure_item(item);
        if let Some(&edge) = self.edge_index.get(&(u, i)) {
            self.edges[edge.index()].answer = answer;
            return edge;
        }
        let edge = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { user: u, item: i, answer });
        self.users[u.index()].edges.push(edge);
        self.items[i.index()].edges.push(edge);
        self.edge_index.insert((u, i), edge);
        edge
    }

    fn ensure_user(&mut self, key: NodeKey, prior: UserPrior) -> UserHandle {
        if let Some(&h) = self.user_index.get(&key) {
            return h;
        }
        let h = UserHandle(self.users.len() as u32);
        self.user_index.insert(key.clone(), h);
        self.users.push(UserNode {
            key,
            prior,
            edges: Vec::new(),
        });
        h
    }

    fn ensure_item(&mut self, id: ItemId) -> ItemHandle {
        if let Some(&h) = self.item_index.get(&id) {
            return h;
        }
        let h = ItemHandle(self.items.len() as u32);
        self.item_index.insert(id.clone(), h);
        self.items.push(ItemNode {
            id,
            edges: Vec::new(),
        });
        h
    }

    pub fn user_handle(&self, key: &NodeKey) -> Option<UserHandle> {
        self.user_index.get(key).copied()
    }

    pub fn item_handle(&self, id: &ItemId) -> Option<ItemHandle> {
        self.item_index.get(id).copied()
    }

    pub fn user(&self, h: UserHandle) -> &UserNode {
        &self.users[h.index()]
    }

    pub fn item(&self, h: ItemHandle) -> &ItemNode {
        &self.items[h.index()]
    }

    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.index()]
    }

    pub fn users(&self) -> impl Iterator<Item = (UserHandle, &UserNode)> {
        self.users
            .iter()
            .enumerate()
            .map(|(i, n)| (UserHandle(i as u32), n))
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemHandle, &ItemNode)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, n)| (ItemHandle(i as u32), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> NodeKey {
        NodeKey::User(id.into())
    }

    #[test]
    fn nodes_created_on_first_reference() {
        let mut g = BipartiteGraph::new();
        g.add_answer(user("u1"), "it1".into(), -1.0, UserPrior::default());
        g.add_answer(user("u1"), "it2".into(), -1.0, UserPrior::default());
        g.add_answer(user("u2"), "it1".into(), 1.0, UserPrior::default());
        assert_eq!(g.user_count(), 2);
        assert_eq!(g.item_count(), 2);
        assert_eq!(g.edge_count(), 3);
        let u1 = g.user_handle(&user("u1")).unwrap();
        assert_eq!(g.user(u1).edges.len(), 2);
    }

    #[test]
    fn repeated_answer_overwrites() {
        let mut g = BipartiteGraph::new();
        let a = g.add_answer(user("u1"), "it1".into(), -1.0, UserPrior::default());
        let b = g.add_answer(user("u1"), "it1".into(), 1.0, UserPrior::default());
        assert_eq!(a, b);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(a).answer, 1.0);
    }

    #[test]
    fn karma_and_user_nodes_are_distinct() {
        let mut g = BipartiteGraph::new();
        g.add_answer(user("u1"), "it1".into(), -1.0, UserPrior::default());
        g.add_answer(NodeKey::Karma("u1".into()), "it1".into(), 0.3, UserPrior::scalar(2.0));
        assert_eq!(g.user_count(), 2);
        let k = g.user_handle(&NodeKey::Karma("u1".into())).unwrap();
        assert_eq!(g.user(k).prior.base_reliability, 2.0);
    }
}
