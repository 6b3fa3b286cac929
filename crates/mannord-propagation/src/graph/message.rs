use super::EdgeId;

/// Per-round message slots, one per edge and direction.
///
/// An empty slot means nothing was sent along that edge this round.
#[derive(Debug, Clone)]
pub struct Mailbox<T> {
    slots: Vec<Option<T>>,
}

impl<T: Copy> Mailbox<T> {
    pub fn new(edges: usize) -> Self {
        Self {
            slots: vec![None; edges],
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    pub fn send(&mut self, edge: EdgeId, message: T) {
        self.slots[edge.index()] = Some(message);
    }

    pub fn get(&self, edge: EdgeId) -> Option<T> {
        self.slots[edge.index()]
    }

    /// Messages waiting on `edges`, paired with their edge.
    pub fn received<'a>(&'a self, edges: &'a [EdgeId]) -> impl Iterator<Item = (EdgeId, T)> + 'a {
        edges.iter().filter_map(move |&e| self.get(e).map(|m| (e, m)))
    }
}
