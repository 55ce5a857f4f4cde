use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use super::Node;

/// A min-queue of subtrees, lightest first.
///
/// Equal weights come out in insertion order, so the same frequency table
/// always merges into the same tree.
#[derive(Default)]
pub(super) struct NodeQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    inserted: u64,
}

struct Entry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl NodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, node: Node) {
        let entry = Entry {
            weight: node.weight(),
            seq: self.inserted,
            node,
        };
        self.inserted += 1;
        self.heap.push(Reverse(entry));
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

// Sequence numbers are unique, so the key alone is a total order.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
