//! The code tree: a binary tree whose root-to-leaf paths are the codes.
//! Left is `0`, right is `1`.

mod queue;

use crate::{frequency::FrequencyTable, Error, Result, Symbol};

use self::queue::NodeQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    /// `right` is only ever missing at the root of a one-symbol tree, where
    /// the lone leaf hangs on the left so it still gets a 1-bit code.
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// `first` (the lighter, or older on a tie) goes left. The weight
    /// saturates at `u64::MAX`.
    pub fn merge(first: Node, second: Node) -> Self {
        Node::Internal {
            weight: first.weight().saturating_add(second.weight()),
            left: Box::new(first),
            right: Some(Box::new(second)),
        }
    }

    fn wrap(only: Node) -> Self {
        Node::Internal {
            weight: only.weight(),
            left: Box::new(only),
            right: None,
        }
    }

    /// Aggregate frequency of every leaf under this node.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, .. } => Some(left.as_ref()),
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { right, .. } => right.as_deref(),
        }
    }

    /// The child a `bit` leads to: right for `1`, left for `0`.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                let right = right.as_deref().map_or(0, Node::depth);
                1 + left.depth().max(right)
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => {
                left.leaf_count() + right.as_deref().map_or(0, Node::leaf_count)
            }
        }
    }
}

/// A built code tree. `root` is `None` only for the tree of empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTree {
    root: Option<Node>,
}

impl CodeTree {
    /// Run the greedy merge over `table`: repeatedly join the two lightest
    /// subtrees until one is left.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut queue = NodeQueue::new();
        for (symbol, count) in table.iter() {
            queue.push(Node::leaf(symbol, count));
        }

        if queue.len() == 1 {
            if let Some(only) = queue.pop() {
                queue.push(Node::wrap(only));
            }
        }

        let root = loop {
            let first = queue.pop().ok_or(Error::EmptyInput)?;
            match queue.pop() {
                None => break first,
                Some(second) => {
                    tracing::trace!(
                        left = first.weight(),
                        right = second.weight(),
                        "merging subtrees"
                    );
                    queue.push(Node::merge(first, second));
                }
            }
        };

        let tree = Self { root: Some(root) };
        tracing::debug!(
            symbols = tree.leaf_count(),
            depth = tree.depth(),
            weight = tree.weight(),
            "built code tree"
        );
        Ok(tree)
    }

    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(input))
    }

    /// The tree for empty input. It has no codes, and decodes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Number of symbols the tree was built from, repeats included.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, Node::weight)
    }
}
