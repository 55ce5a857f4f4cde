use std::collections::BTreeMap;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::{
    tree::{CodeTree, Node},
    Symbol,
};

/// The bits of one code, in the order they're written.
pub type Code = BitVec<u8, Msb0>;

/// Symbol to code lookup, derived once from a [`CodeTree`].
///
/// Codes are leaf paths, so no code is a prefix of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    pub fn from_tree(tree: &CodeTree) -> Self {
        let mut table = Self::default();
        if let Some(root) = tree.root() {
            let mut path = Code::new();
            table.collect(root, &mut path);
        }
        table
    }

    /// Pre-order walk, keeping the path so far in `path`.
    fn collect(&mut self, node: &Node, path: &mut Code) {
        if let Some(symbol) = node.symbol() {
            self.codes.insert(symbol, path.clone());
            return;
        }

        for (bit, child) in [(false, node.left()), (true, node.right())] {
            if let Some(child) = child {
                path.push(bit);
                self.collect(child, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn code_len(&self, symbol: Symbol) -> Option<usize> {
        self.codes.get(&symbol).map(BitVec::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
