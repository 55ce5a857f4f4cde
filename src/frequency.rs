use std::{
    collections::BTreeMap,
    io::{self, BufRead},
};

use crate::Symbol;

/// How often each distinct symbol occurs in the input.
///
/// Iteration is in ascending symbol order, which is also the order leaves
/// enter the tree builder's queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(input: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_all(input);
        table
    }

    /// Count every byte `input` yields until EOF.
    pub fn from_reader(mut input: impl BufRead) -> io::Result<Self> {
        let mut table = Self::new();
        loop {
            let chunk = input.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            table.add_all(chunk);
            let n = chunk.len();
            input.consume(n);
        }
        Ok(table)
    }

    /// Build a table from explicit `(symbol, count)` pairs. Zero counts are
    /// dropped; repeated symbols add up, saturating at `u64::MAX`.
    pub fn from_counts(counts: impl IntoIterator<Item = (Symbol, u64)>) -> Self {
        let mut table = Self::new();
        for (symbol, count) in counts {
            if count != 0 {
                let entry = table.counts.entry(symbol).or_insert(0);
                *entry = entry.saturating_add(count);
            }
        }
        table
    }

    pub fn add(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    pub fn add_all(&mut self, symbols: &[Symbol]) {
        for &symbol in symbols {
            self.add(symbol);
        }
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of symbols counted, repeats included. Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use super::*;

    #[test]
    fn counts_repeats_and_whitespace() {
        let table = FrequencyTable::from_bytes(b"a b  a\n");
        let counts: Vec<_> = table.iter().collect();
        assert_eq!(counts, [(b'\n', 1), (b' ', 3), (b'a', 2), (b'b', 1)]);
        assert_eq!(table.total(), 7);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(b'z'), 0);
    }

    #[test]
    fn empty_input() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.max_count(), 0);
    }

    #[test]
    fn reader_matches_slice() -> anyhow::Result<()> {
        let input = b"the quick brown fox jumps over the lazy dog".repeat(50);
        // A tiny buffer forces many `fill_buf` rounds.
        let reader = BufReader::with_capacity(7, Cursor::new(&input));
        assert_eq!(
            FrequencyTable::from_reader(reader)?,
            FrequencyTable::from_bytes(&input)
        );
        Ok(())
    }

    #[test]
    fn from_counts_merges_and_drops_zeros() {
        let table = FrequencyTable::from_counts([(b'a', 2), (b'b', 0), (b'a', 3)]);
        assert_eq!(table.iter().collect::<Vec<_>>(), [(b'a', 5)]);
    }

    #[test]
    fn huge_counts_saturate() {
        let table = FrequencyTable::from_counts([(b'a', u64::MAX), (b'b', u64::MAX), (b'a', 1)]);
        assert_eq!(table.get(b'a'), u64::MAX);
        assert_eq!(table.total(), u64::MAX);
    }
}
