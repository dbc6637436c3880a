use std::collections::BTreeMap;

use crate::symbol::{symbols, Symbol};

/// Occurrence counts per symbol, iterated in ascending symbol order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, usize>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let counts = symbols(text).fold(BTreeMap::new(), |mut acc, symbol| {
            let count = acc.entry(symbol).or_insert(0usize);
            *count = count.saturating_add(1);
            acc
        });
        Self { counts }
    }

    pub fn get(&self, symbol: Symbol) -> usize {
        self.counts.get(&symbol).copied().unwrap_or_default()
    }

    /// Symbols with a nonzero count, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&symbol, &count)| (symbol, count))
    }

    pub fn total(&self) -> usize {
        self.counts
            .values()
            .fold(0usize, |acc, &count| acc.saturating_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl FromIterator<(Symbol, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, usize)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            let entry = counts.entry(symbol).or_insert(0usize);
            *entry = entry.saturating_add(count);
        }
        Self { counts }
    }
}
