// src/symbols/directory.rs

use crate::types::{IndexKind, SymbolEntry};
use log::info;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Two-way lookup over one snapshot of the symbol directory.
///
/// Built once from parsed entries and read-only afterwards. Both maps are
/// ordered by key, so every listing and search result is ascending byte-wise.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolDirectory {
    by_symbol: BTreeMap<String, String>,
    by_name: BTreeMap<String, String>,
}

impl SymbolDirectory {
    /// Indexes `entries` in order. A later entry overwrites an earlier one with
    /// the same symbol, and likewise for the same name.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SymbolEntry>,
    {
        let mut directory = Self::default();
        for SymbolEntry { symbol, name } in entries {
            directory.by_name.insert(name.clone(), symbol.clone());
            directory.by_symbol.insert(symbol, name);
        }

        info!(
            "Symbol directory ready: {} symbols, {} names",
            directory.by_symbol.len(),
            directory.by_name.len()
        );

        directory
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn name_for(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(String::as_str)
    }

    pub fn symbol_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Pairs that resolve in both directions after last-write-wins.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_symbol
            .iter()
            .filter(|(symbol, name)| self.by_name.get(name.as_str()) == Some(*symbol))
            .map(|(symbol, name)| (symbol.as_str(), name.as_str()))
    }

    fn index(&self, kind: IndexKind) -> &BTreeMap<String, String> {
        match kind {
            IndexKind::ByName => &self.by_name,
            IndexKind::BySymbol => &self.by_symbol,
        }
    }
}

/// Keys of the selected index starting with `query`, with their values,
/// ascending by key. Comparison is byte-wise and case-sensitive.
pub fn search_entries<'a>(
    query: &str,
    kind: IndexKind,
    directory: &'a SymbolDirectory,
) -> Vec<(&'a str, &'a str)> {
    // Every key with the prefix sorts at or after the prefix itself.
    directory
        .index(kind)
        .range::<str, _>((Bound::Included(query), Bound::Unbounded))
        .take_while(|(key, _)| key.starts_with(query))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

/// Prefix search rendered as `"key - value"` lines.
pub fn search(query: &str, kind: IndexKind, directory: &SymbolDirectory) -> Vec<String> {
    search_entries(query, kind, directory)
        .into_iter()
        .map(|(key, value)| format!("{} - {}", key, value))
        .collect()
}
