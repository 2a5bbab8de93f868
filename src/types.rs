// src/types.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// One row of the symbol directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: String,
    pub name: String,
}

impl SymbolEntry {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Which side of the directory a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    ByName,
    BySymbol,
}

/// Price fields scraped from a quote page, kept as the page formats them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: String,
    pub previous_close: String,
    pub market_cap: String,
    pub fetched_at: DateTime<Utc>,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  ---------------------------------")?;
        writeln!(f, "    Stock: {}", self.symbol)?;
        writeln!(f, "    Current stock price: ${}", self.price)?;
        writeln!(f, "    Previous close price: ${}", self.previous_close)?;
        writeln!(f, "    Market cap: {}", self.market_cap)?;
        write!(f, "  ---------------------------------")
    }
}

/// Outcome of toggling a symbol in the watchlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistChange {
    Added,
    Removed,
}
