// src/symbols/mod.rs
pub mod directory;
pub mod parser;

pub use directory::{search, search_entries, SymbolDirectory};
pub use parser::parse;
