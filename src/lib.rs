// src/lib.rs
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod monitor;
pub mod services;
pub mod source;
pub mod sources;
pub mod symbols;
pub mod types;

pub use client::MonitorClient;
pub use config::MonitorConfig;
pub use error::{MonitorError, QuoteError};
pub use monitor::StockMonitor;
pub use symbols::{parse, search, SymbolDirectory};
pub use types::{IndexKind, Quote, SymbolEntry};
