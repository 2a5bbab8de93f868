// src/services/mod.rs
pub mod watchlist;

pub use watchlist::Watchlist;
