// src/filters/mod.rs
pub mod quote_filter;

pub use quote_filter::QuoteFilter;
