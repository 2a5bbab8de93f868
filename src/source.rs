// src/source.rs
use crate::error::{MonitorError, QuoteError};
use crate::types::Quote;
use async_trait::async_trait;

/// Supplies the raw symbol directory listing, once per run.
#[async_trait]
pub trait DirectorySource {
    fn describe(&self) -> String;

    async fn fetch_listing(&self) -> Result<String, MonitorError>;
}

/// Looks up live price fields for one upper-cased symbol.
#[async_trait]
pub trait QuoteSource {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, QuoteError>;
}
