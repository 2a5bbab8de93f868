// src/sources/quote.rs
use crate::client::MonitorClient;
use crate::error::QuoteError;
use crate::filters::QuoteFilter;
use crate::source::QuoteSource;
use crate::types::Quote;
use async_trait::async_trait;
use log::{debug, warn};
use url::Url;

/// Scrapes quote pages of the form `{base}/{SYMBOL}?p={SYMBOL}`.
pub struct YahooQuoteSource {
    client: MonitorClient,
    base_url: String,
}

impl YahooQuoteSource {
    pub fn new(client: MonitorClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Quote page URL for `symbol`, or `None` when the base URL doesn't parse.
    pub fn quote_url(&self, symbol: &str) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().push(symbol);
        url.query_pairs_mut().clear().append_pair("p", symbol);
        Some(url)
    }
}

#[async_trait]
impl QuoteSource for YahooQuoteSource {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let url = self.quote_url(symbol).ok_or_else(|| QuoteError::InvalidUrl {
            symbol: symbol.to_string(),
            base: self.base_url.clone(),
        })?;
        debug!("Fetching quote page {}", url);

        let response = self
            .client
            .get(url.as_str())
            .await
            .map_err(|source| QuoteError::Request {
                symbol: symbol.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Quote page for {} returned {}", symbol, status);
            return Err(QuoteError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|source| QuoteError::Request {
            symbol: symbol.to_string(),
            source,
        })?;

        QuoteFilter::extract_quote(symbol, &html).map_err(|e| {
            warn!("{}", e);
            e
        })
    }
}
