// src/filters/quote_filter.rs - Pull price fields out of a Yahoo Finance quote page
use crate::error::QuoteError;
use crate::types::Quote;
use chrono::Utc;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

static PRICE_REGEX: OnceLock<Regex> = OnceLock::new();
static PREVIOUS_CLOSE_REGEX: OnceLock<Regex> = OnceLock::new();
static MARKET_CAP_REGEX: OnceLock<Regex> = OnceLock::new();
static STREAMER_SELECTOR: OnceLock<Selector> = OnceLock::new();

pub const PRICE_FIELD: &str = "regularMarketPrice";
pub const PREVIOUS_CLOSE_FIELD: &str = "regularMarketPreviousClose";
pub const MARKET_CAP_FIELD: &str = "marketCap";

pub struct QuoteFilter;

impl QuoteFilter {
    /// Builds a `Quote` from page HTML. The embedded JSON store is tried first,
    /// then the `<fin-streamer>` elements of the rendered page. Every field must
    /// be found; there are no partial quotes.
    pub fn extract_quote(symbol: &str, html: &str) -> Result<Quote, QuoteError> {
        let (price, previous_close, market_cap) = match Self::extract_from_json(html) {
            Some(fields) => fields,
            None => Self::extract_from_streamers(symbol, html)?,
        };

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            previous_close,
            market_cap,
            fetched_at: Utc::now(),
        })
    }

    fn extract_from_json(html: &str) -> Option<(String, String, String)> {
        let price_regex = PRICE_REGEX.get_or_init(|| {
            Regex::new(r#""regularMarketPrice":\{"raw":([\w.]+)"#).unwrap()
        });
        let previous_regex = PREVIOUS_CLOSE_REGEX.get_or_init(|| {
            Regex::new(r#""regularMarketPreviousClose":\{"raw":([\w.]+)"#).unwrap()
        });
        let cap_regex = MARKET_CAP_REGEX.get_or_init(|| {
            Regex::new(r#""marketCap":\{"raw":[\w.]+,"fmt":"([\w.]+)"#).unwrap()
        });

        let capture = |regex: &Regex| {
            regex
                .captures(html)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        };

        Some((
            capture(price_regex)?,
            capture(previous_regex)?,
            capture(cap_regex)?,
        ))
    }

    fn extract_from_streamers(
        symbol: &str,
        html: &str,
    ) -> Result<(String, String, String), QuoteError> {
        let selector = STREAMER_SELECTOR.get_or_init(|| {
            Selector::parse("fin-streamer[data-field]").unwrap()
        });
        let document = Html::parse_document(html);

        let find = |field: &'static str| -> Result<String, QuoteError> {
            document
                .select(selector)
                .filter(|el| el.value().attr("data-field") == Some(field))
                // Pages list streamers for related tickers too.
                .filter(|el| {
                    el.value()
                        .attr("data-symbol")
                        .map_or(true, |s| s.eq_ignore_ascii_case(symbol))
                })
                .find_map(|el| {
                    let text = el.text().collect::<String>();
                    let text = text.trim();
                    if !text.is_empty() {
                        Some(text.to_string())
                    } else {
                        el.value()
                            .attr("value")
                            .map(str::trim)
                            .filter(|v| !v.is_empty())
                            .map(str::to_string)
                    }
                })
                .ok_or_else(|| QuoteError::MissingField {
                    symbol: symbol.to_string(),
                    field,
                })
        };

        Ok((
            find(PRICE_FIELD)?,
            find(PREVIOUS_CLOSE_FIELD)?,
            find(MARKET_CAP_FIELD)?,
        ))
    }
}
