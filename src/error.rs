// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Symbol directory unavailable: {0}")]
    DirectoryFetch(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a quote could not be produced. The menu collapses all of these into one
/// user-facing message; the variants exist for logging and callers that care.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("request for {symbol} failed: {source}")]
    Request {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("quote page for {symbol} returned {status}")]
    Status { symbol: String, status: u16 },

    #[error("cannot build a quote URL for {symbol} from '{base}'")]
    InvalidUrl { symbol: String, base: String },

    #[error("field '{field}' not found on quote page for {symbol}")]
    MissingField { symbol: String, field: &'static str },
}
