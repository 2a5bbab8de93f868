// src/monitor.rs
use crate::error::{MonitorError, QuoteError};
use crate::services::Watchlist;
use crate::source::QuoteSource;
use crate::symbols::{search, SymbolDirectory};
use crate::types::{IndexKind, Quote, WatchlistChange};
use chrono::{DateTime, Utc};
use std::io::{BufRead, Write};

const WELCOME: &str = "
----------------------------------------
  Welcome to the NASDAQ Stock Monitor!
----------------------------------------";

const MAIN_MENU: &str = "
-------------------------------------------
  Enter the number of an option below:
  1. Obtain data about a stock
  2. Search for a stock by name
  3. Search for a stock by symbol
  4. Enter Stock Monitoring Mode

  Type the word 'quit' to quit
-------------------------------------------
";

pub const QUOTE_UNAVAILABLE: &str = "Invalid stock symbol, please enter the full stock symbol.";
pub const STOCK_NOT_FOUND: &str = "Stock not found, enter a complete stock symbol.";

/// Everything the interactive program needs, assembled once at startup.
pub struct StockMonitor {
    pub directory: SymbolDirectory,
    pub quotes: Box<dyn QuoteSource + Send + Sync>,
    pub watchlist: Watchlist,
    pub start_time: DateTime<Utc>,
}

enum Flow {
    Back,
    Exit,
}

impl StockMonitor {
    pub fn new(
        directory: SymbolDirectory,
        quotes: Box<dyn QuoteSource + Send + Sync>,
        watchlist: Watchlist,
    ) -> Self {
        Self {
            directory,
            quotes,
            watchlist,
            start_time: Utc::now(),
        }
    }

    /// Upper-cases `input` and returns it when the directory knows the symbol.
    pub fn resolve_symbol(&self, input: &str) -> Option<String> {
        let symbol = input.trim().to_uppercase();
        self.directory.contains_symbol(&symbol).then_some(symbol)
    }

    /// Prefix search with the caller-side normalisation applied: symbol queries
    /// are upper-cased, name queries are used as typed.
    pub fn search(&self, query: &str, kind: IndexKind) -> Vec<String> {
        match kind {
            IndexKind::BySymbol => search(&query.to_uppercase(), kind, &self.directory),
            IndexKind::ByName => search(query, kind, &self.directory),
        }
    }

    pub async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.quotes.fetch_quote(symbol).await
    }

    /// Runs the menu until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> Result<(), MonitorError> {
        writeln!(out, "{}", WELCOME)?;

        loop {
            writeln!(out, "{}", MAIN_MENU)?;
            let Some(option) = prompt(&mut input, out, "Enter choice: ")? else {
                break;
            };

            let flow = match option.as_str() {
                "1" => self.quote_mode(&mut input, out).await?,
                "2" => self.search_mode(&mut input, out, IndexKind::ByName)?,
                "3" => self.search_mode(&mut input, out, IndexKind::BySymbol)?,
                "4" => self.monitoring_mode(&mut input, out).await?,
                other if other.eq_ignore_ascii_case("quit") => {
                    writeln!(out, "Exiting Program...")?;
                    break;
                }
                _ => {
                    writeln!(out, "\nInvalid Option. Try Again")?;
                    Flow::Back
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        Ok(())
    }

    async fn quote_mode<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<Flow, MonitorError> {
        loop {
            let Some(entry) = prompt(
                input,
                out,
                "\nEnter a stock symbol, or type 'back' to return to the main menu: ",
            )?
            else {
                return Ok(Flow::Exit);
            };
            if is_back(&entry) {
                return Ok(Flow::Back);
            }

            match self.resolve_symbol(&entry) {
                Some(symbol) => writeln!(out, "{}", render_quote(&self.quote(&symbol).await))?,
                None => writeln!(out, "{}", banner(STOCK_NOT_FOUND))?,
            }
        }
    }

    fn search_mode<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        kind: IndexKind,
    ) -> Result<Flow, MonitorError> {
        let question = match kind {
            IndexKind::ByName => {
                "\nEnter first letters of stock name, or type 'back' to return to the main menu: "
            }
            IndexKind::BySymbol => {
                "\nEnter the first part, or the complete stock symbol, or type 'back' to return to the main menu: "
            }
        };

        loop {
            let Some(query) = prompt(input, out, question)? else {
                return Ok(Flow::Exit);
            };
            if is_back(&query) {
                return Ok(Flow::Back);
            }
            writeln!(out, "{}", render_search(&self.search(&query, kind)))?;
        }
    }

    async fn monitoring_mode<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, MonitorError> {
        loop {
            writeln!(out, "\nCurrent Stock Monitoring:")?;
            for symbol in self.watchlist.symbols().await? {
                writeln!(out, "{}", render_quote(&self.quote(&symbol).await))?;
            }

            let Some(entry) = prompt(
                input,
                out,
                "\nEnter a stock symbol to be added or deleted, or type 'back' to return to the main menu: ",
            )?
            else {
                return Ok(Flow::Exit);
            };
            if is_back(&entry) {
                return Ok(Flow::Back);
            }

            let Some(symbol) = self.resolve_symbol(&entry) else {
                writeln!(out, "{}", banner(STOCK_NOT_FOUND))?;
                continue;
            };

            let message = match self.watchlist.toggle(&symbol).await? {
                WatchlistChange::Added => format!("{} added to monitoring", symbol),
                WatchlistChange::Removed => format!("{} deleted from monitoring", symbol),
            };
            writeln!(out, "{}", banner(&message))?;
        }
    }
}

/// Formats search results the way the menu prints them.
pub fn render_search(results: &[String]) -> String {
    if results.is_empty() {
        return banner("No Results Found");
    }

    let rule = "~".repeat(28);
    let mut text = format!("\n{}\nFound {} Results:", rule, results.len());
    for result in results {
        text.push('\n');
        text.push_str(result);
    }
    text.push('\n');
    text.push_str(&rule);
    text
}

/// A quote block, or the single generic failure line whatever went wrong.
pub fn render_quote(result: &Result<Quote, QuoteError>) -> String {
    match result {
        Ok(quote) => format!("\n{}", quote),
        Err(_) => format!("\n{}", QUOTE_UNAVAILABLE),
    }
}

fn banner(message: &str) -> String {
    let rule = "~".repeat(message.chars().count());
    format!("\n{}\n{}\n{}", rule, message, rule)
}

fn is_back(entry: &str) -> bool {
    entry.eq_ignore_ascii_case("back")
}

/// Writes `question`, reads one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> std::io::Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_renders_no_results_banner() {
        let text = render_search(&[]);
        assert!(text.contains("No Results Found"));
        assert!(!text.contains("Found 0"));
    }

    #[test]
    fn search_results_are_counted_and_listed() {
        let text = render_search(&["AAA - Alpha Corp".to_string(), "AAB - Alpha Two".to_string()]);
        assert!(text.contains("Found 2 Results:"));
        assert!(text.contains("AAA - Alpha Corp\nAAB - Alpha Two"));
    }

    #[test]
    fn any_quote_error_renders_generic_message() {
        let err = QuoteError::Status {
            symbol: "AAPL".into(),
            status: 404,
        };
        assert_eq!(render_quote(&Err(err)), format!("\n{}", QUOTE_UNAVAILABLE));
    }

    #[test]
    fn prompt_trims_and_detects_end_of_input() {
        let mut input = std::io::Cursor::new("  aapl \r\n");
        let mut out = Vec::new();
        assert_eq!(
            prompt(&mut input, &mut out, "? ").unwrap(),
            Some("aapl".to_string())
        );
        assert_eq!(prompt(&mut input, &mut out, "? ").unwrap(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "? ? ");
    }
}
