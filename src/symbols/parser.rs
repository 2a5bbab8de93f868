// src/symbols/parser.rs

use crate::types::SymbolEntry;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

static RECORD_REGEX: OnceLock<Regex> = OnceLock::new();

/// Column titles of the vendor header row.
const HEADER_SYMBOL: &str = "Symbol";
const HEADER_NAME: &str = "Security Name";

/// Extracts `(symbol, name)` pairs from a nasdaqtrader symbol directory listing.
///
/// A record line starts with `SYMBOL|NAME`, where the symbol is a run of word
/// characters and the name is the run of word characters, spaces, commas and
/// periods at the head of the second field. Anything after that run (for example
/// `" - Common Stock"`) is dropped and trailing whitespace is trimmed.
///
/// The trim changes the name keys compared with reading the raw feed: the
/// `by_name` index holds `"Apple Inc."`, not `"Apple Inc. "`, so name lookups
/// and name searches must not carry the space that preceded the dash.
///
/// Lines that don't have that shape are skipped, as is the header row. Entries
/// come back in source order, duplicates included.
pub fn parse(raw: &str) -> Vec<SymbolEntry> {
    let record_regex = RECORD_REGEX.get_or_init(|| {
        Regex::new(r"^(\w+)\|([\w \t,.]*)").unwrap()
    });

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in raw.lines() {
        let Some(caps) = record_regex.captures(line) else {
            skipped += 1;
            continue;
        };

        let symbol = &caps[1];
        let name = caps[2].trim_end();

        if name.is_empty() || (symbol == HEADER_SYMBOL && name == HEADER_NAME) {
            skipped += 1;
            continue;
        }

        entries.push(SymbolEntry::new(symbol, name));
    }

    debug!(
        "Parsed {} directory records, skipped {} lines",
        entries.len(),
        skipped
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_records_in_order() {
        let entries = parse("AAA|Alpha Corp\nBBB|Beta Inc\n");
        assert_eq!(
            entries,
            vec![
                SymbolEntry::new("AAA", "Alpha Corp"),
                SymbolEntry::new("BBB", "Beta Inc"),
            ]
        );
    }

    #[test]
    fn header_row_is_skipped() {
        let entries = parse("Symbol|Security Name|...\nCCC|Gamma LLC\n");
        assert_eq!(entries, vec![SymbolEntry::new("CCC", "Gamma LLC")]);
    }

    #[test]
    fn vendor_listing_keeps_name_up_to_first_foreign_character() {
        let raw = "Symbol|Security Name|Market Category|Test Issue|Financial Status|Round Lot Size|ETF|NextShares\r\n\
                   AAPL|Apple Inc. - Common Stock|Q|N|N|100|N|N\r\n\
                   BRK_B|Berkshire, Hathaway Inc.|Q|N|N|100|N|N\r\n\
                   File Creation Time: 0418202621:32|||||||\r\n";
        let entries = parse(raw);
        assert_eq!(
            entries,
            vec![
                SymbolEntry::new("AAPL", "Apple Inc."),
                SymbolEntry::new("BRK_B", "Berkshire, Hathaway Inc."),
            ]
        );
    }

    #[test]
    fn malformed_lines_produce_nothing() {
        let raw = "no delimiter here\n|Missing Symbol\nEEE|\nFF-F|Dash Symbol\nGGG|-Leading dash\n\n";
        assert!(parse(raw).is_empty());
    }

    #[test]
    fn duplicates_are_kept_by_the_parser() {
        let entries = parse("DDD|First\nDDD|Second\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Second");
    }

    #[test]
    fn every_entry_has_symbol_and_name() {
        let raw = "A1|x\nB2|  \n C3|leading space\nD4|ok, fine.\n";
        for entry in parse(raw) {
            assert!(!entry.symbol.is_empty());
            assert!(!entry.name.is_empty());
        }
    }
}
