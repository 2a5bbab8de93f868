// src/bin/stock_monitor.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use serde_json::json;
use std::path::PathBuf;

use snm_stock_monitor::config::{DirectoryLocation, MonitorConfig};
use snm_stock_monitor::monitor::{render_quote, render_search, STOCK_NOT_FOUND};
use snm_stock_monitor::services::Watchlist;
use snm_stock_monitor::sources::{load_directory, source_for, YahooQuoteSource};
use snm_stock_monitor::symbols::search_entries;
use snm_stock_monitor::types::IndexKind;
use snm_stock_monitor::{MonitorClient, StockMonitor};

#[derive(Parser)]
#[command(name = "stock-monitor")]
#[command(about = "NASDAQ stock monitor: search the symbol directory, fetch quotes, keep a watchlist", long_about = None)]
struct Cli {
    /// Symbol directory URL (overrides NASDAQ_DIRECTORY_URL)
    #[arg(long, global = true, conflicts_with = "directory_file")]
    directory_url: Option<String>,

    /// Read the symbol directory from a local file instead of downloading it
    #[arg(long, global = true)]
    directory_file: Option<PathBuf>,

    /// Watchlist file (overrides WATCHLIST_PATH)
    #[arg(short, long, global = true)]
    watchlist: Option<PathBuf>,

    /// Quote page base URL (overrides QUOTE_BASE_URL)
    #[arg(long, global = true)]
    quote_base_url: Option<String>,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// Current price, previous close and market cap for a symbol
    Quote { symbol: String },
    /// Directory entries whose name starts with QUERY (case-sensitive)
    SearchName { query: String },
    /// Directory entries whose symbol starts with QUERY
    SearchSymbol { query: String },
    /// Show or edit the watchlist
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },
}

#[derive(Subcommand)]
enum WatchAction {
    /// Quotes for every watched symbol
    List,
    Add { symbol: String },
    Remove { symbol: String },
}

impl Cli {
    fn apply(&self, config: &mut MonitorConfig) {
        if let Some(url) = &self.directory_url {
            config.directory = DirectoryLocation::Url(url.clone());
        }
        if let Some(path) = &self.directory_file {
            config.directory = DirectoryLocation::File(path.clone());
        }
        if let Some(path) = &self.watchlist {
            config.watchlist_path = path.clone();
        }
        if let Some(base) = &self.quote_base_url {
            config.quote_base_url = base.trim_end_matches('/').to_string();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = MonitorConfig::from_env()?;
    cli.apply(&mut config);

    let client = MonitorClient::new(&config)?;
    let directory = load_directory(source_for(&config, client.clone()).as_ref())
        .await
        .context("could not load the NASDAQ symbol directory")?;
    let watchlist = Watchlist::open(&config.watchlist_path).await?;
    let quotes = YahooQuoteSource::new(client, config.quote_base_url.clone());
    let monitor = StockMonitor::new(directory, Box::new(quotes), watchlist);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            // The menu reads stdin synchronously on the runtime thread. There is
            // one user and one task; nothing else runs while it waits for input.
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            monitor.run(stdin.lock(), &mut stdout).await?;
            info!(
                "Session ended after {}s",
                (chrono::Utc::now() - monitor.start_time).num_seconds()
            );
        }
        Commands::Quote { symbol } => quote(&monitor, &symbol, cli.json).await?,
        Commands::SearchName { query } => print_search(&monitor, &query, IndexKind::ByName, cli.json)?,
        Commands::SearchSymbol { query } => {
            print_search(&monitor, &query, IndexKind::BySymbol, cli.json)?
        }
        Commands::Watch { action } => watch(&monitor, action, cli.json).await?,
    }

    Ok(())
}

async fn quote(monitor: &StockMonitor, input: &str, as_json: bool) -> Result<()> {
    let symbol = require_symbol(monitor, input);
    let result = monitor.quote(&symbol).await;
    if as_json {
        match &result {
            Ok(quote) => println!("{}", serde_json::to_string_pretty(quote)?),
            Err(e) => println!("{:#}", json!({ "symbol": symbol, "error": e.to_string() })),
        }
    } else {
        println!("{}", render_quote(&result));
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_search(monitor: &StockMonitor, query: &str, kind: IndexKind, as_json: bool) -> Result<()> {
    if as_json {
        let query = match kind {
            IndexKind::BySymbol => query.to_uppercase(),
            IndexKind::ByName => query.to_string(),
        };
        let hits: Vec<_> = search_entries(&query, kind, &monitor.directory)
            .into_iter()
            .map(|(key, value)| json!({ "key": key, "value": value }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        println!("{}", render_search(&monitor.search(query, kind)));
    }
    Ok(())
}

async fn watch(monitor: &StockMonitor, action: WatchAction, as_json: bool) -> Result<()> {
    match action {
        WatchAction::List => {
            let symbols = monitor.watchlist.symbols().await?;
            let mut quotes = Vec::with_capacity(symbols.len());
            for symbol in &symbols {
                quotes.push((symbol, monitor.quote(symbol).await));
            }

            if as_json {
                let rows: Vec<_> = quotes
                    .iter()
                    .map(|(symbol, result)| match result {
                        Ok(quote) => json!(quote),
                        Err(e) => json!({ "symbol": symbol, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("Current Stock Monitoring:");
                for (_, result) in &quotes {
                    println!("{}", render_quote(result));
                }
            }
        }
        WatchAction::Add { symbol } => {
            let symbol = require_symbol(monitor, &symbol);
            if monitor.watchlist.contains(&symbol).await? {
                println!("{} is already being monitored", symbol);
            } else {
                monitor.watchlist.add(&symbol).await?;
                println!("✅ {} added to monitoring", symbol);
            }
        }
        WatchAction::Remove { symbol } => {
            let symbol = require_symbol(monitor, &symbol);
            if monitor.watchlist.remove(&symbol).await? {
                println!("✅ {} deleted from monitoring", symbol);
            } else {
                println!("{} is not being monitored", symbol);
            }
        }
    }
    Ok(())
}

/// Upper-cased symbol known to the directory, or exit with the not-found message.
fn require_symbol(monitor: &StockMonitor, input: &str) -> String {
    match monitor.resolve_symbol(input) {
        Some(symbol) => symbol,
        None => {
            eprintln!("❌ {}", STOCK_NOT_FOUND);
            std::process::exit(1);
        }
    }
}
