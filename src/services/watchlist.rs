// src/services/watchlist.rs
use crate::error::MonitorError;
use crate::types::WatchlistChange;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Symbols the user is monitoring, one per line in a plain text file.
///
/// The file is the only state; every operation reads or writes it directly.
#[derive(Debug, Clone)]
pub struct Watchlist {
    path: PathBuf,
}

impl Watchlist {
    /// Opens the watchlist at `path`, creating an empty file if none exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, MonitorError> {
        let path = path.into();
        // An existing file is never truncated.
        match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(_) => info!("📄 Created watchlist file {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All symbols in file order.
    pub async fn symbols(&self) -> Result<Vec<String>, MonitorError> {
        let content = fs::read_to_string(&self.path).await?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn contains(&self, symbol: &str) -> Result<bool, MonitorError> {
        Ok(self.symbols().await?.iter().any(|s| s == symbol))
    }

    /// Appends `symbol` as a new line. Duplicates are not checked here.
    pub async fn add(&self, symbol: &str) -> Result<(), MonitorError> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", symbol).as_bytes()).await?;
        file.flush().await?;
        info!("➕ {} added to watchlist", symbol);
        Ok(())
    }

    /// Removes the first line equal to `symbol`. Returns `false` when absent.
    pub async fn remove(&self, symbol: &str) -> Result<bool, MonitorError> {
        let mut symbols = self.symbols().await?;
        let Some(position) = symbols.iter().position(|s| s == symbol) else {
            return Ok(false);
        };
        symbols.remove(position);

        let mut content = String::new();
        for s in &symbols {
            content.push_str(s);
            content.push('\n');
        }
        fs::write(&self.path, content).await?;
        info!("➖ {} removed from watchlist", symbol);
        Ok(true)
    }

    /// Removes `symbol` if it is being watched, otherwise adds it.
    pub async fn toggle(&self, symbol: &str) -> Result<WatchlistChange, MonitorError> {
        if self.remove(symbol).await? {
            Ok(WatchlistChange::Removed)
        } else {
            self.add(symbol).await?;
            Ok(WatchlistChange::Added)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh() -> (tempfile::TempDir, Watchlist) {
        let dir = tempfile::tempdir().unwrap();
        let watchlist = Watchlist::open(dir.path().join("stockSave.txt")).await.unwrap();
        (dir, watchlist)
    }

    #[tokio::test]
    async fn open_creates_empty_file() {
        let (_dir, watchlist) = fresh().await;
        assert!(watchlist.path().exists());
        assert!(watchlist.symbols().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn open_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockSave.txt");
        std::fs::write(&path, "AAPL\nMSFT\n").unwrap();

        let watchlist = Watchlist::open(&path).await.unwrap();
        assert_eq!(watchlist.symbols().await.unwrap(), vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn add_appends_in_order() {
        let (_dir, watchlist) = fresh().await;
        watchlist.add("AAPL").await.unwrap();
        watchlist.add("MSFT").await.unwrap();

        assert_eq!(watchlist.symbols().await.unwrap(), vec!["AAPL", "MSFT"]);
        let raw = std::fs::read_to_string(watchlist.path()).unwrap();
        assert_eq!(raw, "AAPL\nMSFT\n");
    }

    #[tokio::test]
    async fn remove_drops_only_the_first_match() {
        let (_dir, watchlist) = fresh().await;
        for s in ["AAPL", "MSFT", "AAPL"] {
            watchlist.add(s).await.unwrap();
        }

        assert!(watchlist.remove("AAPL").await.unwrap());
        assert_eq!(watchlist.symbols().await.unwrap(), vec!["MSFT", "AAPL"]);
        assert!(!watchlist.remove("TSLA").await.unwrap());
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let (_dir, watchlist) = fresh().await;
        assert_eq!(watchlist.toggle("NVDA").await.unwrap(), WatchlistChange::Added);
        assert!(watchlist.contains("NVDA").await.unwrap());
        assert_eq!(watchlist.toggle("NVDA").await.unwrap(), WatchlistChange::Removed);
        assert!(!watchlist.contains("NVDA").await.unwrap());
    }

    #[tokio::test]
    async fn reopening_preserves_saved_symbols() {
        let (dir, watchlist) = fresh().await;
        watchlist.add("AAPL").await.unwrap();
        watchlist.add("NVDA").await.unwrap();

        let path = dir.path().join("stockSave.txt");
        let first = Watchlist::open(&path).await.unwrap();
        let second = Watchlist::open(&path).await.unwrap();

        assert_eq!(first.symbols().await.unwrap(), vec!["AAPL", "NVDA"]);
        assert_eq!(second.symbols().await.unwrap(), vec!["AAPL", "NVDA"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "AAPL\nNVDA\n");
    }

    #[tokio::test]
    async fn open_in_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("stockSave.txt");
        let err = Watchlist::open(path).await.unwrap_err();
        assert!(matches!(err, MonitorError::Io(_)));
    }
}
