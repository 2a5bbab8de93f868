// src/sources/directory.rs
use crate::client::MonitorClient;
use crate::config::{DirectoryLocation, MonitorConfig};
use crate::error::MonitorError;
use crate::source::DirectorySource;
use crate::symbols::{parse, SymbolDirectory};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;

/// Downloads the listing from nasdaqtrader.com (or a mirror).
pub struct HttpDirectorySource {
    client: MonitorClient,
    url: String,
}

impl HttpDirectorySource {
    pub fn new(client: MonitorClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_listing(&self) -> Result<String, MonitorError> {
        self.client
            .get_text(&self.url)
            .await
            .map_err(|e| MonitorError::DirectoryFetch(format!("{}: {}", self.url, e)))
    }
}

/// Reads a previously saved listing from disk.
pub struct FileDirectorySource {
    path: PathBuf,
}

impl FileDirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DirectorySource for FileDirectorySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_listing(&self) -> Result<String, MonitorError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| MonitorError::DirectoryFetch(format!("{}: {}", self.path.display(), e)))
    }
}

/// Picks the source named by the configuration.
pub fn source_for(config: &MonitorConfig, client: MonitorClient) -> Box<dyn DirectorySource + Send + Sync> {
    match &config.directory {
        DirectoryLocation::Url(url) => Box::new(HttpDirectorySource::new(client, url.clone())),
        DirectoryLocation::File(path) => Box::new(FileDirectorySource::new(path.clone())),
    }
}

/// Fetches, parses and indexes the directory. Any fetch failure is returned as
/// `MonitorError::DirectoryFetch`; there is no retry.
pub async fn load_directory(source: &(dyn DirectorySource + Send + Sync)) -> Result<SymbolDirectory, MonitorError> {
    info!("Loading symbol directory from {}", source.describe());
    let listing = source.fetch_listing().await?;
    let directory = SymbolDirectory::build(parse(&listing));

    if directory.is_empty() {
        return Err(MonitorError::DirectoryFetch(format!(
            "{} contained no symbol records",
            source.describe()
        )));
    }

    Ok(directory)
}
