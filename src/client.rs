// src/client.rs
use crate::{config::MonitorConfig, error::MonitorError};
use reqwest::{Client, Response};

/// Thin wrapper holding the one HTTP client shared by every remote source.
#[derive(Clone, Debug)]
pub struct MonitorClient {
    client: Client,
}

impl MonitorClient {
    pub fn new(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    pub async fn get(&self, target_url: &str) -> Result<Response, reqwest::Error> {
        self.client.get(target_url).send().await
    }

    /// GET that fails on a non-success status and returns the body as text.
    pub async fn get_text(&self, target_url: &str) -> Result<String, reqwest::Error> {
        self.get(target_url)
            .await?
            .error_for_status()?
            .text()
            .await
    }
}
