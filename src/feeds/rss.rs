use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{ContentSource, FeedItem};
use crate::config::deserialize_option_u64;

#[derive(Debug, thiserror::Error)]
pub enum RssFeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    #[error("Feed request failed (status {status}): {url}")]
    Status { status: u16, url: String },
    #[error("Malformed feed at {url}: {reason}")]
    Malformed { url: String, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FeedConfig {
    #[serde(
        rename = "feed_timeout_secs",
        default,
        deserialize_with = "deserialize_option_u64"
    )]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "feed_user_agent")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RssFeedSource {
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(config: FeedConfig) -> Result<Self, RssFeedError> {
        let timeout_secs = config.timeout_secs.unwrap_or(15);
        let user_agent = config
            .user_agent
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "pbmintel/0.1".to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("Failed to build feed HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, feed: &str, limit: usize) -> Result<Vec<FeedItem>, RssFeedError> {
        let url = Url::parse(feed).map_err(|_| RssFeedError::InvalidUrl(feed.to_string()))?;

        log::info!("fetching feed {}...", url);
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .context("Feed request failed")?;

        if !response.status().is_success() {
            return Err(RssFeedError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.context("Feed response body")?;
        let parsed = feed_rs::parser::parse(body.as_ref()).map_err(|err| RssFeedError::Malformed {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        let items = parsed
            .entries
            .into_iter()
            .take(limit)
            .map(entry_to_item)
            .collect::<Vec<_>>();
        log::info!("fetched {} items from {}", items.len(), url);
        Ok(items)
    }
}

impl ContentSource for RssFeedSource {
    async fn fetch_recent(&self, feed: &str, limit: usize) -> Vec<FeedItem> {
        match self.fetch(feed, limit).await {
            Ok(items) => items,
            Err(err) => {
                log::warn!("nothing to analyze from {}: {}", feed, err);
                Vec::new()
            }
        }
    }
}

fn entry_to_item(entry: feed_rs::model::Entry) -> FeedItem {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();
    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    FeedItem { title, summary }
}
