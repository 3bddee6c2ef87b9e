pub mod rss;

use std::future::Future;

/// One entry pulled from a feed. Read-only input to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedItem {
    pub title: String,
    pub summary: String,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// The text handed to the model for this item.
    pub fn payload(&self) -> String {
        format!("Title: {}\nSummary: {}", self.title, self.summary)
    }
}

/// The content-source collaborator.
///
/// Returns at most `limit` items in source order. An unreachable or malformed
/// feed yields an empty list rather than an error.
pub trait ContentSource: Send + Sync {
    fn fetch_recent(&self, feed: &str, limit: usize) -> impl Future<Output = Vec<FeedItem>> + Send;
}
