#![allow(dead_code)]

use pbmintel::feeds::{ContentSource, FeedItem};
use pbmintel::llm::{LanguageModel, ModelError, ModelPrompt};
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub struct EnvGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env("PBMINTEL_");
    }
}

pub fn with_pbmintel_env<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> EnvGuard {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    clear_env("PBMINTEL_");
    for (k, v) in vars {
        env::set_var(k, v);
    }
    EnvGuard { _lock: guard }
}

fn clear_env(prefix: &str) {
    for (key, _) in env::vars() {
        if key.starts_with(prefix) {
            env::remove_var(key);
        }
    }
}

/// Model fake that records every call and answers with a fixed outcome.
pub struct RecordingModel {
    outcome: Result<String, ModelError>,
    calls: Mutex<Vec<(String, ModelPrompt)>>,
}

impl RecordingModel {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ModelError) -> Self {
        Self {
            outcome: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ModelPrompt)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn last_prompt(&self) -> ModelPrompt {
        self.calls()
            .last()
            .map(|(_, prompt)| prompt.clone())
            .expect("Expected at least one model call")
    }
}

impl LanguageModel for RecordingModel {
    async fn complete(&self, credential: &str, prompt: &ModelPrompt) -> Result<String, ModelError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((credential.to_string(), prompt.clone()));
        self.outcome.clone()
    }
}

/// Content source fake serving fixed items per feed.
#[derive(Default)]
pub struct StaticSource {
    feeds: HashMap<String, Vec<FeedItem>>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl StaticSource {
    pub fn with_feed(mut self, feed: &str, items: Vec<FeedItem>) -> Self {
        self.feeds.insert(feed.to_string(), items);
        self
    }

    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl ContentSource for StaticSource {
    async fn fetch_recent(&self, feed: &str, limit: usize) -> Vec<FeedItem> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((feed.to_string(), limit));
        self.feeds
            .get(feed)
            .map(|items| items.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}
