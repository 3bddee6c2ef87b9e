use crate::dashboard::DashboardConfig;
use crate::feeds::rss::FeedConfig;
use crate::intel::view::{Depth, ViewConfiguration, DEFAULT_SUMMARY_TOP_ITEMS};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default)]
    pub depth: Depth,
    #[serde(default, deserialize_with = "deserialize_option_usize")]
    pub summary_top_items: Option<usize>,

    #[serde(flatten)]
    pub dashboard: DashboardConfig,
    #[serde(flatten)]
    pub feeds: FeedConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::prefixed("PBMINTEL_").from_env::<AppConfig>()?)
    }

    /// The operator's starting view for this session.
    pub fn view(&self) -> ViewConfiguration {
        ViewConfiguration::new(self.depth, self.openai_api_key.clone())
            .with_summary_top_items(self.summary_top_items.unwrap_or(DEFAULT_SUMMARY_TOP_ITEMS))
    }
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

pub(crate) fn deserialize_option_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    if let Some(s) = s {
        s.trim()
            .parse::<usize>()
            .map(Some)
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}

pub(crate) fn deserialize_option_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    if let Some(s) = s {
        s.trim().parse::<u64>().map(Some).map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}

/// Comma-separated list; blank entries are dropped. Missing means `None` so
/// the caller can apply its own default.
pub(crate) fn deserialize_option_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|v| !v.trim().is_empty()).map(|v| {
        v.split(',')
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect()
    }))
}
