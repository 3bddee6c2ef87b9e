use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::config::{deserialize_option_list, deserialize_option_usize};
use crate::feeds::ContentSource;
use crate::intel::request::{IntelRequest, RequestKind};
use crate::intel::view::{Depth, ViewConfiguration};
use crate::intel::{IntelError, IntelResponse, Orchestrator};
use crate::llm::{FailureKind, LanguageModel};

pub const REGULATORY_FEEDS: &[&str] = &[
    "https://www.federalregister.gov/api/v1/documents.rss?conditions%5Bterm%5D=PBM",
    "https://www.federalregister.gov/api/v1/documents.rss?conditions%5Bterm%5D=Pharmacy+Benefit",
];
pub const MARKET_FEEDS: &[&str] = &["https://www.drugchannels.net/feeds/posts/default"];

const REFRESH_FORMAT: &str = "%A, %b %d at %I:%M %p";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default, deserialize_with = "deserialize_option_list")]
    pub regulatory_feeds: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_option_list")]
    pub market_feeds: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_option_usize")]
    pub regulatory_limit: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_option_usize")]
    pub market_limit: Option<usize>,
    /// Account-specific directives appended to every system prompt.
    pub account_instructions: Option<String>,
}

/// One feed-driven section of the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub caption: String,
    pub feeds: Vec<String>,
    pub limit: usize,
    pub kind: RequestKind,
    pub heading_prefix: String,
}

impl Tab {
    pub fn regulatory(config: &DashboardConfig) -> Self {
        Self {
            title: "Material Regulatory (TX/Fed)".to_string(),
            caption: "Focus: Bill Numbers, ERISA Risk, and TX Compliance.".to_string(),
            feeds: config
                .regulatory_feeds
                .clone()
                .unwrap_or_else(|| REGULATORY_FEEDS.iter().map(|s| s.to_string()).collect()),
            limit: config.regulatory_limit.unwrap_or(5),
            kind: RequestKind::RegulatoryDeepDive,
            heading_prefix: "DETAILED IMPACT".to_string(),
        }
    }

    pub fn market(config: &DashboardConfig) -> Self {
        Self {
            title: "Market & Competitor Deep-Dive".to_string(),
            caption: "Focus: Big 3 Margin Grabs vs. Niche PBM (Rightway) Tech Pitch.".to_string(),
            feeds: config
                .market_feeds
                .clone()
                .unwrap_or_else(|| MARKET_FEEDS.iter().map(|s| s.to_string()).collect()),
            limit: config.market_limit.unwrap_or(8),
            kind: RequestKind::MarketDynamics,
            heading_prefix: "STRATEGIC ANALYSIS".to_string(),
        }
    }
}

/// The outcome of one analysis, tied to the slot that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub heading: String,
    pub payload: String,
    pub outcome: IntelResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabReport {
    pub title: String,
    pub caption: String,
    pub slots: Vec<SlotReport>,
}

pub struct Dashboard<S, M> {
    source: S,
    orchestrator: Orchestrator<M>,
    view: ViewConfiguration,
    tabs: Vec<Tab>,
    account_instructions: Option<String>,
    last_refresh: Option<DateTime<Local>>,
}

impl<S: ContentSource, M: LanguageModel> Dashboard<S, M> {
    pub fn new(
        source: S,
        orchestrator: Orchestrator<M>,
        view: ViewConfiguration,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            source,
            orchestrator,
            view,
            tabs: vec![Tab::regulatory(config), Tab::market(config)],
            account_instructions: config
                .account_instructions
                .clone()
                .filter(|s| !s.trim().is_empty()),
            last_refresh: None,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn orchestrator(&self) -> &Orchestrator<M> {
        &self.orchestrator
    }

    pub fn view(&self) -> &ViewConfiguration {
        &self.view
    }

    pub fn set_depth(&mut self, depth: Depth) {
        self.view.depth = depth;
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.view.credential = credential.into();
    }

    pub fn last_refresh(&self) -> String {
        self.last_refresh
            .map(|at| at.format(REFRESH_FORMAT).to_string())
            .unwrap_or_else(|| "Never".to_string())
    }

    /// Pulls every tab's feeds and analyses each item in turn. A failed slot
    /// is reported in place and the sweep carries on.
    pub async fn execute_full_analysis(&mut self) -> Vec<TabReport> {
        self.last_refresh = Some(Local::now());

        let mut reports = Vec::with_capacity(self.tabs.len());
        for tab in &self.tabs {
            let mut slots = Vec::new();
            for feed in &tab.feeds {
                let items = self.source.fetch_recent(feed, tab.limit).await;
                if items.is_empty() {
                    log::info!("no items from {} for '{}'", feed, tab.title);
                }
                for item in items {
                    let payload = item.payload();
                    let request = self.request(tab.kind, payload.clone());
                    let outcome = self.orchestrator.analyze(&request, &self.view).await;
                    slots.push(SlotReport {
                        heading: format!("{}: {}", tab.heading_prefix, item.title),
                        payload,
                        outcome,
                    });
                }
            }
            reports.push(TabReport {
                title: tab.title.clone(),
                caption: tab.caption.clone(),
                slots,
            });
        }
        reports
    }

    pub async fn analyze(&self, kind: RequestKind, payload: &str) -> IntelResponse {
        let request = self.request(kind, payload.to_string());
        self.orchestrator.analyze(&request, &self.view).await
    }

    pub async fn analyze_tag(&self, tag: &str, payload: &str) -> IntelResponse {
        self.orchestrator
            .analyze_tag(tag, payload, self.account_instructions.clone(), &self.view)
            .await
    }

    pub async fn analyze_rumor(&self, rumor: &str) -> IntelResponse {
        self.analyze(RequestKind::RumorAnalysis, rumor).await
    }

    pub async fn research(&self, query: &str) -> IntelResponse {
        self.analyze(RequestKind::StrategicResearch, query).await
    }

    /// Drill-down on a slot, fed with that slot's original payload.
    pub async fn learn_more(&self, payload: &str) -> IntelResponse {
        self.analyze(RequestKind::LearnMore, payload).await
    }

    fn request(&self, kind: RequestKind, payload: String) -> IntelRequest {
        IntelRequest::new(kind, payload).with_extra_instructions(self.account_instructions.clone())
    }
}

/// Text for one slot: the model output verbatim, or an actionable message.
pub fn render_outcome(outcome: &IntelResponse) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(IntelError::MissingCredential) => {
            "🔑 Please enter an OpenAI key (PBMINTEL_OPENAI_API_KEY) to run analysis.".to_string()
        }
        Err(err) => match err.failure_kind() {
            Some(FailureKind::Quota) => format!(
                "💳 Quota exhausted: the OpenAI account is out of credit or rate limited. \
                 Check billing and usage limits, then re-run. ({})",
                err
            ),
            Some(FailureKind::Authentication) => format!(
                "🔑 The OpenAI key was rejected. Check the key and re-run. ({})",
                err
            ),
            _ => format!("❌ Error: {}", err),
        },
    }
}

pub fn render_reports(reports: &[TabReport], last_refresh: &str) -> String {
    let mut output = format!("**Data Last Refreshed:** {}\n\n", last_refresh);
    for report in reports {
        output.push_str(&format!("## {}\n\n_{}_\n\n", report.title, report.caption));
        if report.slots.is_empty() {
            output.push_str("Nothing to analyze for this tab.\n\n");
        }
        for slot in &report.slots {
            output.push_str(&format!("### {}\n\n", slot.heading));
            output.push_str(render_outcome(&slot.outcome).trim_end());
            output.push_str("\n\n");
        }
    }
    output.trim_end().to_string()
}
