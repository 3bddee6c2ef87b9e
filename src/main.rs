use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use pbmintel::config::AppConfig;
use pbmintel::dashboard::{render_outcome, render_reports, Dashboard};
use pbmintel::feeds::rss::RssFeedSource;
use pbmintel::intel::view::Depth;
use pbmintel::intel::Orchestrator;
use pbmintel::llm::openai::OpenAiModel;
use std::env;

#[derive(Parser, Debug)]
#[command(name = "pbmintel")]
#[command(version, about = "On-demand PBM strategic intelligence")]
struct Cli {
    /// Override the configured depth (summary or detailed)
    #[arg(long, global = true)]
    depth: Option<Depth>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pull every feed and analyse each item
    Sweep,
    /// Analyse an on-the-street rumor or trend
    Rumor { text: String },
    /// Ask a strategic research question
    Research { query: String },
    /// Maximum-detail drill-down on a single item
    LearnMore { payload: String },
    /// Run any request kind by tag
    Analyze {
        #[arg(long)]
        kind: String,
        payload: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse the specified (or default) .env file
    let dotenv_path = env::var("PBMINTEL_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&dotenv_path);

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Reading configuration")?;

    let source = RssFeedSource::new(config.feeds.clone()).context("Building feed source")?;
    let orchestrator = Orchestrator::new(OpenAiModel::new(&config.openai_model));
    let mut dashboard = Dashboard::new(source, orchestrator, config.view(), &config.dashboard);
    if let Some(depth) = cli.depth {
        dashboard.set_depth(depth);
    }
    log::info!(
        "analysis depth: {} (summary top items: {})",
        dashboard.view().depth,
        dashboard.view().summary_top_items
    );

    let output = match cli.command.unwrap_or(Command::Sweep) {
        Command::Sweep => {
            let reports = dashboard.execute_full_analysis().await;
            render_reports(&reports, &dashboard.last_refresh())
        }
        Command::Rumor { text } => render_outcome(&dashboard.analyze_rumor(&text).await),
        Command::Research { query } => render_outcome(&dashboard.research(&query).await),
        Command::LearnMore { payload } => render_outcome(&dashboard.learn_more(&payload).await),
        Command::Analyze { kind, payload } => {
            render_outcome(&dashboard.analyze_tag(&kind, &payload).await)
        }
    };

    println!("{}", output);
    Ok(())
}
