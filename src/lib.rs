pub mod config;
pub mod dashboard;
pub mod feeds;
pub mod intel;
pub mod llm;
