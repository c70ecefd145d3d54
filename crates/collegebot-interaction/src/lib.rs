//! Remote collaborator integration for CollegeBot.
//!
//! Provides the HTTP agent that talks to the campus Q&A service and the
//! configuration loading that selects its endpoint and timeout.

pub mod config;
pub mod qa_api_agent;

pub use config::{BotConfig, load_config};
pub use qa_api_agent::QaApiAgent;
