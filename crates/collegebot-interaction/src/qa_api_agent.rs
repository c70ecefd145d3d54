//! QaApiAgent - REST client for the remote campus Q&A service.
//!
//! The service is reached with a single GET request carrying the question
//! and the lowercased department as query parameters, and replies with a
//! JSON body `{ "answer"?: string }`. Every transport, status, or parse
//! failure is mapped to `BotError::Transport` so the session controller
//! can record it as an in-band conversation turn.
//!
//! Configuration priority: COLLEGEBOT_ENDPOINT > config.toml > default

use crate::config;
use async_trait::async_trait;
use collegebot_core::Department;
use collegebot_core::client::{QaClient, QaReply};
use collegebot_core::error::{BotError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str =
    "https://l2n698llce.execute-api.us-east-1.amazonaws.com/prod/GetCollegeInfo";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The JSON payload the Q&A service replies with.
#[derive(Debug, Deserialize)]
struct AnswerPayload {
    #[serde(default)]
    answer: Option<String>,
}

/// Client for the remote campus Q&A HTTP endpoint.
#[derive(Clone)]
pub struct QaApiAgent {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl QaApiAgent {
    /// Creates a new agent against the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds an agent from the environment and the config file.
    ///
    /// Priority for the endpoint:
    /// 1. `COLLEGEBOT_ENDPOINT` environment variable
    /// 2. `endpoint` in `~/.config/collegebot/config.toml`
    /// 3. Built-in default deployment URL
    pub fn try_from_config() -> Result<Self> {
        let config = config::load_config().map_err(BotError::config)?;

        let endpoint = env::var("COLLEGEBOT_ENDPOINT")
            .ok()
            .or(config.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self::new(endpoint).with_timeout(timeout))
    }

    /// Returns the endpoint this agent targets.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QaClient for QaApiAgent {
    async fn ask(&self, question: &str, department: Department) -> Result<QaReply> {
        tracing::debug!(
            "Asking Q&A service ({}) a {} question",
            self.endpoint,
            department
        );

        let department = department.query_value();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", question), ("department", department.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BotError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::transport(format!(
                "Q&A service error ({status})"
            )));
        }

        let payload: AnswerPayload = response
            .json()
            .await
            .map_err(|e| BotError::transport(format!("Failed to parse response: {e}")))?;

        Ok(QaReply {
            answer: payload.answer,
        })
    }
}
