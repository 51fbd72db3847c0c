//! The probe/report cycle: generate a token, trigger lookups, fetch results
//!
//! The trigger phase fans out [`TRIGGER_COUNT`](crate::defaults::TRIGGER_COUNT)
//! concurrent GET requests whose hostnames embed the token. Their only purpose
//! is to make the system resolver look the names up; the service records which
//! resolvers asked. Outcomes are logged and otherwise ignored, and there are no
//! retries. The fetch phase then downloads what the service observed.

pub mod token;

#[cfg(test)]
mod integration_tests;

pub use token::{Token, TokenGenerator};

use crate::{
    client::HttpClient,
    defaults::TRIGGER_COUNT,
    error::Result,
    logging::ProbeLogger,
    models::{Config, ResultRecord},
};
use futures::future::join_all;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// Runs the three phases of a leak test against one service
pub struct Prober {
    client: Arc<dyn HttpClient>,
    config: Config,
    tokens: TokenGenerator,
    logger: Arc<ProbeLogger>,
}

impl Prober {
    pub fn new(client: Arc<dyn HttpClient>, config: Config, logger: ProbeLogger) -> Self {
        Self {
            client,
            config,
            tokens: TokenGenerator::new(),
            logger: Arc::new(logger),
        }
    }

    /// Replace the entropy-seeded token source
    pub fn with_token_generator(mut self, tokens: TokenGenerator) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn logger(&self) -> &ProbeLogger {
        &self.logger
    }

    /// Draw a fresh token for a new run
    pub fn generate_token(&mut self) -> Token {
        self.tokens.generate()
    }

    /// Fire all trigger requests concurrently and wait for every one of them.
    ///
    /// Individual failures, including a panicking task, are swallowed. Returns
    /// the wall-clock time the phase took.
    pub async fn trigger(&self, token: Token) -> Duration {
        let start_time = Instant::now();
        self.logger.log_phase("trigger", token.value()).await;

        let tasks: Vec<_> = (1..=TRIGGER_COUNT)
            .map(|index| {
                let client = Arc::clone(&self.client);
                let logger = Arc::clone(&self.logger);
                let url = self.config.trigger_url(index, token.value());

                tokio::spawn(async move {
                    let request_start = Instant::now();
                    let outcome = client.get(&url).await;
                    let duration_ms = request_start.elapsed().as_secs_f64() * 1000.0;

                    match &outcome {
                        Ok(response) => {
                            logger.log_trigger(index, &url, Some(response.status_code), None, duration_ms).await;
                        }
                        Err(e) => {
                            logger.log_trigger(index, &url, None, Some(&e.to_string()), duration_ms).await;
                        }
                    }

                    outcome.is_ok()
                })
            })
            .collect();

        let outcomes = join_all(tasks).await;
        let elapsed = start_time.elapsed();

        let completed = outcomes.iter().filter(|outcome| matches!(outcome, Ok(true))).count();
        self.logger
            .log_trigger_summary(completed, outcomes.len() - completed, elapsed.as_secs_f64() * 1000.0)
            .await;

        elapsed
    }

    /// Download the records the service observed for `token`.
    ///
    /// A non-2xx status yields an empty list rather than an error. Transport
    /// and JSON decode failures are errors.
    pub async fn fetch_result(&self, token: Token) -> Result<Vec<ResultRecord>> {
        let url = self.config.result_url(token.value());
        self.logger.log_phase("fetch", token.value()).await;

        let response = self.client.get(&url).await?;
        let duration_ms = response.elapsed.as_secs_f64() * 1000.0;

        if !response.is_success() {
            self.logger.log_fetch(&url, response.status_code, 0, duration_ms).await;
            return Ok(Vec::new());
        }

        let records: Vec<ResultRecord> = serde_json::from_str(&response.body)?;
        self.logger.log_fetch(&url, response.status_code, records.len(), duration_ms).await;

        Ok(records)
    }
}
