//! HTTP client abstraction used by the prober

use crate::{
    error::{AppError, Result},
    models::Config,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a GET request and read the whole body
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// HTTP response with the body already read
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpResponse {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// reqwest-backed client. Name resolution goes through the system resolver,
/// which is exactly what the trigger requests need to exercise.
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    /// Create a new network client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION));

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse {
            status_code,
            body,
            elapsed: start_time.elapsed(),
        })
    }
}
