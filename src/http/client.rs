use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client with built-in rate limiting and bearer authentication
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    api_token: String,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64, api_token: &str) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            api_token: api_token.to_string(),
        })
    }

    /// POST a JSON body, waiting out the rate limit first. The rate-limit
    /// clock is marked when the request finishes, success or not.
    pub async fn post_json(&mut self, url: &str, body: &Value) -> Result<reqwest::Response, reqwest::Error> {
        self.rate_limiter.wait().await;
        let result = self.send_post_request(url, body).await;
        self.rate_limiter.mark();
        result
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_post_request(&self, url: &str, body: &Value) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
    }
}
