use crate::config::settings::ApiSettings;
use crate::errors::ApiError;
use crate::http::RateLimitedClient;
use anyhow::Result;
use log::warn;
use serde_json::{Value, json};

use super::models::GqlEnvelope;

/// start.gg GraphQL client: executes query documents with rate limiting and
/// bounded retries. Carries no knowledge of any particular query.
pub struct StartGgClient {
    client: RateLimitedClient,
    endpoint: String,
    max_retries: usize,
}

impl StartGgClient {
    pub fn new(api_token: &str, settings: &ApiSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            api_token,
        )?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.to_string(),
            max_retries: settings.max_retries,
        })
    }

    /// Execute a query document with named variables, returning the `data`
    /// object of the response envelope. The final attempt's failure surfaces
    /// as the call's error.
    pub async fn execute(&mut self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let payload = json!({ "query": query, "variables": variables });

        let mut attempt = 1;
        loop {
            match self.try_execute(&payload).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    warn!("API attempt {}/{} failed: {}", attempt, self.max_retries, e);
                    if attempt == self.max_retries || !e.is_retryable() {
                        return Err(e);
                    }
                }
            }
            attempt += 1;
        }
    }

    async fn try_execute(&mut self, payload: &Value) -> Result<Value, ApiError> {
        let response = self.client.post_json(&self.endpoint, payload).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status,
                body: truncate(&body, 200),
            });
        }

        let envelope: GqlEnvelope = response.json().await?;
        Self::unwrap_envelope(envelope)
    }

    fn unwrap_envelope(envelope: GqlEnvelope) -> Result<Value, ApiError> {
        if let Some(errors) = envelope.errors {
            let messages = errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::Query(messages));
        }

        envelope.data.ok_or_else(|| {
            ApiError::Query(vec!["response contained neither data nor errors".to_string()])
        })
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let envelope = GqlEnvelope {
            data: Some(json!({ "event": { "id": 7 } })),
            errors: None,
        };

        let data = StartGgClient::unwrap_envelope(envelope).unwrap();
        assert_eq!(data["event"]["id"], 7);
    }

    #[test]
    fn test_unwrap_envelope_surfaces_server_errors() {
        let envelope = GqlEnvelope {
            data: Some(json!({})),
            errors: Some(vec![super::super::models::GqlError {
                message: "bad slug".to_string(),
            }]),
        };

        let error = StartGgClient::unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(error, ApiError::Query(messages) if messages == vec!["bad slug"]));
    }

    #[test]
    fn test_unwrap_envelope_rejects_empty_response() {
        let envelope = GqlEnvelope {
            data: None,
            errors: None,
        };

        assert!(matches!(
            StartGgClient::unwrap_envelope(envelope),
            Err(ApiError::Query(_))
        ));
    }

    #[test]
    fn test_truncate_limits_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(truncate(&body, 200).len(), 200);
        assert_eq!(truncate("short", 200), "short");
    }
}
