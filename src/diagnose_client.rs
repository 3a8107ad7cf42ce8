use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

#[derive(Debug, Serialize)]
pub struct DiagnoseRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct DiagnoseResponse {
    pub reply: String,
}

/// Everything that can go wrong talking to the diagnosis service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to diagnosis service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("diagnosis service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode diagnosis response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends a symptom description somewhere and gets a reply back.
#[async_trait]
pub trait DiagnoseTransport: Send + Sync {
    async fn diagnose(&self, message: &str) -> Result<String, TransportError>;
}

pub struct DiagnoseClient {
    url: Url,
    client: reqwest::Client,
}

impl DiagnoseClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DiagnoseTransport for DiagnoseClient {
    async fn diagnose(&self, message: &str) -> Result<String, TransportError> {
        debug!("Sending message to diagnosis service at {}", self.url);

        let response = self
            .client
            .post(self.url.clone())
            .json(&DiagnoseRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Diagnosis request failed with status {}: {}", status, body);
            return Err(TransportError::Status { status, body });
        }

        debug!("Received response from diagnosis service: {}", body);

        let parsed: DiagnoseResponse = serde_json::from_str(&body)?;
        Ok(parsed.reply)
    }
}
