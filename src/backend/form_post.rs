//! Form-POST backend.
//!
//! Sends `{field}={text}` as `application/x-www-form-urlencoded` to a single
//! endpoint and reads the whole response body as plain text. Nothing in the
//! body is parsed; whatever comes back is the reply.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::backend::{BackendError, ChatBackend};
use crate::core::config::ResolvedConfig;

pub struct FormPostBackend {
    endpoint: String,
    field: String,
    strict_status: bool,
    client: reqwest::Client,
}

impl FormPostBackend {
    /// Build a backend for `endpoint`. `timeout = None` waits indefinitely.
    pub fn new(
        endpoint: String,
        field: String,
        timeout: Option<Duration>,
        strict_status: bool,
    ) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self {
            endpoint,
            field,
            strict_status,
            client,
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, BackendError> {
        Self::new(
            config.endpoint.clone(),
            config.field.clone(),
            config.timeout,
            config.strict_status,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for FormPostBackend {
    fn name(&self) -> &str {
        "form-post"
    }

    async fn send(&self, text: &str) -> Result<String, BackendError> {
        info!("POST {} ({} bytes)", self.endpoint, text.len());

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[(self.field.as_str(), text)])
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend responded with HTTP {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Body(e.to_string()))?;

        if !status.is_success() {
            if self.strict_status {
                return Err(BackendError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            warn!("HTTP {} treated as a reply ({} bytes)", status, body.len());
        }

        Ok(body)
    }
}
