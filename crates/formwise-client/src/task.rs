// crates/formwise-client/src/task.rs
// ============================================================================
// Module: Formwise HTTP Task Client
// Description: Task lifecycle actions over HTTP.
// Purpose: Implement the task transport interface against the workflow server.
// Dependencies: formwise-config, formwise-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Task lifecycle actions post a JSON request body to
//! `{tasks}/{task_id}/{segment}` under the configured base URL. The client
//! shares the form client's posture: bounded requests, no redirects, no
//! automatic retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use formwise_config::FormwiseConfig;
use formwise_core::TaskAction;
use formwise_core::TaskActionRequest;
use formwise_core::TaskClient;
use formwise_core::TaskId;
use formwise_core::TransportError;
use reqwest::blocking::Client;
use url::Url;

use crate::client::build_http_client;
use crate::client::resolve_url;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP implementation of the task transport.
pub struct HttpTaskClient {
    /// Underlying HTTP client with redirects disabled.
    client: Client,
    /// Base URL the task resource paths are resolved against.
    base: Url,
}

impl HttpTaskClient {
    /// Creates a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] when the base URL does not parse
    /// or the HTTP client cannot be built.
    pub fn new(config: &FormwiseConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.server.base_url)
            .map_err(|err| TransportError::Network(format!("invalid base url: {err}")))?;
        Ok(Self {
            client: build_http_client(config)?,
            base,
        })
    }
}

impl TaskClient for HttpTaskClient {
    fn perform(
        &self,
        task_id: &TaskId,
        action: TaskAction,
        request: &TaskActionRequest,
    ) -> Result<(), TransportError> {
        let resource = format!("tasks/{}/{}", task_id.as_str(), action.url_segment());
        let url = resolve_url(&self.base, &resource)?;
        let body = serde_json::to_vec(request)
            .map_err(|err| TransportError::Decode(err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
