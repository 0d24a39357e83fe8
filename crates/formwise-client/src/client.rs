// crates/formwise-client/src/client.rs
// ============================================================================
// Module: Formwise HTTP Form Client
// Description: Form fetches and multipart step submissions over HTTP.
// Purpose: Implement the form transport interface with strict limits.
// Dependencies: formwise-config, formwise-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The HTTP form client issues bounded blocking requests against the
//! configured form server. Redirects are not followed, response bodies are
//! capped, and staged uploads are checked against the configured size and
//! count bounds before any bytes leave the process. A fetched body that does
//! not parse as a form is a malformed-payload failure, never a transport
//! fault. A 4xx answer to a step submission is a validation rejection, not a
//! transport error: its items are decoded when the body parses and degrade
//! to an empty list when it does not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use formwise_config::FormwiseConfig;
use formwise_core::ContainerId;
use formwise_core::FetchError;
use formwise_core::FormClient;
use formwise_core::FormError;
use formwise_core::FormPayload;
use formwise_core::PartBody;
use formwise_core::SubmitOutcome;
use formwise_core::SubmitPart;
use formwise_core::TransportError;
use formwise_core::ValidationItem;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::multipart::Part;
use reqwest::redirect::Policy;
use serde::Deserialize;
use url::Url;

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP implementation of the form transport.
pub struct HttpFormClient {
    /// Underlying HTTP client with redirects disabled.
    client: Client,
    /// Base URL relative resources are resolved against.
    base: Url,
    /// Response body cap in bytes.
    max_body_bytes: u64,
    /// Single staged upload cap in bytes.
    max_file_bytes: u64,
    /// Cap on file parts within one submission.
    max_files: usize,
}

impl HttpFormClient {
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
            max_body_bytes: config.server.max_body_bytes,
            max_file_bytes: config.upload.max_file_bytes,
            max_files: usize::try_from(config.upload.max_files).unwrap_or(usize::MAX),
        })
    }

    /// Builds the multipart form for one step submission.
    ///
    /// File parts are checked against the configured size and count bounds
    /// before anything is sent.
    fn build_form(&self, parts: &[SubmitPart]) -> Result<Form, TransportError> {
        let file_count = parts
            .iter()
            .filter(|part| matches!(part.body, PartBody::File { .. }))
            .count();
        if file_count > self.max_files {
            return Err(TransportError::Network(format!(
                "submission carries {file_count} file parts, limit is {}",
                self.max_files
            )));
        }
        let mut form = Form::new();
        for part in parts {
            let body = match &part.body {
                PartBody::Text(text) => Part::text(text.clone()),
                PartBody::File {
                    filename,
                    content_type,
                    bytes,
                } => {
                    if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > self.max_file_bytes {
                        return Err(TransportError::Network(format!(
                            "staged file exceeds upload size limit: {filename}"
                        )));
                    }
                    let mut file_part = Part::bytes(bytes.clone()).file_name(filename.clone());
                    if let Some(content_type) = content_type {
                        file_part = file_part.mime_str(content_type).map_err(|_| {
                            TransportError::Network(format!(
                                "invalid content type for staged file: {filename}"
                            ))
                        })?;
                    }
                    file_part
                }
            };
            form = form.part(part.name.clone(), body);
        }
        Ok(form)
    }
}

impl FormClient for HttpFormClient {
    fn fetch_form(&self, resource: &str) -> Result<FormPayload, FetchError> {
        let url = resolve_url(&self.base, resource)?;
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()).into());
        }
        let body = read_limited(&mut response, self.max_body_bytes)?;
        serde_json::from_slice(&body)
            .map_err(|err| FormError::MalformedPayload(err.to_string()).into())
    }

    fn submit_step(
        &self,
        action: &str,
        container_id: &ContainerId,
        parts: &[SubmitPart],
    ) -> Result<SubmitOutcome, TransportError> {
        let resource = format!("{}/{}", action.trim_end_matches('/'), container_id.as_str());
        let url = resolve_url(&self.base, &resource)?;
        let form = self.build_form(parts)?;

        let mut response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubmitOutcome::Accepted);
        }
        if status.is_client_error() {
            let body = read_limited(&mut response, self.max_body_bytes)?;
            let items = serde_json::from_slice::<RejectionBody>(&body)
                .map(|rejection| rejection.items)
                .unwrap_or_default();
            return Ok(SubmitOutcome::Rejected(items));
        }
        Err(TransportError::Status(status.as_u16()))
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Body of a rejected step submission.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    /// Validation items naming the rejected fields.
    #[serde(default)]
    items: Vec<ValidationItem>,
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Builds the blocking HTTP client with configured timeouts and no redirects.
pub(crate) fn build_http_client(config: &FormwiseConfig) -> Result<Client, TransportError> {
    Client::builder()
        .connect_timeout(Duration::from_millis(config.server.connect_timeout_ms))
        .timeout(Duration::from_millis(config.server.request_timeout_ms))
        .redirect(Policy::none())
        .build()
        .map_err(|err| TransportError::Network(format!("http client build failed: {err}")))
}

/// Resolves a resource against the base URL; absolute URLs pass through.
pub(crate) fn resolve_url(base: &Url, resource: &str) -> Result<Url, TransportError> {
    if let Ok(absolute) = Url::parse(resource) {
        return Ok(absolute);
    }
    base.join(resource)
        .map_err(|err| TransportError::Network(format!("invalid resource url: {err}")))
}

/// Reads a response body up to a hard byte cap, failing closed beyond it.
pub(crate) fn read_limited(
    response: &mut Response,
    max_bytes: u64,
) -> Result<Vec<u8>, TransportError> {
    if let Some(expected) = response.content_length()
        && expected > max_bytes
    {
        return Err(TransportError::Decode("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|err| TransportError::Network(format!("failed to read response: {err}")))?;
    if u64::try_from(buf.len()).unwrap_or(u64::MAX) > max_bytes {
        return Err(TransportError::Decode("response exceeds size limit".to_string()));
    }
    Ok(buf)
}
