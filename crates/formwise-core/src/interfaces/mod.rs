// crates/formwise-core/src/interfaces/mod.rs
// ============================================================================
// Module: Formwise Interfaces
// Description: Backend-agnostic interfaces for form transport and task actions.
// Purpose: Define the contract surfaces the wizard core needs from the outside.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the wizard core reaches the server without embedding
//! transport details. Implementations must not retry automatically and must
//! leave session state untouched on failure; the wizard recovers validation
//! rejections locally and surfaces transport failures to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ContainerId;
use crate::core::FormError;
use crate::core::FormPayload;
use crate::core::TaskAction;
use crate::core::TaskActionRequest;
use crate::core::TaskId;

// ============================================================================
// SECTION: Transport Errors
// ============================================================================

/// Transport failures on any request.
///
/// Never retried automatically; the wizard state remains unchanged and the
/// caller decides whether to retry manually.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or timeout failure.
    #[error("transport failure: {0}")]
    Network(String),
    /// Response could not be decoded.
    #[error("response decode failure: {0}")]
    Decode(String),
    /// Server answered with an unexpected status.
    #[error("unexpected http status: {0}")]
    Status(u16),
}

// ============================================================================
// SECTION: Step Submission
// ============================================================================

/// One part of a multipart step submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPart {
    /// Field name keying the part.
    pub name: String,
    /// Part body.
    pub body: PartBody,
}

/// Body of a submission part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    /// Scalar text value.
    Text(String),
    /// Binary file part.
    File {
        /// Original filename.
        filename: String,
        /// Content type, if known.
        content_type: Option<String>,
        /// File bytes.
        bytes: Vec<u8>,
    },
}

/// One validation error item returned by a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationItem {
    /// Name of the rejected field.
    pub property_name: String,
    /// Validation message for the field.
    pub message: String,
}

/// Outcome of a step submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the step.
    Accepted,
    /// Server rejected the step with validation items.
    ///
    /// A rejection body without parseable items yields an empty list, which
    /// the router treats as "mark nothing, do not advance".
    Rejected(Vec<ValidationItem>),
}

// ============================================================================
// SECTION: Form Client
// ============================================================================

/// Failure of a form fetch.
///
/// Distinguishes a transport fault from a body that arrived intact but is
/// not a form payload, so the two never conflate at the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response body cannot become a form payload.
    #[error(transparent)]
    Malformed(#[from] FormError),
}

/// Backend-agnostic form transport.
pub trait FormClient {
    /// Fetches a form payload from a resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the payload cannot be fetched
    /// and [`FetchError::Malformed`] when the body does not parse as a form.
    fn fetch_form(&self, resource: &str) -> Result<FormPayload, FetchError>;

    /// Submits step inputs to `{action}/{container_id}` as multipart form
    /// data.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure; validation rejections
    /// are a [`SubmitOutcome`], not an error.
    fn submit_step(
        &self,
        action: &str,
        container_id: &ContainerId,
        parts: &[SubmitPart],
    ) -> Result<SubmitOutcome, TransportError>;
}

// ============================================================================
// SECTION: Task Client
// ============================================================================

/// Task lifecycle action transport.
pub trait TaskClient {
    /// Performs a task lifecycle action.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the action request fails.
    fn perform(
        &self,
        task_id: &TaskId,
        action: TaskAction,
        request: &TaskActionRequest,
    ) -> Result<(), TransportError>;
}
