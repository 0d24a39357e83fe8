// crates/formwise-client/src/lib.rs
// ============================================================================
// Module: Formwise Client Library
// Description: Blocking HTTP implementations of the form transport interfaces.
// Purpose: Connect the wizard engine to a form server over HTTP.
// Dependencies: formwise-config, formwise-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! HTTP transport for the wizard engine: form fetches, multipart step
//! submissions, and task lifecycle actions, all over a blocking client with
//! redirects disabled, bounded response reads, and configured timeouts.
//! Requests are never retried automatically; failures surface to the wizard
//! with the session untouched.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod client;
mod task;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::HttpFormClient;
pub use task::HttpTaskClient;
