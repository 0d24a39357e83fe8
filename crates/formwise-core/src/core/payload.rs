// crates/formwise-core/src/core/payload.rs
// ============================================================================
// Module: Formwise Form Payload
// Description: Server form-retrieval response envelope.
// Purpose: Define the payload shape consumed to build a form session.
// Dependencies: crate::core::{container, field, form, identifiers, task}, serde
// ============================================================================

//! ## Overview
//! The form payload is the JSON response of the form resource endpoint:
//! the container tree, the submission action URL, live field data, pending
//! validation messages, and task/attachment metadata. It is consumed once per
//! load; the session tree is rebuilt from scratch, never patched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::container::Container;
use crate::core::field::Message;
use crate::core::field::Value;
use crate::core::form::Layout;
use crate::core::identifiers::FieldName;
use crate::core::task::AttachmentInfo;
use crate::core::task::TaskInfo;

// ============================================================================
// SECTION: Form Payload
// ============================================================================

/// Server form-retrieval response.
///
/// # Invariants
/// - `data` and `validation` entries reference fields by name; unknown names
///   are ignored during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    /// Root container of the form tree.
    pub container: Container,
    /// Base URL for step submissions.
    pub action: String,
    /// Live field values keyed by field name.
    #[serde(default)]
    pub data: BTreeMap<FieldName, Vec<Value>>,
    /// Pending validation messages keyed by field name.
    #[serde(default)]
    pub validation: BTreeMap<FieldName, Vec<Message>>,
    /// Workflow task metadata, if the form backs a task.
    #[serde(default)]
    pub task: Option<TaskInfo>,
    /// Form layout mode.
    #[serde(default)]
    pub layout: Layout,
    /// Attachment metadata carried with the form.
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,
}
