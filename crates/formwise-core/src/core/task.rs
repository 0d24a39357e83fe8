// crates/formwise-core/src/core/task.rs
// ============================================================================
// Module: Formwise Task Metadata
// Description: Task lifecycle and attachment passthrough types.
// Purpose: Carry workflow task and attachment metadata alongside the form.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Task and attachment metadata pass through the wizard core untouched. The
//! core's only obligation is exposing the active container identifier so task
//! lifecycle actions can be scoped correctly by the client layer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AttachmentId;
use crate::core::identifiers::TaskId;

// ============================================================================
// SECTION: Task Metadata
// ============================================================================

/// Workflow task metadata carried with a form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current assignee, if any.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Task lifecycle status label.
    #[serde(default)]
    pub status: Option<String>,
}

/// Task lifecycle actions exposed by the workflow server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Activate a suspended task.
    Activation,
    /// Suspend an active task.
    Suspension,
    /// Cancel the task.
    Cancellation,
    /// Assign the task to a user.
    Assignment,
}

impl TaskAction {
    /// Returns the URL segment for the action endpoint.
    #[must_use]
    pub const fn url_segment(self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Suspension => "suspension",
            Self::Cancellation => "cancellation",
            Self::Assignment => "assignment",
        }
    }
}

/// Request body for a task lifecycle action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskActionRequest {
    /// Optional reason for the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Assignee for assignment actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

// ============================================================================
// SECTION: Attachment Metadata
// ============================================================================

/// Attachment metadata carried with a form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    /// Attachment identifier.
    pub attachment_id: AttachmentId,
    /// Attachment display name.
    pub name: String,
    /// Attachment content type, if known.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Attachment size in bytes, if known.
    #[serde(default)]
    pub size_bytes: Option<u64>,
}
