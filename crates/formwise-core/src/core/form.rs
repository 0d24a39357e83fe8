// crates/formwise-core/src/core/form.rs
// ============================================================================
// Module: Formwise Session State
// Description: Per-load wizard session state and navigation log.
// Purpose: Capture the container tree, step pointer, field index, and the
// append-only record of wizard transitions.
// Dependencies: crate::core::{container, field, identifiers, task}, serde
// ============================================================================

//! ## Overview
//! A [`FormSession`] aggregates one form load: the marked container tree, the
//! active step pointer, the flattened field index, and passthrough metadata.
//! There is no module-level singleton; every component receives the session
//! explicitly. Wizard transitions append [`NavRecord`] entries to the session
//! log instead of broadcasting events, so a single render dispatcher can
//! consume exactly what changed.
//!
//! Invariants:
//! - Every field reachable from the root appears exactly once in `index`,
//!   keyed by its unique name.
//! - `active_step` is 1-based and `None` for the `Normal` layout.
//! - `max_step` is a high-water mark raised only on successful advancement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::container::Container;
use crate::core::field::Field;
use crate::core::identifiers::ContainerId;
use crate::core::identifiers::FieldName;
use crate::core::task::AttachmentInfo;
use crate::core::task::TaskInfo;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Form layout modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Single-screen form with no steps.
    #[default]
    Normal,
    /// Server-paced multi-page form with unlock gating.
    Multipage,
    /// Client-paced multi-step wizard.
    Multistep,
    /// Wizard with a trailing review step.
    Review,
}

impl Layout {
    /// Returns true for layouts that derive a step sequence.
    #[must_use]
    pub const fn is_stepped(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

// ============================================================================
// SECTION: Field Index
// ============================================================================

/// Flattened index entry for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Field name.
    pub name: FieldName,
    /// Ordinal of the step owning the field, when it lives under a step.
    pub step: Option<u32>,
}

/// File bytes staged for a file field ahead of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFile {
    /// Field the file belongs to.
    pub field: FieldName,
    /// Original filename.
    pub filename: String,
    /// Content type, if known.
    pub content_type: Option<String>,
    /// File bytes.
    pub bytes: Vec<u8>,
}

// ============================================================================
// SECTION: Navigation Log
// ============================================================================

/// Wizard transition events recorded on the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEvent {
    /// Session built from a fresh payload.
    Loaded {
        /// Number of derived steps.
        step_count: u32,
    },
    /// Step advanced after an accepted submission.
    Advanced {
        /// Ordinal before the transition.
        from: u32,
        /// Ordinal after the transition.
        to: u32,
    },
    /// Step moved backwards without a server round trip.
    Retreated {
        /// Ordinal before the transition.
        from: u32,
        /// Ordinal after the transition.
        to: u32,
    },
    /// Step jumped directly to an ordinal.
    Jumped {
        /// Ordinal before the transition, when one was active.
        from: Option<u32>,
        /// Ordinal after the transition.
        to: u32,
    },
    /// Submission rejected; errors routed onto fields.
    Rejected {
        /// Ordinal of the failing step.
        step: u32,
        /// Fields marked invalid by the routing pass.
        fields: Vec<FieldName>,
    },
    /// Field values edited; constraint state refreshed.
    Edited {
        /// Edited field.
        field: FieldName,
        /// Fields whose effective requiredness changed.
        requiredness_changed: Vec<FieldName>,
    },
}

/// One entry of the append-only navigation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Sequence number, starting at 1.
    pub seq: u64,
    /// Recorded event.
    pub event: NavEvent,
}

// ============================================================================
// SECTION: Form Session
// ============================================================================

/// Per-load wizard session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSession {
    /// Marked container tree root.
    pub root: Container,
    /// Base URL for step submissions.
    pub action: String,
    /// Form layout mode.
    pub layout: Layout,
    /// Active step ordinal, 1-based; `None` for the `Normal` layout.
    pub active_step: Option<u32>,
    /// High-water mark of the furthest step reached.
    pub max_step: u32,
    /// Flattened pre-order field index.
    pub index: Vec<FieldEntry>,
    /// Workflow task metadata, if any.
    pub task: Option<TaskInfo>,
    /// Attachment metadata carried with the form.
    pub attachments: Vec<AttachmentInfo>,
    /// File bytes staged for file fields.
    pub pending_files: Vec<PendingFile>,
    /// True while a step submission is in flight.
    pub submitting: bool,
    /// Append-only log of wizard transitions.
    pub nav_log: Vec<NavRecord>,
}

impl FormSession {
    /// Returns the number of derived steps.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        let count = self.root.children.iter().filter(|child| child.is_step).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Returns the step container with the given ordinal.
    #[must_use]
    pub fn step(&self, ordinal: u32) -> Option<&Container> {
        self.root.children.iter().find(|child| child.is_step && child.ordinal == ordinal)
    }

    /// Returns the step container with the given ordinal, mutably.
    pub fn step_mut(&mut self, ordinal: u32) -> Option<&mut Container> {
        self.root.children.iter_mut().find(|child| child.is_step && child.ordinal == ordinal)
    }

    /// Looks up a field anywhere in the tree by name.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&Field> {
        find_field(&self.root, name)
    }

    /// Looks up a field anywhere in the tree by name, mutably.
    pub fn field_mut(&mut self, name: &FieldName) -> Option<&mut Field> {
        find_field_mut(&mut self.root, name)
    }

    /// Returns the ordinal of the step owning a field, if any.
    #[must_use]
    pub fn field_step(&self, name: &FieldName) -> Option<u32> {
        self.index.iter().find(|entry| &entry.name == name).and_then(|entry| entry.step)
    }

    /// Returns the ordinal of the step containing a container, if any.
    #[must_use]
    pub fn step_of_container(&self, container_id: &ContainerId) -> Option<u32> {
        self.root
            .children
            .iter()
            .filter(|child| child.is_step)
            .find(|child| contains_container(child, container_id))
            .map(|child| child.ordinal)
    }

    /// Returns the container identifier scoping the current step.
    ///
    /// Falls back to the root container when no step is active, so task
    /// lifecycle actions always have a scope.
    #[must_use]
    pub fn active_container_id(&self) -> &ContainerId {
        self.active_step
            .and_then(|ordinal| self.step(ordinal))
            .map_or(&self.root.container_id, |step| &step.container_id)
    }

    /// Returns the staged file for a field, if one exists.
    #[must_use]
    pub fn pending_file(&self, name: &FieldName) -> Option<&PendingFile> {
        self.pending_files.iter().find(|pending| &pending.field == name)
    }

    /// Appends a navigation record to the session log.
    pub fn record(&mut self, event: NavEvent) {
        let seq = u64::try_from(self.nav_log.len()).unwrap_or(u64::MAX).saturating_add(1);
        self.nav_log.push(NavRecord {
            seq,
            event,
        });
    }
}

// ============================================================================
// SECTION: Tree Lookup Helpers
// ============================================================================

/// Finds a field by name in pre-order, depth-first.
fn find_field<'a>(container: &'a Container, name: &FieldName) -> Option<&'a Field> {
    if let Some(field) = container.fields.iter().find(|field| &field.name == name) {
        return Some(field);
    }
    container.children.iter().find_map(|child| find_field(child, name))
}

/// Finds a field by name in pre-order, depth-first, mutably.
fn find_field_mut<'a>(container: &'a mut Container, name: &FieldName) -> Option<&'a mut Field> {
    if container.fields.iter().any(|field| &field.name == name) {
        return container.fields.iter_mut().find(|field| &field.name == name);
    }
    container.children.iter_mut().find_map(|child| find_field_mut(child, name))
}

/// Returns true when a container or any descendant has the identifier.
fn contains_container(container: &Container, container_id: &ContainerId) -> bool {
    if &container.container_id == container_id {
        return true;
    }
    container.children.iter().any(|child| contains_container(child, container_id))
}
