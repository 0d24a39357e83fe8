// crates/formwise-core/src/core/container.rs
// ============================================================================
// Module: Formwise Container Tree
// Description: Structural grouping nodes of the form tree.
// Purpose: Define the nested container schema and derived step/leaf marks.
// Dependencies: crate::core::{field, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`Container`] is a structural grouping node (screen or section) owning
//! ordered children and fields. The `leaf` and `is_step` flags are derived
//! during tree marking, not parsed from the payload. The leaf rule is
//! deliberately asymmetric: a container whose `children` has at most one
//! element is itself a leaf and its single child is not visited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::field::Field;
use crate::core::identifiers::ContainerId;

// ============================================================================
// SECTION: Container
// ============================================================================

/// A node in the form's structural tree.
///
/// # Invariants
/// - `children` and `fields` preserve payload order.
/// - `ordinal` is 1-based over sibling steps once marked.
/// - Absent `children`/`fields` keys are valid and mean empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container identifier.
    pub container_id: ContainerId,
    /// Container title.
    #[serde(default)]
    pub title: Option<String>,
    /// Breadcrumb label used for step navigation.
    #[serde(default)]
    pub breadcrumb: Option<String>,
    /// Whether the container is read-only.
    #[serde(default)]
    pub readonly: bool,
    /// Step ordinal, 1-based; assigned during marking when absent.
    #[serde(default)]
    pub ordinal: u32,
    /// Child containers, in order.
    #[serde(default)]
    pub children: Vec<Container>,
    /// Fields owned directly by this container, in order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Derived: true iff `children` has at most one element.
    #[serde(default, skip_deserializing)]
    pub leaf: bool,
    /// Derived: true for top-level children of the root.
    #[serde(default, skip_deserializing)]
    pub is_step: bool,
    /// CSS class flagging an invalid step breadcrumb.
    #[serde(default)]
    pub breadcrumb_css_class: Option<String>,
    /// Server-declared furthest unlocked step index (root container only).
    #[serde(default)]
    pub active_child_index: Option<u32>,
    /// Index of the review step when the form has one (root container only).
    #[serde(default)]
    pub review_child_index: Option<u32>,
}

impl Container {
    /// Returns true when the container owns no children and no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.fields.is_empty()
    }
}
