// crates/formwise-core/src/core/constraint.rs
// ============================================================================
// Module: Formwise Visibility Constraints
// Description: Predicate tree gating field visibility and requiredness.
// Purpose: Define the immutable constraint schema evaluated against live values.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`VisibilityConstraint`] is a predicate over another field's current
//! value: a regular-expression pattern plus optional `and`/`or` sub-constraint
//! lists. Constraints are immutable once parsed from the server payload.
//!
//! When both `and` and `or` are populated on one node, `and` takes priority
//! and `or` is ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Constraint Types
// ============================================================================

/// Constraint kinds recognized by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    /// Field is visible only when the predicate matches.
    IsOnlyVisibleWhen,
    /// Field is required only when the predicate matches (reserved).
    IsOnlyRequiredWhen,
}

/// A predicate over another field's current value.
///
/// # Invariants
/// - At most one of `and`/`or` is meaningful per node; `and` wins when both
///   are populated.
/// - Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConstraint {
    /// Constraint kind.
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    /// Name of the referenced field whose value is tested.
    pub name: FieldName,
    /// Regular-expression pattern matched against the referenced value.
    pub value: String,
    /// Conjunctive sub-constraints.
    #[serde(default)]
    pub and: Vec<VisibilityConstraint>,
    /// Disjunctive sub-constraints.
    #[serde(default)]
    pub or: Vec<VisibilityConstraint>,
}

impl VisibilityConstraint {
    /// Creates a leaf constraint with no sub-constraints.
    #[must_use]
    pub fn new(kind: ConstraintKind, name: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            and: Vec::new(),
            or: Vec::new(),
        }
    }

    /// Replaces the conjunctive sub-constraints.
    #[must_use]
    pub fn with_and(mut self, and: Vec<Self>) -> Self {
        self.and = and;
        self
    }

    /// Replaces the disjunctive sub-constraints.
    #[must_use]
    pub fn with_or(mut self, or: Vec<Self>) -> Self {
        self.or = or;
        self
    }
}
