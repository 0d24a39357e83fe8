// crates/formwise-core/src/core/field.rs
// ============================================================================
// Module: Formwise Field Types
// Description: Field schema, values, options, and validation messages.
// Purpose: Define the canonical field model mutated by edits and routing.
// Dependencies: crate::core::{constraint, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`Field`] is a named input unit owned by exactly one container. Its
//! `values`, `messages`, `css_class`, and live `required` flag are mutated in
//! place by user edits and validation routing; everything else is immutable
//! once parsed. The whole tree is rebuilt on reload, never patched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::constraint::VisibilityConstraint;
use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Field Type
// ============================================================================

/// Closed set of field input types.
///
/// # Invariants
/// - Variants are stable for serialization; unknown types fail the payload
///   parse rather than degrading into an untyped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Date input.
    Date,
    /// Person/user picker.
    Person,
    /// File upload input.
    File,
    /// Checkbox input (submitted only when checked).
    Checkbox,
    /// Radio input (submitted only when checked).
    Radio,
    /// Single-select choice input.
    SelectOne,
    /// Read-only HTML block.
    Html,
    /// Embedded iframe block.
    Iframe,
}

impl FieldType {
    /// Returns true for types that are submitted only when a value is present.
    #[must_use]
    pub const fn is_checked_kind(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

// ============================================================================
// SECTION: Values and Messages
// ============================================================================

/// A single scalar field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    /// Creates a new value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A choice option presented by select, radio, and checkbox fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Submitted option value.
    pub value: String,
    /// Display label for the option.
    pub label: String,
}

/// A validation message attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message text.
    pub text: String,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
        }
    }
}

// ============================================================================
// SECTION: Field
// ============================================================================

/// A named input unit owned by exactly one container.
///
/// # Invariants
/// - `name` is unique within a form (enforced when the tree is built).
/// - `required` is the live flag; the evaluator only ever clears it, and a
///   refresh pass resets it from `required_declared` before re-evaluation.
/// - `values` cardinality is bounded by `max_inputs` when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name, unique within the form.
    pub name: FieldName,
    /// Field input type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Current values, in order.
    #[serde(default)]
    pub values: Vec<Value>,
    /// Choice options for select, radio, and checkbox types.
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Live requiredness flag, cleared by failed visibility constraints.
    #[serde(default)]
    pub required: bool,
    /// Requiredness as declared by the server payload.
    #[serde(default, skip_deserializing)]
    pub required_declared: bool,
    /// Whether the field accepts edits.
    #[serde(default = "default_editable")]
    pub editable: bool,
    /// Whether the field is rendered read-only.
    #[serde(default)]
    pub readonly: bool,
    /// Optional client-side validation pattern.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Minimum accepted value length.
    #[serde(default)]
    pub min_value_length: Option<u32>,
    /// Maximum accepted value length.
    #[serde(default)]
    pub max_value_length: Option<u32>,
    /// Maximum number of values the field may hold.
    #[serde(default)]
    pub max_inputs: Option<u32>,
    /// Visibility and requiredness constraints, in order.
    #[serde(default)]
    pub constraints: Vec<VisibilityConstraint>,
    /// Validation messages currently attached.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// CSS class applied by validation routing.
    #[serde(default)]
    pub css_class: Option<String>,
}

impl Field {
    /// Returns the current scalar value: the first entry, or empty when none.
    #[must_use]
    pub fn scalar_value(&self) -> &str {
        self.values.first().map_or("", Value::as_str)
    }

    /// Returns true when the field holds at least one value.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.values.iter().any(|value| !value.as_str().is_empty())
    }
}

/// Fields are editable unless the payload says otherwise.
const fn default_editable() -> bool {
    true
}
