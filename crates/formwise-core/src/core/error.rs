// crates/formwise-core/src/core/error.rs
// ============================================================================
// Module: Formwise Form Errors
// Description: Structural errors raised at the payload boundary.
// Purpose: Fail form loads closed when the payload cannot become a valid tree.
// Dependencies: crate::core::identifiers, thiserror
// ============================================================================

//! ## Overview
//! Structural and parse errors are fatal for the current form load: no
//! partial tree is ever used. Constraint reference misses and validation
//! rejections are not errors and never surface through this type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::FieldName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Form construction and lookup errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The server payload cannot be parsed into a container tree.
    #[error("malformed form payload: {0}")]
    MalformedPayload(String),
    /// A field name appears more than once in the form.
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(FieldName),
    /// A step ordinal does not resolve to a step container.
    #[error("unknown step ordinal: {0}")]
    UnknownStep(u32),
    /// A field name does not resolve to a field.
    #[error("unknown field: {0}")]
    UnknownField(FieldName),
}
