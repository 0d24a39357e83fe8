// crates/formwise-core/src/runtime/router.rs
// ============================================================================
// Module: Formwise Validation Router
// Description: Step input collection and server validation error placement.
// Purpose: Build step submissions and route rejections onto fields and steps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The router owns both directions of the step-submission contract: it
//! collects the inputs of a step into multipart parts, and it maps a rejected
//! submission's `{propertyName, message}` items back onto exactly the fields
//! named, navigating the wizard to the failing step. All mutations for one
//! rejection are applied in a single synchronous pass, so a re-render never
//! observes a partially routed state.
//!
//! Invariant: after a failed submission, exactly the fields named in the
//! error payload are marked invalid, and the wizard sits on the failing
//! step, never beyond it. An empty item list marks nothing and navigates
//! nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::Container;
use crate::core::FieldEntry;
use crate::core::FieldName;
use crate::core::FieldType;
use crate::core::FormError;
use crate::core::FormSession;
use crate::core::Message;
use crate::core::Value;
use crate::interfaces::PartBody;
use crate::interfaces::SubmitPart;
use crate::interfaces::ValidationItem;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// CSS class applied to invalid fields and step breadcrumbs.
pub const HAS_ERROR_CSS_CLASS: &str = "has-error";

// ============================================================================
// SECTION: Step Input Collection
// ============================================================================

/// Collects the submission parts for one step.
///
/// A leaf step contributes its own fields; a non-leaf step contributes the
/// fields of its immediate children. File fields become binary parts from the
/// session's staged bytes (nothing when unstaged); checkbox and radio fields
/// contribute parts only when checked; every other type contributes one text
/// part per value, keyed by field name.
///
/// # Errors
///
/// Returns [`FormError::UnknownStep`] when the ordinal does not resolve.
pub fn step_inputs(session: &FormSession, ordinal: u32) -> Result<Vec<SubmitPart>, FormError> {
    let step = session.step(ordinal).ok_or(FormError::UnknownStep(ordinal))?;

    let mut parts = Vec::new();
    for container in sub_containers(step) {
        for field in &container.fields {
            match field.field_type {
                FieldType::File => {
                    if let Some(pending) = session.pending_file(&field.name) {
                        parts.push(SubmitPart {
                            name: field.name.as_str().to_string(),
                            body: PartBody::File {
                                filename: pending.filename.clone(),
                                content_type: pending.content_type.clone(),
                                bytes: pending.bytes.clone(),
                            },
                        });
                    }
                }
                FieldType::Checkbox | FieldType::Radio => {
                    if field.is_checked() {
                        append_text_parts(&mut parts, &field.name, &field.values);
                    }
                }
                _ => append_text_parts(&mut parts, &field.name, &field.values),
            }
        }
    }
    Ok(parts)
}

/// Appends one text part per value.
fn append_text_parts(parts: &mut Vec<SubmitPart>, name: &FieldName, values: &[Value]) {
    for value in values {
        parts.push(SubmitPart {
            name: name.as_str().to_string(),
            body: PartBody::Text(value.as_str().to_string()),
        });
    }
}

/// Returns the containers whose fields belong to a step: the step itself when
/// it is a leaf, otherwise its immediate children.
fn sub_containers(step: &Container) -> Vec<&Container> {
    if step.leaf {
        vec![step]
    } else {
        step.children.iter().collect()
    }
}

// ============================================================================
// SECTION: Rejection Routing
// ============================================================================

/// Result of routing one rejected submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedRejection {
    /// Lowest-ordinal step containing an error, when any named field lives
    /// under a step.
    pub step: Option<u32>,
    /// Fields marked invalid, in document order.
    pub marked: Vec<FieldName>,
}

/// Routes a rejected submission onto the fields named by the server.
///
/// Matching fields get the item's message and the error CSS class; every
/// other field has its message and class cleared, so exactly the fields named
/// in the payload end up marked. The wizard is navigated back to the lowest
/// ordinal step containing an error, never beyond it, and step breadcrumbs
/// are flagged accordingly. An empty item list is a malformed rejection:
/// nothing is marked and the step pointer is left alone.
pub fn apply_rejection(session: &mut FormSession, items: &[ValidationItem]) -> RoutedRejection {
    if items.is_empty() {
        return RoutedRejection {
            step: None,
            marked: Vec::new(),
        };
    }

    let by_name: BTreeMap<String, ValidationItem> =
        items.iter().map(|item| (item.property_name.clone(), item.clone())).collect();

    let entries = session.index.clone();
    let mut marked = Vec::new();
    let mut failing_step: Option<u32> = None;
    for entry in &entries {
        let item = by_name.get(entry.name.as_str()).cloned();
        let Some(field) = session.field_mut(&entry.name) else {
            continue;
        };
        if let Some(item) = item {
            field.messages = vec![Message::new(item.message)];
            field.css_class = Some(HAS_ERROR_CSS_CLASS.to_string());
            if let Some(step) = entry.step {
                failing_step = Some(failing_step.map_or(step, |lowest| lowest.min(step)));
            }
            marked.push(entry.name.clone());
        } else {
            field.messages.clear();
            field.css_class = None;
        }
    }

    if let Some(step) = failing_step {
        session.active_step = Some(step);
    }
    flag_breadcrumbs(session, &entries, &marked);

    RoutedRejection {
        step: failing_step,
        marked,
    }
}

/// Flags the breadcrumb of every step owning a marked field and clears the
/// rest.
fn flag_breadcrumbs(session: &mut FormSession, entries: &[FieldEntry], marked: &[FieldName]) {
    let failing_ordinals: Vec<u32> = entries
        .iter()
        .filter(|entry| marked.contains(&entry.name))
        .filter_map(|entry| entry.step)
        .collect();
    for step in session.root.children.iter_mut().filter(|child| child.is_step) {
        step.breadcrumb_css_class = failing_ordinals
            .contains(&step.ordinal)
            .then(|| HAS_ERROR_CSS_CLASS.to_string());
    }
}

/// Clears the error markings of a step after an accepted submission.
pub(crate) fn clear_step_markings(session: &mut FormSession, ordinal: u32) {
    let field_names: Vec<FieldName> = session
        .step(ordinal)
        .map(|step| {
            sub_containers(step)
                .iter()
                .flat_map(|container| container.fields.iter().map(|field| field.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    for name in &field_names {
        if let Some(field) = session.field_mut(name) {
            field.messages.clear();
            field.css_class = None;
        }
    }
    if let Some(step) = session.step_mut(ordinal) {
        step.breadcrumb_css_class = None;
    }
}

// ============================================================================
// SECTION: Payload Reconciliation
// ============================================================================

/// Applies the payload's live data map onto matching fields.
///
/// Unknown names are ignored; the server may carry values for fields pruned
/// from the current tree.
pub fn apply_data(session: &mut FormSession, data: &BTreeMap<FieldName, Vec<Value>>) {
    for (name, values) in data {
        if let Some(field) = session.field_mut(name) {
            field.values = values.clone();
        }
    }
}

/// Applies the payload's pending validation messages onto matching fields.
pub fn apply_validation(session: &mut FormSession, validation: &BTreeMap<FieldName, Vec<Message>>) {
    for (name, messages) in validation {
        if let Some(field) = session.field_mut(name) {
            field.messages = messages.clone();
            if !messages.is_empty() {
                field.css_class = Some(HAS_ERROR_CSS_CLASS.to_string());
            }
        }
    }
}
