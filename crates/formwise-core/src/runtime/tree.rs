// crates/formwise-core/src/runtime/tree.rs
// ============================================================================
// Module: Formwise Container Tree Building
// Description: Session construction, leaf marking, and field flattening.
// Purpose: Turn a server payload into a marked, indexed form session.
// Dependencies: crate::core, crate::runtime::router
// ============================================================================

//! ## Overview
//! Tree building classifies containers and derives the step sequence. The
//! leaf rule is asymmetric on purpose: a container whose `children` holds at
//! most one element is itself a leaf and its single child is never visited.
//! Callers rely on single-child containers rendering as one leaf screen, so
//! the rule must not be "fixed" to recurse.
//!
//! Flattening walks the tree pre-order, depth-first, indexing every field
//! exactly once and rejecting duplicate names. Both passes are idempotent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Container;
use crate::core::FieldEntry;
use crate::core::FormError;
use crate::core::FormPayload;
use crate::core::FormSession;
use crate::core::Layout;
use crate::core::NavEvent;

// ============================================================================
// SECTION: Session Construction
// ============================================================================

/// Builds a form session from a server payload.
///
/// Marks leaves and steps, flattens the field index, and reconciles the
/// payload's `data` and `validation` maps onto matching fields.
///
/// # Errors
///
/// Returns [`FormError::DuplicateFieldName`] when a field name appears more
/// than once in the tree.
pub fn build_session(payload: FormPayload) -> Result<FormSession, FormError> {
    let FormPayload {
        mut container,
        action,
        data,
        validation,
        task,
        layout,
        attachments,
    } = payload;

    snapshot_declared_required(&mut container);
    mark_leaves(&mut container);
    mark_steps(&mut container, layout);

    let index = flatten_index(&container)?;

    let step_count = container.children.iter().filter(|child| child.is_step).count();
    let has_steps = layout.is_stepped() && step_count > 0;
    let active_step = has_steps.then_some(1);
    let max_step = u32::from(has_steps);

    let mut session = FormSession {
        root: container,
        action,
        layout,
        active_step,
        max_step,
        index,
        task,
        attachments,
        pending_files: Vec::new(),
        submitting: false,
        nav_log: Vec::new(),
    };

    crate::runtime::router::apply_data(&mut session, &data);
    crate::runtime::router::apply_validation(&mut session, &validation);

    let step_count = session.step_count();
    session.record(NavEvent::Loaded {
        step_count,
    });
    Ok(session)
}

// ============================================================================
// SECTION: Leaf Marking
// ============================================================================

/// Marks leaf containers recursively.
///
/// A container is a leaf iff `children` has at most one element. In that case
/// its children are NOT visited; only containers with two or more children
/// recurse. Idempotent: repeated calls produce identical marks.
pub fn mark_leaves(container: &mut Container) {
    if container.children.len() <= 1 {
        container.leaf = true;
        return;
    }
    container.leaf = false;
    for child in &mut container.children {
        mark_leaves(child);
    }
}

// ============================================================================
// SECTION: Step Marking
// ============================================================================

/// Marks every direct child of the root as a step and assigns ordinals.
///
/// Payload-declared ordinals win; absent ordinals are assigned 1-based in
/// document order. In the `Multipage` layout a read-only step forces
/// `editable = false` on every field beneath it.
fn mark_steps(root: &mut Container, layout: Layout) {
    for (position, child) in root.children.iter_mut().enumerate() {
        child.is_step = true;
        if child.ordinal == 0 {
            child.ordinal = u32::try_from(position).unwrap_or(u32::MAX).saturating_add(1);
        }
        if layout == Layout::Multipage && child.readonly {
            force_readonly(child);
        }
    }
}

/// Forces every field under a container to be non-editable.
fn force_readonly(container: &mut Container) {
    for field in &mut container.fields {
        field.editable = false;
    }
    for child in &mut container.children {
        force_readonly(child);
    }
}

// ============================================================================
// SECTION: Field Flattening
// ============================================================================

/// Flattens the tree into a pre-order field index, rejecting duplicates.
fn flatten_index(root: &Container) -> Result<Vec<FieldEntry>, FormError> {
    let mut index = Vec::new();
    append_fields(root, None, &mut index)?;
    for child in &root.children {
        let step = child.is_step.then_some(child.ordinal);
        append_subtree(child, step, &mut index)?;
    }
    Ok(index)
}

/// Appends a container subtree to the index, pre-order, depth-first.
fn append_subtree(
    container: &Container,
    step: Option<u32>,
    index: &mut Vec<FieldEntry>,
) -> Result<(), FormError> {
    append_fields(container, step, index)?;
    for child in &container.children {
        append_subtree(child, step, index)?;
    }
    Ok(())
}

/// Appends one container's directly owned fields to the index.
fn append_fields(
    container: &Container,
    step: Option<u32>,
    index: &mut Vec<FieldEntry>,
) -> Result<(), FormError> {
    for field in &container.fields {
        if index.iter().any(|entry| entry.name == field.name) {
            return Err(FormError::DuplicateFieldName(field.name.clone()));
        }
        index.push(FieldEntry {
            name: field.name.clone(),
            step,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Declared Requiredness
// ============================================================================

/// Records the payload-declared requiredness before any evaluation clears it.
fn snapshot_declared_required(container: &mut Container) {
    for field in &mut container.fields {
        field.required_declared = field.required;
    }
    for child in &mut container.children {
        snapshot_declared_required(child);
    }
}
