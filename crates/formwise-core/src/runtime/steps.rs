// crates/formwise-core/src/runtime/steps.rs
// ============================================================================
// Module: Formwise Step Model
// Description: Step transition functions and availability predicates.
// Purpose: Drive the 1-based step pointer with explicit, silent-no-op rules.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The step model is a set of explicit transition functions over the session
//! (no event bus): jumps, backward moves, and the predicates that decide
//! which steps render current, active, or available. Forward movement lives
//! in the wizard because it requires server-side validation first.
//!
//! In the `Multipage` layout the server declares the furthest unlocked step
//! via `active_child_index`; transitions beyond it are rejected silently, as
//! are out-of-range ordinals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Container;
use crate::core::FormSession;
use crate::core::Layout;
use crate::core::NavEvent;

// ============================================================================
// SECTION: Transitions
// ============================================================================

/// Jumps directly to a step ordinal.
///
/// Silent no-op when the ordinal is out of range or, in the `Multipage`
/// layout, beyond the server-declared unlocked step.
pub fn change_step(session: &mut FormSession, ordinal: u32) {
    if ordinal == 0 || ordinal > session.step_count() {
        return;
    }
    if session.layout == Layout::Multipage
        && let Some(unlocked) = session.root.active_child_index
        && ordinal > unlocked
    {
        return;
    }
    let from = session.active_step;
    if from == Some(ordinal) {
        return;
    }
    session.active_step = Some(ordinal);
    session.record(NavEvent::Jumped {
        from,
        to: ordinal,
    });
}

/// Moves one step back, floored at ordinal 1. No server round trip.
pub fn previous_step(session: &mut FormSession) {
    let Some(active) = session.active_step else {
        return;
    };
    let to = active.saturating_sub(1).max(1);
    if to == active {
        return;
    }
    session.active_step = Some(to);
    session.record(NavEvent::Retreated {
        from: active,
        to,
    });
}

/// Advances one step after an accepted submission, capped at the step count.
///
/// Raises the `max_step` high-water mark when new ground is reached. Returns
/// the transition when the pointer moved.
pub(crate) fn advance(session: &mut FormSession) -> Option<(u32, u32)> {
    let active = session.active_step?;
    let to = active.saturating_add(1).min(session.step_count());
    if to == active {
        return None;
    }
    session.active_step = Some(to);
    if to > session.max_step {
        session.max_step = to;
    }
    Some((active, to))
}

// ============================================================================
// SECTION: Step Predicates
// ============================================================================

/// Returns true when the container is the currently active step.
#[must_use]
pub fn is_current_step(session: &FormSession, container: &Container) -> bool {
    session.active_step == Some(container.ordinal) && container.is_step
}

/// Returns true when the container's step displays as active.
///
/// Non-step containers are redirected to the step that owns them. When the
/// form sits on its review step, every earlier step is active simultaneously
/// so the review screen shows all completed steps at once.
#[must_use]
pub fn is_active_step(session: &FormSession, container: &Container) -> bool {
    let Some(ordinal) = resolve_step_ordinal(session, container) else {
        return false;
    };
    if let (Some(review), Some(active)) = (session.root.review_child_index, session.active_step)
        && active == review
        && ordinal < active
    {
        return true;
    }
    session.active_step == Some(ordinal)
}

/// Returns true when the step is available for navigation.
///
/// In the `Multipage` layout a step beyond the server-declared unlocked step
/// is unavailable; every other layout leaves all steps available.
#[must_use]
pub fn is_available_step(session: &FormSession, container: &Container) -> bool {
    let Some(ordinal) = resolve_step_ordinal(session, container) else {
        return false;
    };
    if session.layout == Layout::Multipage
        && let Some(unlocked) = session.root.active_child_index
    {
        return ordinal <= unlocked;
    }
    true
}

/// Resolves a container to its step ordinal, redirecting non-steps to the
/// step that owns them.
fn resolve_step_ordinal(session: &FormSession, container: &Container) -> Option<u32> {
    if container.is_step {
        return Some(container.ordinal);
    }
    session.step_of_container(&container.container_id)
}
