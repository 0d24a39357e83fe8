// crates/formwise-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Formwise Constraint Evaluator
// Description: Visibility and requiredness constraint evaluation.
// Purpose: Decide field visibility from live sibling values, fail-open.
// Dependencies: crate::core, regex
// ============================================================================

//! ## Overview
//! Constraint evaluation is a pure function of current field values; results
//! are never cached across mutations. Unknown field references and invalid
//! patterns fail open (the condition counts as satisfied), so a stale
//! constraint can never hide a field.
//!
//! Side effect contract: a constraint whose regex does not match clears the
//! current field's live `required` flag. `and`/`or` lists are evaluated
//! exhaustively, never short-circuited, so every branch applies its clearing
//! effect. The evaluator only clears requiredness; [`ConstraintEvaluator::refresh`]
//! resets the live flag from the declared one before re-evaluating, which is
//! what restores a field's own declared requiredness when its condition
//! matches again.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;

use crate::core::ConstraintKind;
use crate::core::FieldName;
use crate::core::FormSession;
use crate::core::VisibilityConstraint;

// ============================================================================
// SECTION: Evaluation Result
// ============================================================================

/// Outcome of evaluating one constraint tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintEval {
    /// Whether the constraint tree matched.
    pub matched: bool,
    /// Whether any evaluated node failed its match and requests a clear of
    /// the current field's live `required` flag.
    pub clear_required: bool,
}

impl ConstraintEval {
    /// The satisfied outcome used for absent constraints and references.
    const SATISFIED: Self = Self {
        matched: true,
        clear_required: false,
    };
}

// ============================================================================
// SECTION: Constraint Evaluator
// ============================================================================

/// Evaluates visibility constraints against a form session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintEvaluator;

impl ConstraintEvaluator {
    /// Creates a new evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates a constraint tree against current field values. Pure.
    ///
    /// The referenced field's current scalar value (first value, empty when
    /// none) is matched against the regex built from `constraint.value`.
    /// When both `and` and `or` are populated, `and` takes priority and `or`
    /// is ignored.
    #[must_use]
    pub fn evaluate(
        &self,
        session: &FormSession,
        constraint: &VisibilityConstraint,
    ) -> ConstraintEval {
        let Some(referenced) = session.field(&constraint.name) else {
            return ConstraintEval::SATISFIED;
        };

        let matched = match Regex::new(&constraint.value) {
            Ok(pattern) => pattern.is_match(referenced.scalar_value()),
            // Fail open, same policy as an unknown reference.
            Err(_) => true,
        };

        let mut result = ConstraintEval {
            matched,
            clear_required: !matched,
        };

        if !constraint.and.is_empty() {
            for sub in &constraint.and {
                let eval = self.evaluate(session, sub);
                result.matched = result.matched && eval.matched;
                result.clear_required = result.clear_required || eval.clear_required;
            }
        } else if !constraint.or.is_empty() {
            for sub in &constraint.or {
                let eval = self.evaluate(session, sub);
                result.matched = result.matched || eval.matched;
                result.clear_required = result.clear_required || eval.clear_required;
            }
        }

        result
    }

    /// Returns whether a field is currently visible, applying the
    /// required-clearing side effect.
    ///
    /// The first `IS_ONLY_VISIBLE_WHEN` constraint decides; requiredness
    /// constraints are recognized but reserved. Fields without a visibility
    /// constraint, and unknown names, are visible.
    pub fn is_visible(&self, session: &mut FormSession, name: &FieldName) -> bool {
        let Some(field) = session.field(name) else {
            return true;
        };

        let visibility = field
            .constraints
            .iter()
            .find(|constraint| constraint.kind == ConstraintKind::IsOnlyVisibleWhen)
            .cloned();
        let Some(constraint) = visibility else {
            return true;
        };

        let eval = self.evaluate(session, &constraint);
        if eval.clear_required
            && let Some(field) = session.field_mut(name)
        {
            field.required = false;
        }
        eval.matched
    }

    /// Re-evaluates every field's constraints after a value mutation.
    ///
    /// Resets each field's live `required` flag from its declared flag, then
    /// applies the clearing side effects of a full visibility pass. Returns
    /// the fields whose effective requiredness changed.
    pub fn refresh(&self, session: &mut FormSession) -> Vec<FieldName> {
        let names: Vec<FieldName> = session.index.iter().map(|entry| entry.name.clone()).collect();

        let mut before = Vec::with_capacity(names.len());
        for name in &names {
            if let Some(field) = session.field_mut(name) {
                before.push((name.clone(), field.required));
                field.required = field.required_declared;
            }
        }

        for name in &names {
            self.is_visible(session, name);
        }

        before
            .into_iter()
            .filter(|(name, was_required)| {
                session.field(name).is_some_and(|field| field.required != *was_required)
            })
            .map(|(name, _)| name)
            .collect()
    }
}
