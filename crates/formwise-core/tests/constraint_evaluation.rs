// crates/formwise-core/tests/constraint_evaluation.rs
// ============================================================================
// Module: Constraint Evaluation Unit Tests
// Description: Visibility matching, fail-open policy, and required clearing.
// Purpose: Validate constraint semantics against live field values.
// ============================================================================

//! Constraint evaluator tests covering regex matching, the fail-open policy
//! for unknown references and invalid patterns, exhaustive `and`/`or`
//! evaluation, and requiredness restoration on refresh.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use formwise_core::ConstraintEvaluator;
use formwise_core::FieldName;
use formwise_core::FormPayload;
use formwise_core::FormSession;
use formwise_core::Value;
use formwise_core::runtime::build_session;
use serde_json::json;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn session_from(value: serde_json::Value) -> FormSession {
    let payload: FormPayload =
        serde_json::from_value(value).expect("payload fixture must deserialize");
    build_session(payload).expect("session must build")
}

/// One step holding a `country` driver and a `state` field that is visible
/// and required only for US values.
fn country_state_session() -> FormSession {
    session_from(json!({
        "container": {
            "containerId": "root",
            "children": [
                {
                    "containerId": "address",
                    "children": [],
                    "fields": [
                        {"name": "country", "type": "select-one", "values": ["US"]},
                        {
                            "name": "state",
                            "type": "text",
                            "required": true,
                            "constraints": [
                                {"type": "IS_ONLY_VISIBLE_WHEN", "name": "country", "value": "^US$"}
                            ]
                        }
                    ]
                }
            ],
            "fields": []
        },
        "action": "https://forms.example/submit",
        "layout": "multistep"
    }))
}

fn set_values(session: &mut FormSession, name: &str, values: Vec<Value>) {
    let field = session.field_mut(&FieldName::new(name)).expect("fixture field");
    field.values = values;
}

// ============================================================================
// SECTION: Visibility Matching
// ============================================================================

#[test]
fn matching_pattern_keeps_field_visible_and_required() {
    let mut session = country_state_session();
    let evaluator = ConstraintEvaluator::new();

    assert!(evaluator.is_visible(&mut session, &FieldName::new("state")));
    let state = session.field(&FieldName::new("state")).expect("state field");
    assert!(state.required);
}

#[test]
fn non_matching_pattern_hides_field_and_clears_required() {
    let mut session = country_state_session();
    set_values(&mut session, "country", vec![Value::new("CA")]);
    let evaluator = ConstraintEvaluator::new();

    assert!(!evaluator.is_visible(&mut session, &FieldName::new("state")));
    let state = session.field(&FieldName::new("state")).expect("state field");
    assert!(!state.required, "a failed visibility match clears requiredness");
}

#[test]
fn field_without_visibility_constraint_is_visible() {
    let mut session = country_state_session();
    let evaluator = ConstraintEvaluator::new();
    assert!(evaluator.is_visible(&mut session, &FieldName::new("country")));
}

#[test]
fn unknown_field_name_is_visible() {
    let mut session = country_state_session();
    let evaluator = ConstraintEvaluator::new();
    assert!(evaluator.is_visible(&mut session, &FieldName::new("missing")));
}

#[test]
fn first_value_is_the_scalar_matched_against_the_pattern() {
    let mut session = country_state_session();
    set_values(&mut session, "country", vec![Value::new("CA"), Value::new("US")]);
    let evaluator = ConstraintEvaluator::new();
    assert!(!evaluator.is_visible(&mut session, &FieldName::new("state")));
}

// ============================================================================
// SECTION: Fail-Open Policy
// ============================================================================

#[test]
fn constraint_referencing_unknown_field_fails_open() {
    let mut session = session_from(json!({
        "container": {
            "containerId": "root",
            "children": [
                {
                    "containerId": "step",
                    "children": [],
                    "fields": [
                        {
                            "name": "dependent",
                            "type": "text",
                            "required": true,
                            "constraints": [
                                {"type": "IS_ONLY_VISIBLE_WHEN", "name": "gone", "value": "^x$"}
                            ]
                        }
                    ]
                }
            ],
            "fields": []
        },
        "action": "https://forms.example/submit",
        "layout": "multistep"
    }));
    let evaluator = ConstraintEvaluator::new();

    assert!(evaluator.is_visible(&mut session, &FieldName::new("dependent")));
    let field = session.field(&FieldName::new("dependent")).expect("dependent field");
    assert!(field.required, "fail-open must not clear requiredness");
}

#[test]
fn invalid_regex_fails_open() {
    let mut session = session_from(json!({
        "container": {
            "containerId": "root",
            "children": [
                {
                    "containerId": "step",
                    "children": [],
                    "fields": [
                        {"name": "driver", "type": "text", "values": ["anything"]},
                        {
                            "name": "dependent",
                            "type": "text",
                            "required": true,
                            "constraints": [
                                {"type": "IS_ONLY_VISIBLE_WHEN", "name": "driver", "value": "[unclosed"}
                            ]
                        }
                    ]
                }
            ],
            "fields": []
        },
        "action": "https://forms.example/submit",
        "layout": "multistep"
    }));
    let evaluator = ConstraintEvaluator::new();

    assert!(evaluator.is_visible(&mut session, &FieldName::new("dependent")));
}

// ============================================================================
// SECTION: Composite Constraints
// ============================================================================

fn composite_session(and: serde_json::Value, or: serde_json::Value) -> FormSession {
    session_from(json!({
        "container": {
            "containerId": "root",
            "children": [
                {
                    "containerId": "step",
                    "children": [],
                    "fields": [
                        {"name": "alpha", "type": "text", "values": ["yes"]},
                        {"name": "beta", "type": "text", "values": ["no"]},
                        {
                            "name": "dependent",
                            "type": "text",
                            "required": true,
                            "constraints": [
                                {
                                    "type": "IS_ONLY_VISIBLE_WHEN",
                                    "name": "alpha",
                                    "value": "^yes$",
                                    "and": and,
                                    "or": or
                                }
                            ]
                        }
                    ]
                }
            ],
            "fields": []
        },
        "action": "https://forms.example/submit",
        "layout": "multistep"
    }))
}

#[test]
fn and_branch_failure_hides_the_field() {
    let mut session = composite_session(
        json!([{"type": "IS_ONLY_VISIBLE_WHEN", "name": "beta", "value": "^yes$"}]),
        json!([]),
    );
    let evaluator = ConstraintEvaluator::new();

    assert!(!evaluator.is_visible(&mut session, &FieldName::new("dependent")));
    let field = session.field(&FieldName::new("dependent")).expect("dependent field");
    assert!(!field.required);
}

#[test]
fn or_branch_success_keeps_the_field_visible() {
    let mut session = composite_session(
        json!([]),
        json!([{"type": "IS_ONLY_VISIBLE_WHEN", "name": "beta", "value": "^no$"}]),
    );
    set_values(&mut session, "alpha", vec![Value::new("nope")]);
    let evaluator = ConstraintEvaluator::new();

    assert!(evaluator.is_visible(&mut session, &FieldName::new("dependent")));
}

#[test]
fn or_evaluation_is_exhaustive_so_failed_branches_still_clear() {
    // The matching `or` branch keeps the field visible, but the failed root
    // node has already requested a clear: both effects apply.
    let mut session = composite_session(
        json!([]),
        json!([{"type": "IS_ONLY_VISIBLE_WHEN", "name": "beta", "value": "^no$"}]),
    );
    set_values(&mut session, "alpha", vec![Value::new("nope")]);
    let evaluator = ConstraintEvaluator::new();

    assert!(evaluator.is_visible(&mut session, &FieldName::new("dependent")));
    let field = session.field(&FieldName::new("dependent")).expect("dependent field");
    assert!(!field.required);
}

#[test]
fn and_takes_priority_when_both_lists_are_populated() {
    // The `or` list would rescue the match, but `and` wins and fails it.
    let mut session = composite_session(
        json!([{"type": "IS_ONLY_VISIBLE_WHEN", "name": "beta", "value": "^yes$"}]),
        json!([{"type": "IS_ONLY_VISIBLE_WHEN", "name": "beta", "value": "^no$"}]),
    );
    let evaluator = ConstraintEvaluator::new();

    assert!(!evaluator.is_visible(&mut session, &FieldName::new("dependent")));
}

// ============================================================================
// SECTION: Refresh
// ============================================================================

#[test]
fn refresh_restores_declared_requiredness_when_condition_matches_again() {
    let mut session = country_state_session();
    let evaluator = ConstraintEvaluator::new();

    set_values(&mut session, "country", vec![Value::new("CA")]);
    let changed = evaluator.refresh(&mut session);
    assert_eq!(changed, vec![FieldName::new("state")]);
    assert!(
        !session.field(&FieldName::new("state")).expect("state field").required
    );

    set_values(&mut session, "country", vec![Value::new("US")]);
    let changed = evaluator.refresh(&mut session);
    assert_eq!(changed, vec![FieldName::new("state")]);
    assert!(
        session.field(&FieldName::new("state")).expect("state field").required,
        "declared requiredness returns with the matching value"
    );
}

#[test]
fn refresh_reports_nothing_when_requiredness_is_stable() {
    let mut session = country_state_session();
    let evaluator = ConstraintEvaluator::new();
    let changed = evaluator.refresh(&mut session);
    assert!(changed.is_empty());
}
