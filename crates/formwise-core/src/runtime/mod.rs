// crates/formwise-core/src/runtime/mod.rs
// ============================================================================
// Module: Formwise Runtime
// Description: Tree building, constraint evaluation, step model, and wizard.
// Purpose: Execute the form wizard state machine over session state.
// Dependencies: crate::{core, interfaces}, regex
// ============================================================================

//! ## Overview
//! Runtime modules implement the wizard engine: building and marking the
//! container tree, evaluating visibility constraints, driving step
//! transitions, and routing validation rejections. All presentation surfaces
//! must call into the same engine logic to preserve the routing invariants.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod evaluator;
pub mod router;
pub mod steps;
pub mod tree;
pub mod wizard;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use evaluator::ConstraintEval;
pub use evaluator::ConstraintEvaluator;
pub use router::HAS_ERROR_CSS_CLASS;
pub use router::RoutedRejection;
pub use router::apply_data;
pub use router::apply_rejection;
pub use router::apply_validation;
pub use router::step_inputs;
pub use steps::change_step;
pub use steps::is_active_step;
pub use steps::is_available_step;
pub use steps::is_current_step;
pub use steps::previous_step;
pub use tree::build_session;
pub use tree::mark_leaves;
pub use wizard::LoadToken;
pub use wizard::NextOutcome;
pub use wizard::Wizard;
pub use wizard::WizardError;
