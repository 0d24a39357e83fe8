// crates/formwise-core/src/lib.rs
// ============================================================================
// Module: Formwise Core Library
// Description: Form wizard engine for server-defined multi-step forms.
// Purpose: Provide the canonical data model, constraint evaluator, step model,
// validation router, and wizard controller.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! Formwise Core is the engine behind a multi-step form wizard. It builds an
//! in-memory container/field tree from a server payload, derives a navigable
//! step sequence, evaluates per-field visibility and requiredness constraints
//! against live values, and routes server validation rejections back onto the
//! fields and steps that own them.
//!
//! Invariants:
//! - Field names are unique within a form; the flattened index covers every
//!   reachable field exactly once.
//! - Constraint evaluation is a pure function of current field values and is
//!   re-run on every edit, never cached across mutations.
//! - A failed submission marks exactly the fields named by the server and
//!   navigates to the lowest-ordinal step containing an error.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::AttachmentId;
pub use core::AttachmentInfo;
pub use core::ConstraintKind;
pub use core::Container;
pub use core::ContainerId;
pub use core::Field;
pub use core::FieldEntry;
pub use core::FieldName;
pub use core::FieldOption;
pub use core::FieldType;
pub use core::FormError;
pub use core::FormPayload;
pub use core::FormSession;
pub use core::Layout;
pub use core::Message;
pub use core::NavEvent;
pub use core::NavRecord;
pub use core::PendingFile;
pub use core::TaskAction;
pub use core::TaskActionRequest;
pub use core::TaskId;
pub use core::TaskInfo;
pub use core::Value;
pub use core::VisibilityConstraint;
pub use interfaces::FetchError;
pub use interfaces::FormClient;
pub use interfaces::PartBody;
pub use interfaces::SubmitOutcome;
pub use interfaces::SubmitPart;
pub use interfaces::TaskClient;
pub use interfaces::TransportError;
pub use interfaces::ValidationItem;
pub use runtime::ConstraintEvaluator;
pub use runtime::LoadToken;
pub use runtime::NextOutcome;
pub use runtime::Wizard;
pub use runtime::WizardError;
