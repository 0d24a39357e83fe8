// crates/formwise-core/src/core/mod.rs
// ============================================================================
// Module: Formwise Core Types
// Description: Canonical form schema and session-state structures.
// Purpose: Provide stable, serializable types for form payloads and wizard state.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types define the form container tree, fields, visibility constraints,
//! session state, and task/attachment passthrough metadata. These types are
//! the canonical source of truth for any derived presentation surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod constraint;
pub mod container;
pub mod error;
pub mod field;
pub mod form;
pub mod identifiers;
pub mod payload;
pub mod task;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use constraint::ConstraintKind;
pub use constraint::VisibilityConstraint;
pub use container::Container;
pub use error::FormError;
pub use field::Field;
pub use field::FieldOption;
pub use field::FieldType;
pub use field::Message;
pub use field::Value;
pub use form::FieldEntry;
pub use form::FormSession;
pub use form::Layout;
pub use form::NavEvent;
pub use form::NavRecord;
pub use form::PendingFile;
pub use identifiers::AttachmentId;
pub use identifiers::ContainerId;
pub use identifiers::FieldName;
pub use identifiers::TaskId;
pub use payload::FormPayload;
pub use task::AttachmentInfo;
pub use task::TaskAction;
pub use task::TaskActionRequest;
pub use task::TaskInfo;
