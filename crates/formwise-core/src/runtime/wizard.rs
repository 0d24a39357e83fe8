// crates/formwise-core/src/runtime/wizard.rs
// ============================================================================
// Module: Formwise Wizard Controller
// Description: Submission orchestration, edits, and guarded form loads.
// Purpose: Drive the wizard state machine through a form client.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The wizard controller is the single canonical execution path for wizard
//! operations. All presentation surfaces must call into these methods so the
//! routing and navigation invariants hold.
//!
//! Concurrency model: single-threaded and event-driven. Overlapping step
//! submissions are rejected by an explicit `submitting` guard, and stale
//! form-load responses are discarded via a monotonically increasing load
//! token. Transport failures leave the session untouched; the caller owns
//! notification and manual retry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ContainerId;
use crate::core::FieldName;
use crate::core::FieldType;
use crate::core::FormError;
use crate::core::FormPayload;
use crate::core::FormSession;
use crate::core::NavEvent;
use crate::core::PendingFile;
use crate::core::Value;
use crate::interfaces::FetchError;
use crate::interfaces::FormClient;
use crate::interfaces::SubmitOutcome;
use crate::interfaces::TransportError;
use crate::runtime::evaluator::ConstraintEvaluator;
use crate::runtime::router;
use crate::runtime::steps;
use crate::runtime::tree::build_session;

// ============================================================================
// SECTION: Wizard Controller
// ============================================================================

/// Wizard controller orchestrating navigation, edits, and submission.
pub struct Wizard<C> {
    /// Form transport implementation.
    client: C,
    /// Constraint evaluator applied after edits.
    evaluator: ConstraintEvaluator,
    /// Monotonic load sequence; stale responses are discarded against it.
    load_seq: u64,
}

impl<C> Wizard<C> {
    /// Creates a new wizard over a form client.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            client,
            evaluator: ConstraintEvaluator::new(),
            load_seq: 0,
        }
    }

    /// Returns the underlying client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Begins a form load and returns its ordering token.
    ///
    /// Tokens are monotonically increasing; completing a load with an older
    /// token than the newest issued one discards the response.
    pub const fn begin_load(&mut self) -> LoadToken {
        self.load_seq += 1;
        LoadToken(self.load_seq)
    }

    /// Completes a form load, building the session from the payload.
    ///
    /// Returns `Ok(None)` when a newer load has begun since the token was
    /// issued; the stale payload is dropped without touching any state.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the payload cannot become a valid tree.
    pub fn complete_load(
        &self,
        token: LoadToken,
        payload: FormPayload,
    ) -> Result<Option<FormSession>, FormError> {
        if token.0 != self.load_seq {
            return Ok(None);
        }
        build_session(payload).map(Some)
    }
}

impl<C: FormClient> Wizard<C> {
    /// Fetches and builds a form session in one blocking call.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Transport`] on fetch failure and
    /// [`WizardError::Form`] when the payload is malformed.
    pub fn load(&mut self, resource: &str) -> Result<FormSession, WizardError> {
        let token = self.begin_load();
        let payload = self.client.fetch_form(resource).map_err(|err| match err {
            FetchError::Transport(transport) => WizardError::Transport(transport),
            FetchError::Malformed(form) => WizardError::Form(form),
        })?;
        self.complete_load(token, payload)?.ok_or(WizardError::StaleLoad)
    }

    /// Validates the active step against the server and advances on success.
    ///
    /// The explicit `submitting` guard rejects overlapping calls and is
    /// released on every path. A rejection is routed locally and is not an
    /// error; a transport failure leaves the session unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::SubmissionInFlight`] when a submission is
    /// already outstanding, [`WizardError::NoActiveStep`] for step-less
    /// forms, and [`WizardError::Transport`] on network failure.
    pub fn next_step(&self, session: &mut FormSession) -> Result<NextOutcome, WizardError> {
        if session.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        let active = session.active_step.ok_or(WizardError::NoActiveStep)?;
        let container_id = session
            .step(active)
            .map(|step| step.container_id.clone())
            .ok_or(FormError::UnknownStep(active))?;
        let parts = router::step_inputs(session, active)?;

        session.submitting = true;
        let outcome = self.client.submit_step(&session.action, &container_id, &parts);
        session.submitting = false;

        match outcome? {
            SubmitOutcome::Accepted => {
                router::clear_step_markings(session, active);
                steps::advance(session).map_or(
                    Ok(NextOutcome::Accepted {
                        step: active,
                    }),
                    |(from, to)| {
                        session.record(NavEvent::Advanced {
                            from,
                            to,
                        });
                        Ok(NextOutcome::Advanced {
                            from,
                            to,
                        })
                    },
                )
            }
            SubmitOutcome::Rejected(items) => {
                let routed = router::apply_rejection(session, &items);
                session.record(NavEvent::Rejected {
                    step: routed.step.unwrap_or(active),
                    fields: routed.marked.clone(),
                });
                Ok(NextOutcome::Rejected {
                    step: routed.step,
                    fields: routed.marked,
                })
            }
        }
    }

    /// Moves one step back. No server round trip.
    pub fn previous_step(&self, session: &mut FormSession) {
        steps::previous_step(session);
    }

    /// Jumps to a step ordinal, honoring multipage unlock gating.
    pub fn change_step(&self, session: &mut FormSession, ordinal: u32) {
        steps::change_step(session, ordinal);
    }

    /// Replaces a field's values and refreshes constraint state.
    ///
    /// Returns the fields whose effective requiredness changed.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::FieldNotEditable`] for read-only fields and
    /// [`WizardError::TooManyValues`] when the value count exceeds
    /// `max_inputs`.
    pub fn set_value(
        &self,
        session: &mut FormSession,
        name: &FieldName,
        values: Vec<Value>,
    ) -> Result<Vec<FieldName>, WizardError> {
        let Some(field) = session.field_mut(name) else {
            return Err(FormError::UnknownField(name.clone()).into());
        };
        if !field.editable {
            return Err(WizardError::FieldNotEditable(name.clone()));
        }
        if let Some(max) = field.max_inputs
            && u32::try_from(values.len()).unwrap_or(u32::MAX) > max
        {
            return Err(WizardError::TooManyValues {
                field: name.clone(),
                max,
            });
        }
        field.values = values;

        let changed = self.evaluator.refresh(session);
        session.record(NavEvent::Edited {
            field: name.clone(),
            requiredness_changed: changed.clone(),
        });
        Ok(changed)
    }

    /// Stages file bytes for a file field, replacing any previous staging.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotFileField`] when the field is not a file
    /// input.
    pub fn stage_file(
        &self,
        session: &mut FormSession,
        name: &FieldName,
        filename: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<(), WizardError> {
        let Some(field) = session.field(name) else {
            return Err(FormError::UnknownField(name.clone()).into());
        };
        if field.field_type != FieldType::File {
            return Err(WizardError::NotFileField(name.clone()));
        }
        session.pending_files.retain(|pending| &pending.field != name);
        session.pending_files.push(PendingFile {
            field: name.clone(),
            filename: filename.into(),
            content_type,
            bytes,
        });
        Ok(())
    }

    /// Returns whether a field is currently visible, applying constraint side
    /// effects.
    pub fn is_visible(&self, session: &mut FormSession, name: &FieldName) -> bool {
        self.evaluator.is_visible(session, name)
    }

    /// Returns the container identifier scoping task lifecycle actions.
    #[must_use]
    pub fn task_scope<'a>(&self, session: &'a FormSession) -> &'a ContainerId {
        session.active_container_id()
    }
}

// ============================================================================
// SECTION: Load Token
// ============================================================================

/// Ordering token for one form load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome of a `next_step` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Submission accepted and the step pointer advanced.
    Advanced {
        /// Ordinal before the transition.
        from: u32,
        /// Ordinal after the transition.
        to: u32,
    },
    /// Submission accepted on the final step; the pointer stays put.
    Accepted {
        /// Ordinal of the accepted step.
        step: u32,
    },
    /// Submission rejected; errors routed onto fields.
    Rejected {
        /// Lowest-ordinal step containing an error, when one was named.
        step: Option<u32>,
        /// Fields marked invalid.
        fields: Vec<FieldName>,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Wizard execution errors.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A step submission is already outstanding.
    #[error("a step submission is already in flight")]
    SubmissionInFlight,
    /// The form has no active step to submit.
    #[error("form has no active step")]
    NoActiveStep,
    /// A newer load superseded this response.
    #[error("form load superseded by a newer request")]
    StaleLoad,
    /// The field does not accept edits.
    #[error("field is not editable: {0}")]
    FieldNotEditable(FieldName),
    /// The field is not a file input.
    #[error("field is not a file input: {0}")]
    NotFileField(FieldName),
    /// More values than the field accepts.
    #[error("field {field} accepts at most {max} values")]
    TooManyValues {
        /// Rejected field.
        field: FieldName,
        /// Declared value bound.
        max: u32,
    },
    /// Structural form error.
    #[error(transparent)]
    Form(#[from] FormError),
    /// Transport failure; session state is unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
