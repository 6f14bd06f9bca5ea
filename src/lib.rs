//! Form validation and submission state handling
//!
//! This crate is the engine behind a three-field contact form (name, email,
//! message). It provides:
//! - Per-field validators with user-facing messages and configurable limits
//! - A controller owning field state, completion progress, and the
//!   submission state machine (idle, pending, succeeded)
//! - Serializable state snapshots a rendering layer can consume verbatim
//!
//! The crate never touches the DOM, the network, or timers. An adapter layer
//! owns event subscription and forwards raw values to [`FormController`];
//! the simulated (or real) send completes by calling
//! [`FormController::complete_submission`].
//!
//! # Examples
//!
//! ```
//! use formwork::{FieldKey, FormController, SubmissionPhase, SubmitOutcome};
//!
//! let mut form = FormController::new();
//!
//! // The user fills the form; blur validates what they typed.
//! form.on_field_input(FieldKey::Name, "Jordan Lee");
//! form.on_field_blur(FieldKey::Name, "Jordan Lee");
//! assert!(form.field_state(FieldKey::Name).is_valid());
//!
//! // Submission re-validates everything and enters the pending phase.
//! let outcome = form
//!     .on_submit("Jordan Lee", "jordan@example.com", "A long enough message.")
//!     .unwrap();
//! assert_eq!(outcome, SubmitOutcome::Accepted);
//!
//! // The external send finishes.
//! form.complete_submission().unwrap();
//! assert_eq!(form.phase(), SubmissionPhase::Succeeded);
//! ```

pub mod controller;
pub mod field;
pub mod validators;

pub use controller::{
	ControllerError, FieldEvent, FormController, FormState, SubmissionPhase, SubmitOutcome,
};
pub use field::{FieldError, FieldKey, FieldResult, FieldState};
pub use validators::{
	CharCount, EmailValidator, FieldValidators, MESSAGE_MAX_LENGTH, MESSAGE_MIN_LENGTH,
	MESSAGE_WARN_THRESHOLD, MessageValidator, NAME_MAX_LENGTH, NAME_MIN_LENGTH, NameValidator,
	ValidationReport,
};
