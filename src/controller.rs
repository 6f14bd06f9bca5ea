//! Form controller: validation policy and the submission state machine
//!
//! [`FormController`] owns every piece of mutable form state: the raw value
//! and [`FieldState`] of each field, the aggregate progress, and the
//! submission phase. An adapter layer (DOM, TUI, test harness) forwards
//! input/blur/submit events to it and renders whatever comes back; the
//! controller never registers listeners or touches presentation.
//!
//! Submission phases:
//!
//! ```text
//! Idle --on_submit(all valid)--> Pending --complete_submission--> Succeeded
//!   ^                               |                                 |
//!   +----------- reset_form --------+------------ start_over ---------+
//! ```
//!
//! `Pending` stands in for an external asynchronous send: the controller
//! ignores field events while it lasts and expects exactly one completion
//! signal, whether that comes from a timer, a network response, or a test
//! calling [`FormController::complete_submission`] directly.

use crate::field::{FieldKey, FieldState};
use crate::validators::{CharCount, FieldValidators};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
	#[default]
	Idle,
	Pending,
	Succeeded,
}

/// Result of a submit attempt that passed the re-entrancy guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitOutcome {
	/// Every field validated; the controller is now `Pending`.
	Accepted,
	/// At least one field failed; `first_invalid` is the first failing key
	/// in enumeration order, for the caller to direct focus to.
	Rejected { first_invalid: FieldKey },
}

/// What an input or blur event did to a field.
///
/// `Revalidated { changed }` carries whether the visible state actually
/// differs from before, so the presentation layer can decide whether to
/// replay an error transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
	/// A submission was pending; the event was dropped.
	Ignored,
	/// The value was recorded but validation did not run.
	Unchanged,
	/// Validation ran for this field.
	Revalidated { changed: bool },
}

/// An operation was called in a phase where it is not defined.
///
/// These are integration errors, not user-facing validation failures. The
/// controller state is left untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
	#[error("a submission is already pending")]
	SubmissionInProgress,
	#[error("no submission is pending")]
	NotPending,
	#[error("no submission has succeeded")]
	NotSucceeded,
	#[error("a submission has already succeeded; start over first")]
	AlreadySucceeded,
}

/// Aggregate state snapshot for the rendering layer.
///
/// Everything a renderer needs is here; it never has to re-derive a
/// business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
	pub fields: BTreeMap<FieldKey, FieldState>,
	pub progress_percent: u8,
	pub submission_phase: SubmissionPhase,
	pub message_chars: CharCount,
}

/// Owns per-field state and decides when validators run.
///
/// # Examples
///
/// ```
/// use formwork::{FieldKey, FormController, SubmissionPhase, SubmitOutcome};
///
/// let mut controller = FormController::new();
///
/// let outcome = controller
///     .on_submit("Jordan Lee", "jordan@example.com", "A long enough message.")
///     .unwrap();
/// assert_eq!(outcome, SubmitOutcome::Accepted);
/// assert_eq!(controller.phase(), SubmissionPhase::Pending);
///
/// controller.complete_submission().unwrap();
/// assert_eq!(controller.phase(), SubmissionPhase::Succeeded);
/// ```
#[derive(Debug)]
pub struct FormController {
	validators: FieldValidators,
	values: BTreeMap<FieldKey, String>,
	states: BTreeMap<FieldKey, FieldState>,
	phase: SubmissionPhase,
}

impl FormController {
	/// Creates a controller with the default validator set.
	pub fn new() -> Self {
		Self::with_validators(FieldValidators::new())
	}

	/// Creates a controller with a custom validator set.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldKey, FieldValidators, FormController, NameValidator};
	///
	/// let validators = FieldValidators {
	///     name: NameValidator::new().with_min_length(4),
	///     ..FieldValidators::new()
	/// };
	/// let mut controller = FormController::with_validators(validators);
	///
	/// controller.on_field_blur(FieldKey::Name, "Jo");
	/// assert!(controller.field_state(FieldKey::Name).is_invalid());
	/// ```
	pub fn with_validators(validators: FieldValidators) -> Self {
		let values = FieldKey::ALL
			.into_iter()
			.map(|key| (key, String::new()))
			.collect();
		let states = FieldKey::ALL
			.into_iter()
			.map(|key| (key, FieldState::Untouched))
			.collect();
		Self {
			validators,
			values,
			states,
			phase: SubmissionPhase::Idle,
		}
	}

	/// Records a keystroke's worth of input for `key`.
	///
	/// Progress is recomputed from the new value. The field itself is
	/// re-validated only when it is currently invalid, so a clean field is
	/// never nagged mid-typing but a flagged one clears as soon as the fix
	/// lands. Dropped entirely while a submission is pending.
	pub fn on_field_input(&mut self, key: FieldKey, raw_value: &str) -> FieldEvent {
		if self.phase == SubmissionPhase::Pending {
			return FieldEvent::Ignored;
		}

		self.values.insert(key, raw_value.to_string());

		if self.states[&key].is_invalid() {
			self.revalidate(key)
		} else {
			FieldEvent::Unchanged
		}
	}

	/// Records that `key` lost focus with `raw_value` in it.
	///
	/// Validation runs only when the trimmed value is non-empty: leaving an
	/// empty field is not an error, merely untouched. Dropped entirely while
	/// a submission is pending.
	pub fn on_field_blur(&mut self, key: FieldKey, raw_value: &str) -> FieldEvent {
		if self.phase == SubmissionPhase::Pending {
			return FieldEvent::Ignored;
		}

		self.values.insert(key, raw_value.to_string());

		if raw_value.trim().is_empty() {
			FieldEvent::Unchanged
		} else {
			self.revalidate(key)
		}
	}

	/// Validates all fields and, when they all pass, enters `Pending`.
	///
	/// Every field's state is updated from the results regardless of its
	/// trigger history; submission is the one point of full re-validation.
	/// On rejection the phase is unchanged and the outcome names the first
	/// failing key in enumeration order.
	///
	/// Calling this while a submission is pending, or after one succeeded
	/// without starting over, is an integration error and changes nothing.
	pub fn on_submit(
		&mut self,
		name: &str,
		email: &str,
		message: &str,
	) -> Result<SubmitOutcome, ControllerError> {
		match self.phase {
			SubmissionPhase::Pending => return Err(ControllerError::SubmissionInProgress),
			SubmissionPhase::Succeeded => return Err(ControllerError::AlreadySucceeded),
			SubmissionPhase::Idle => {}
		}

		self.values.insert(FieldKey::Name, name.to_string());
		self.values.insert(FieldKey::Email, email.to_string());
		self.values.insert(FieldKey::Message, message.to_string());

		let report = self.validators.validate_all(name, email, message);
		for (key, verdict) in report.iter() {
			self.states.insert(key, FieldState::from_verdict(verdict));
		}

		match report.first_invalid() {
			Some(first_invalid) => {
				debug!(field = %first_invalid, "submission rejected");
				Ok(SubmitOutcome::Rejected { first_invalid })
			}
			None => {
				self.phase = SubmissionPhase::Pending;
				debug!("submission accepted, awaiting completion");
				Ok(SubmitOutcome::Accepted)
			}
		}
	}

	/// Finishes the pending submission: `Pending` to `Succeeded`.
	///
	/// Clears every field back to untouched and progress to zero. From any
	/// other phase this is an integration error and changes nothing.
	pub fn complete_submission(&mut self) -> Result<(), ControllerError> {
		if self.phase != SubmissionPhase::Pending {
			return Err(ControllerError::NotPending);
		}

		self.phase = SubmissionPhase::Succeeded;
		self.clear_fields();
		debug!("submission completed");
		Ok(())
	}

	/// Forces the form back to its initial state from any phase.
	///
	/// Models the native form-reset event, which fires regardless of an
	/// in-flight submission.
	pub fn reset_form(&mut self) {
		self.clear_fields();
		self.phase = SubmissionPhase::Idle;
		debug!("form reset");
	}

	/// Returns from `Succeeded` to `Idle` so another submission can start.
	///
	/// From any other phase this is an integration error and changes
	/// nothing.
	pub fn start_over(&mut self) -> Result<(), ControllerError> {
		if self.phase != SubmissionPhase::Succeeded {
			return Err(ControllerError::NotSucceeded);
		}

		self.clear_fields();
		self.phase = SubmissionPhase::Idle;
		debug!("starting over");
		Ok(())
	}

	pub fn phase(&self) -> SubmissionPhase {
		self.phase
	}

	pub fn field_state(&self, key: FieldKey) -> &FieldState {
		&self.states[&key]
	}

	/// The last raw value recorded for `key`.
	pub fn value(&self, key: FieldKey) -> &str {
		self.values.get(&key).map(String::as_str).unwrap_or("")
	}

	/// Percentage of required fields with non-empty trimmed content.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldKey, FormController};
	///
	/// let mut controller = FormController::new();
	/// assert_eq!(controller.progress_percent(), 0);
	///
	/// controller.on_field_input(FieldKey::Name, "Jo");
	/// assert_eq!(controller.progress_percent(), 33);
	///
	/// controller.on_field_input(FieldKey::Email, "a@b.com");
	/// assert_eq!(controller.progress_percent(), 67);
	///
	/// controller.on_field_input(FieldKey::Message, "hello world!!");
	/// assert_eq!(controller.progress_percent(), 100);
	/// ```
	pub fn progress_percent(&self) -> u8 {
		let filled = FieldKey::ALL
			.iter()
			.filter(|key| !self.value(**key).trim().is_empty())
			.count();
		((filled as f32 / FieldKey::ALL.len() as f32) * 100.0).round() as u8
	}

	/// Live character counter for the message field.
	pub fn message_char_count(&self) -> CharCount {
		CharCount::of(self.value(FieldKey::Message))
	}

	/// Snapshot of everything the rendering layer needs.
	pub fn state(&self) -> FormState {
		FormState {
			fields: self.states.clone(),
			progress_percent: self.progress_percent(),
			submission_phase: self.phase,
			message_chars: self.message_char_count(),
		}
	}

	fn revalidate(&mut self, key: FieldKey) -> FieldEvent {
		let verdict = self.validators.validate(key, self.value(key));
		let next = FieldState::from_verdict(&verdict);
		let changed = self.states[&key] != next;
		trace!(field = %key, valid = verdict.is_ok(), changed, "field revalidated");
		self.states.insert(key, next);
		FieldEvent::Revalidated { changed }
	}

	fn clear_fields(&mut self) {
		for key in FieldKey::ALL {
			self.values.insert(key, String::new());
			self.states.insert(key, FieldState::Untouched);
		}
	}
}

impl Default for FormController {
	fn default() -> Self {
		Self::new()
	}
}
