//! Field identity and per-field state

use serde::{Deserialize, Serialize};

/// Identifies one of the three required form fields.
///
/// The declaration order is the fixed enumeration order used everywhere a
/// "first" field matters (error focus on submit, report iteration).
///
/// # Examples
///
/// ```
/// use formwork::FieldKey;
///
/// assert_eq!(FieldKey::ALL, [FieldKey::Name, FieldKey::Email, FieldKey::Message]);
/// assert_eq!(FieldKey::Name.as_str(), "name");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
	Name,
	Email,
	Message,
}

impl FieldKey {
	/// All required fields, in enumeration order.
	pub const ALL: [FieldKey; 3] = [FieldKey::Name, FieldKey::Email, FieldKey::Message];

	/// Stable lowercase identifier, matching the serde representation.
	///
	/// Adapters can use this directly as an element id or data key.
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKey::Name => "name",
			FieldKey::Email => "email",
			FieldKey::Message => "message",
		}
	}
}

impl std::fmt::Display for FieldKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error type returned by field validators.
///
/// The `Display` output is the user-facing message; a failure always carries
/// a non-empty message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Validation(String),
}

impl FieldError {
	/// The user-facing message carried by this error.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldError;
	///
	/// let err = FieldError::Validation("Name is required".to_string());
	/// assert_eq!(err.message(), "Name is required");
	/// ```
	pub fn message(&self) -> &str {
		match self {
			FieldError::Validation(msg) => msg,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// UI state of a single field.
///
/// Every field starts [`Untouched`](FieldState::Untouched), moves to
/// [`Valid`](FieldState::Valid) or [`Invalid`](FieldState::Invalid) when a
/// validator runs, and returns to `Untouched` on form reset or after a
/// successful submission.
///
/// # Examples
///
/// ```
/// use formwork::FieldState;
///
/// let state = FieldState::Invalid("Name is required".to_string());
/// assert!(state.is_invalid());
/// assert_eq!(state.message(), Some("Name is required"));
/// assert_eq!(FieldState::default(), FieldState::Untouched);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
	#[default]
	Untouched,
	Valid,
	Invalid(String),
}

impl FieldState {
	/// Build a state from a validator verdict.
	pub fn from_verdict(verdict: &FieldResult<()>) -> Self {
		match verdict {
			Ok(()) => FieldState::Valid,
			Err(e) => FieldState::Invalid(e.message().to_string()),
		}
	}

	pub fn is_untouched(&self) -> bool {
		matches!(self, FieldState::Untouched)
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, FieldState::Valid)
	}

	pub fn is_invalid(&self) -> bool {
		matches!(self, FieldState::Invalid(_))
	}

	/// The error message, when the field is invalid.
	pub fn message(&self) -> Option<&str> {
		match self {
			FieldState::Invalid(msg) => Some(msg.as_str()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_key_order_is_stable() {
		let mut keys = vec![FieldKey::Message, FieldKey::Name, FieldKey::Email];
		keys.sort();
		assert_eq!(keys, FieldKey::ALL.to_vec());
	}

	#[test]
	fn test_field_key_serde_lowercase() {
		assert_eq!(
			serde_json::to_string(&FieldKey::Email).unwrap(),
			"\"email\""
		);
		let key: FieldKey = serde_json::from_str("\"message\"").unwrap();
		assert_eq!(key, FieldKey::Message);
	}

	#[test]
	fn test_field_state_from_verdict() {
		assert_eq!(FieldState::from_verdict(&Ok(())), FieldState::Valid);

		let verdict = Err(FieldError::Validation("Message is too short".to_string()));
		let state = FieldState::from_verdict(&verdict);
		assert_eq!(
			state,
			FieldState::Invalid("Message is too short".to_string())
		);
	}

	#[test]
	fn test_field_state_accessors() {
		assert!(FieldState::Untouched.is_untouched());
		assert!(!FieldState::Untouched.is_invalid());
		assert_eq!(FieldState::Valid.message(), None);
		assert_eq!(
			FieldState::Invalid("bad".to_string()).message(),
			Some("bad")
		);
	}
}
