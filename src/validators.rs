//! Field validators for the contact form
//!
//! One validator per field plus an aggregate that runs all three and
//! collects the verdicts into a [`ValidationReport`]. Validators hold no
//! mutable state and never panic on user input; failures are returned as
//! [`FieldError`] values whose `Display` is the user-facing message.

use crate::field::{FieldError, FieldKey, FieldResult};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Minimum length of a trimmed name, in characters.
pub const NAME_MIN_LENGTH: usize = 2;
/// Maximum length of a trimmed name, in characters.
pub const NAME_MAX_LENGTH: usize = 80;
/// Minimum length of a trimmed message, in characters.
pub const MESSAGE_MIN_LENGTH: usize = 10;
/// Maximum length of a trimmed message, in characters.
pub const MESSAGE_MAX_LENGTH: usize = 500;
/// Character count above which the message counter reports `warn`.
pub const MESSAGE_WARN_THRESHOLD: usize = 450;

// Email shape: local-part@domain with at least one dot in the domain.
// Deliverability is not checked here.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// Human-name character set: letters (any script) plus combining marks,
// spaces, periods, apostrophes, and hyphens. Must start with a letter.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[\p{L}][\p{L}\p{M} .'-]*$").expect("NAME_REGEX: invalid regex pattern")
});

/// Validates the name field: required, length bounds, name-like characters.
///
/// # Examples
///
/// ```
/// use formwork::NameValidator;
///
/// let validator = NameValidator::new();
/// assert!(validator.validate("Jordan Lee").is_ok());
/// assert!(validator.validate("").is_err());
/// assert!(validator.validate("J").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NameValidator {
	min_length: usize,
	max_length: usize,
}

impl NameValidator {
	/// Creates a new `NameValidator` with the default length bounds.
	pub fn new() -> Self {
		Self {
			min_length: NAME_MIN_LENGTH,
			max_length: NAME_MAX_LENGTH,
		}
	}

	/// Sets the minimum length (in characters, after trimming).
	///
	/// # Examples
	///
	/// ```
	/// use formwork::NameValidator;
	///
	/// let validator = NameValidator::new().with_min_length(4);
	/// assert!(validator.validate("Jo").is_err());
	/// assert!(validator.validate("Jodi").is_ok());
	/// ```
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = min_length;
		self
	}

	/// Sets the maximum length (in characters, after trimming).
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	/// Validates a raw name value.
	///
	/// The value is trimmed before any rule runs. Surrounding whitespace
	/// never affects the verdict.
	pub fn validate(&self, value: &str) -> FieldResult<()> {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			return Err(FieldError::Validation("Name is required".to_string()));
		}

		let length = trimmed.chars().count();
		if length < self.min_length {
			return Err(FieldError::Validation(format!(
				"Name must be at least {} characters",
				self.min_length
			)));
		}
		if length > self.max_length {
			return Err(FieldError::Validation(format!(
				"Name must be at most {} characters",
				self.max_length
			)));
		}

		if NAME_REGEX.is_match(trimmed) {
			Ok(())
		} else {
			Err(FieldError::Validation(
				"Name contains invalid characters".to_string(),
			))
		}
	}
}

impl Default for NameValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates the email field against a standard email shape.
///
/// The shape is `local-part@domain` with at least one dot in the domain.
///
/// # Examples
///
/// ```
/// use formwork::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("jordan@example.com").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("a@b").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator {
	/// Optional custom message for the shape failure
	message: Option<String>,
}

impl EmailValidator {
	/// Creates a new `EmailValidator` with the default message.
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom message for the shape failure.
	///
	/// The required-field message is fixed.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::EmailValidator;
	///
	/// let validator = EmailValidator::new().with_message("That does not look like an email");
	/// let err = validator.validate("nope").unwrap_err();
	/// assert_eq!(err.message(), "That does not look like an email");
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Validates a raw email value.
	pub fn validate(&self, value: &str) -> FieldResult<()> {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			return Err(FieldError::Validation("Email is required".to_string()));
		}

		if EMAIL_REGEX.is_match(trimmed) {
			Ok(())
		} else {
			let msg = self
				.message
				.as_deref()
				.unwrap_or("Enter a valid email address");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates the message field: required plus length bounds.
///
/// # Examples
///
/// ```
/// use formwork::MessageValidator;
///
/// let validator = MessageValidator::new();
/// assert!(validator.validate("This is long enough.").is_ok());
/// assert_eq!(
///     validator.validate("short").unwrap_err().message(),
///     "Message is too short"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MessageValidator {
	min_length: usize,
	max_length: usize,
}

impl MessageValidator {
	/// Creates a new `MessageValidator` with the default length bounds.
	pub fn new() -> Self {
		Self {
			min_length: MESSAGE_MIN_LENGTH,
			max_length: MESSAGE_MAX_LENGTH,
		}
	}

	/// Sets the minimum length (in characters, after trimming).
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = min_length;
		self
	}

	/// Sets the maximum length (in characters, after trimming).
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	/// Validates a raw message value.
	pub fn validate(&self, value: &str) -> FieldResult<()> {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			return Err(FieldError::Validation("Message is required".to_string()));
		}

		let length = trimmed.chars().count();
		if length < self.min_length {
			return Err(FieldError::Validation("Message is too short".to_string()));
		}
		if length > self.max_length {
			return Err(FieldError::Validation("Message is too long".to_string()));
		}

		Ok(())
	}
}

impl Default for MessageValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// One validator per required field.
///
/// # Examples
///
/// ```
/// use formwork::{FieldKey, FieldValidators};
///
/// let validators = FieldValidators::new();
/// assert!(validators.validate(FieldKey::Email, "a@b.com").is_ok());
///
/// let report = validators.validate_all("Jordan Lee", "jordan@example.com", "A proper message.");
/// assert!(report.all_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldValidators {
	pub name: NameValidator,
	pub email: EmailValidator,
	pub message: MessageValidator,
}

impl FieldValidators {
	/// Creates the default validator set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Validates a single field's raw value.
	pub fn validate(&self, key: FieldKey, value: &str) -> FieldResult<()> {
		match key {
			FieldKey::Name => self.name.validate(value),
			FieldKey::Email => self.email.validate(value),
			FieldKey::Message => self.message.validate(value),
		}
	}

	/// Runs all three validators and collects the verdicts.
	pub fn validate_all(&self, name: &str, email: &str, message: &str) -> ValidationReport {
		let mut results = BTreeMap::new();
		results.insert(FieldKey::Name, self.name.validate(name));
		results.insert(FieldKey::Email, self.email.validate(email));
		results.insert(FieldKey::Message, self.message.validate(message));
		ValidationReport { results }
	}
}

/// Verdicts for every required field, produced by
/// [`FieldValidators::validate_all`].
///
/// # Examples
///
/// ```
/// use formwork::{FieldKey, FieldValidators};
///
/// let report = FieldValidators::new().validate_all("", "a@b.com", "hello world!!");
/// assert!(!report.all_valid());
/// assert_eq!(report.first_invalid(), Some(FieldKey::Name));
/// assert_eq!(report.message(FieldKey::Name), Some("Name is required"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
	results: BTreeMap<FieldKey, FieldResult<()>>,
}

impl ValidationReport {
	/// True when every field passed.
	pub fn all_valid(&self) -> bool {
		self.results.values().all(|r| r.is_ok())
	}

	/// The first failing field in enumeration order, if any.
	pub fn first_invalid(&self) -> Option<FieldKey> {
		FieldKey::ALL
			.into_iter()
			.find(|key| matches!(self.results.get(key), Some(Err(_))))
	}

	/// The verdict for one field.
	pub fn get(&self, key: FieldKey) -> Option<&FieldResult<()>> {
		self.results.get(&key)
	}

	/// The failure message for one field, when it failed.
	pub fn message(&self, key: FieldKey) -> Option<&str> {
		match self.results.get(&key) {
			Some(Err(e)) => Some(e.message()),
			_ => None,
		}
	}

	/// Iterates the verdicts in enumeration order.
	pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldResult<()>)> {
		self.results.iter().map(|(k, v)| (*k, v))
	}
}

/// Live character counter for the message field.
///
/// Counts characters of the raw (untrimmed) value; `warn` flips once the
/// count exceeds [`MESSAGE_WARN_THRESHOLD`] so the UI can restyle the
/// counter before the hard cap is hit.
///
/// # Examples
///
/// ```
/// use formwork::{CharCount, MESSAGE_WARN_THRESHOLD};
///
/// let count = CharCount::of("hello");
/// assert_eq!(count.length, 5);
/// assert!(!count.warn);
///
/// let long = "x".repeat(MESSAGE_WARN_THRESHOLD + 1);
/// assert!(CharCount::of(&long).warn);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharCount {
	pub length: usize,
	pub warn: bool,
}

impl CharCount {
	/// Counts the given raw value.
	pub fn of(value: &str) -> Self {
		let length = value.chars().count();
		Self {
			length,
			warn: length > MESSAGE_WARN_THRESHOLD,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	// =========================================================================
	// NameValidator tests
	// =========================================================================

	#[rstest]
	#[case("Jo")]
	#[case("Jordan Lee")]
	#[case("O'Brien")]
	#[case("Jean-Luc")]
	#[case("J. R. Tolkien")]
	#[case("  Jordan  ")]
	#[case("José")]
	fn test_name_validator_valid(#[case] name: &str) {
		// Arrange
		let validator = NameValidator::new();

		// Act
		let result = validator.validate(name);

		// Assert
		assert!(result.is_ok(), "Expected '{name}' to be a valid name");
	}

	#[rstest]
	#[case("", "Name is required")]
	#[case("   ", "Name is required")]
	#[case("J", "Name must be at least 2 characters")]
	#[case(" J ", "Name must be at least 2 characters")]
	#[case("Jordan123", "Name contains invalid characters")]
	#[case("name@home", "Name contains invalid characters")]
	#[case("'Quoted", "Name contains invalid characters")]
	fn test_name_validator_invalid(#[case] name: &str, #[case] expected: &str) {
		// Arrange
		let validator = NameValidator::new();

		// Act
		let result = validator.validate(name);

		// Assert
		match result {
			Err(FieldError::Validation(msg)) => assert_eq!(msg, expected),
			Ok(()) => panic!("Expected '{name}' to be an invalid name"),
		}
	}

	#[test]
	fn test_name_validator_max_length() {
		let validator = NameValidator::new();
		let long = "a".repeat(NAME_MAX_LENGTH + 1);

		let err = validator.validate(&long).unwrap_err();
		assert_eq!(err.message(), "Name must be at most 80 characters");

		let at_limit = "a".repeat(NAME_MAX_LENGTH);
		assert!(validator.validate(&at_limit).is_ok());
	}

	#[test]
	fn test_name_validator_custom_bounds() {
		let validator = NameValidator::new().with_min_length(4).with_max_length(6);

		assert!(validator.validate("Jo").is_err());
		assert!(validator.validate("Jodi").is_ok());
		assert!(validator.validate("Jocelyn").is_err());
	}

	#[test]
	fn test_name_length_counts_characters_not_bytes() {
		// "Æo" is three bytes but two characters; it must clear the
		// two-character minimum.
		let validator = NameValidator::new();
		assert!(validator.validate("Æo").is_ok());
	}

	// =========================================================================
	// EmailValidator tests
	// =========================================================================

	#[rstest]
	#[case("a@b.com")]
	#[case("jordan@example.com")]
	#[case("first.last@sub.example.co")]
	#[case("user+tag@example.org")]
	#[case("  padded@example.com  ")]
	fn test_email_validator_valid(#[case] email: &str) {
		// Arrange
		let validator = EmailValidator::new();

		// Act
		let result = validator.validate(email);

		// Assert
		assert!(result.is_ok(), "Expected '{email}' to be a valid email");
	}

	#[rstest]
	#[case("not-an-email")]
	#[case("a@b")]
	#[case("@example.com")]
	#[case("user@")]
	#[case("user@@example.com")]
	#[case("user name@example.com")]
	#[case("user@exam ple.com")]
	fn test_email_validator_invalid(#[case] email: &str) {
		// Arrange
		let validator = EmailValidator::new();

		// Act
		let result = validator.validate(email);

		// Assert
		match result {
			Err(FieldError::Validation(msg)) => {
				assert_eq!(msg, "Enter a valid email address");
			}
			Ok(()) => panic!("Expected '{email}' to be an invalid email"),
		}
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_email_validator_required(#[case] email: &str) {
		let validator = EmailValidator::new();

		let err = validator.validate(email).unwrap_err();
		assert_eq!(err.message(), "Email is required");
	}

	#[test]
	fn test_email_validator_custom_message() {
		let validator = EmailValidator::new().with_message("Custom email error");

		let err = validator.validate("bad-email").unwrap_err();
		assert_eq!(err.message(), "Custom email error");

		// The required message is not overridden
		let err = validator.validate("").unwrap_err();
		assert_eq!(err.message(), "Email is required");
	}

	// =========================================================================
	// MessageValidator tests
	// =========================================================================

	#[rstest]
	#[case("hello world!!")]
	#[case("This is a sufficiently long test message.")]
	#[case("exactly 10")]
	fn test_message_validator_valid(#[case] message: &str) {
		let validator = MessageValidator::new();
		assert!(
			validator.validate(message).is_ok(),
			"Expected '{message}' to be a valid message"
		);
	}

	#[rstest]
	#[case("", "Message is required")]
	#[case("  \t ", "Message is required")]
	#[case("short", "Message is too short")]
	#[case("123456789", "Message is too short")]
	fn test_message_validator_invalid(#[case] message: &str, #[case] expected: &str) {
		let validator = MessageValidator::new();

		match validator.validate(message) {
			Err(FieldError::Validation(msg)) => assert_eq!(msg, expected),
			Ok(()) => panic!("Expected '{message}' to be an invalid message"),
		}
	}

	#[test]
	fn test_message_validator_max_length() {
		let validator = MessageValidator::new();

		let at_limit = "a".repeat(MESSAGE_MAX_LENGTH);
		assert!(validator.validate(&at_limit).is_ok());

		let too_long = "a".repeat(MESSAGE_MAX_LENGTH + 1);
		let err = validator.validate(&too_long).unwrap_err();
		assert_eq!(err.message(), "Message is too long");
	}

	#[test]
	fn test_message_validator_trims_before_counting() {
		// Nine characters padded with whitespace stays too short.
		let validator = MessageValidator::new();
		let err = validator.validate("  123456789  ").unwrap_err();
		assert_eq!(err.message(), "Message is too short");
	}

	// =========================================================================
	// FieldValidators / ValidationReport tests
	// =========================================================================

	#[test]
	fn test_validate_all_consistency() {
		let validators = FieldValidators::new();
		let report =
			validators.validate_all("Jordan Lee", "jordan@example.com", "A proper message.");

		assert!(report.all_valid());
		assert_eq!(report.first_invalid(), None);
		for (key, verdict) in report.iter() {
			assert!(verdict.is_ok(), "field {key} unexpectedly failed");
		}
	}

	#[test]
	fn test_first_invalid_follows_enumeration_order() {
		let validators = FieldValidators::new();

		// Name passes, email and message both fail: email is first.
		let report = validators.validate_all("Jo", "not-an-email", "short");
		assert!(!report.all_valid());
		assert_eq!(report.first_invalid(), Some(FieldKey::Email));

		// All three fail: name is first.
		let report = validators.validate_all("", "", "");
		assert_eq!(report.first_invalid(), Some(FieldKey::Name));
	}

	#[test]
	fn test_report_messages() {
		let validators = FieldValidators::new();
		let report = validators.validate_all("", "a@b.com", "hello world!!");

		assert_eq!(report.message(FieldKey::Name), Some("Name is required"));
		assert_eq!(report.message(FieldKey::Email), None);
		assert_eq!(report.message(FieldKey::Message), None);
	}

	#[test]
	fn test_dispatch_matches_field_validators() {
		let validators = FieldValidators::new();

		assert_eq!(
			validators.validate(FieldKey::Name, "Jo"),
			validators.name.validate("Jo")
		);
		assert_eq!(
			validators.validate(FieldKey::Email, "x"),
			validators.email.validate("x")
		);
		assert_eq!(
			validators.validate(FieldKey::Message, "x"),
			validators.message.validate("x")
		);
	}

	// =========================================================================
	// CharCount tests
	// =========================================================================

	#[rstest]
	#[case("", 0, false)]
	#[case("hello", 5, false)]
	#[case("héllo", 5, false)]
	fn test_char_count(#[case] value: &str, #[case] length: usize, #[case] warn: bool) {
		let count = CharCount::of(value);
		assert_eq!(count.length, length);
		assert_eq!(count.warn, warn);
	}

	#[test]
	fn test_char_count_warn_threshold() {
		let at_threshold = "x".repeat(MESSAGE_WARN_THRESHOLD);
		assert!(!CharCount::of(&at_threshold).warn);

		let over = "x".repeat(MESSAGE_WARN_THRESHOLD + 1);
		assert!(CharCount::of(&over).warn);
	}
}
