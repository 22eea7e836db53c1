//! Stateless form validation for login credentials and expense
//! creation payloads.
//!
//! Rules short-circuit on the first violation; the message on each
//! variant is exactly what the screen shows. Validation failures are
//! resolved locally and never reach the network layer.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::amount;

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// A failed validation, carrying the user-facing reason.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    EmailMissing,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Please enter your password")]
    PasswordMissing,
    #[error("Password must be at least 3 characters long")]
    PasswordTooShort,
    #[error("Please enter expense name")]
    NameMissing,
    #[error("Expense name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please enter expense amount")]
    AmountMissing,
    #[error("Please enter a valid positive amount")]
    AmountNotPositive,
    #[error("Amount cannot exceed $999,999.99")]
    AmountTooLarge,
    #[error("Please enter expense description")]
    DescriptionMissing,
    #[error("Description must be at least 3 characters long")]
    DescriptionTooShort,
}

/// Validates login credentials: username must look like
/// `local@domain.tld`, password must be at least 3 characters.
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmailMissing);
    }
    if !EMAIL_RE.is_match(username) {
        return Err(ValidationError::EmailInvalid);
    }
    if password.trim().is_empty() {
        return Err(ValidationError::PasswordMissing);
    }
    if password.len() < 3 {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validates an expense creation form.
///
/// The amount here is the final (already masked) input; masking lives
/// in [`amount::mask_input`] and only gates what can be typed.
pub fn validate_expense(
    name: &str,
    amount_input: &str,
    description: &str,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameMissing);
    }
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    if amount_input.trim().is_empty() {
        return Err(ValidationError::AmountMissing);
    }
    let cents = amount::parse_cents(amount_input).ok_or(ValidationError::AmountNotPositive)?;
    if cents <= 0 {
        return Err(ValidationError::AmountNotPositive);
    }
    if cents > amount::MAX_AMOUNT_CENTS {
        return Err(ValidationError::AmountTooLarge);
    }
    if description.trim().is_empty() {
        return Err(ValidationError::DescriptionMissing);
    }
    if description.trim().chars().count() < 3 {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_plain_email_shape() {
        assert_eq!(validate_login("mario@example.com", "abc"), Ok(()));
    }

    #[test]
    fn login_rejects_in_order() {
        assert_eq!(
            validate_login("", "abc"),
            Err(ValidationError::EmailMissing)
        );
        assert_eq!(
            validate_login("not-an-email", "abc"),
            Err(ValidationError::EmailInvalid)
        );
        assert_eq!(
            validate_login("a@b.co", ""),
            Err(ValidationError::PasswordMissing)
        );
        assert_eq!(
            validate_login("a@b.co", "ab"),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn expense_name_rules() {
        assert_eq!(
            validate_expense("", "1", "desc"),
            Err(ValidationError::NameMissing)
        );
        assert_eq!(
            validate_expense("a", "1", "desc"),
            Err(ValidationError::NameTooShort)
        );
    }

    #[test]
    fn expense_amount_rules() {
        assert_eq!(
            validate_expense("Bar", "", "desc"),
            Err(ValidationError::AmountMissing)
        );
        assert_eq!(
            validate_expense("Bar", "abc", "desc"),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            validate_expense("Bar", "0", "desc"),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            validate_expense("Bar", "1000000.00", "desc"),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(validate_expense("Bar", "999999.99", "desc"), Ok(()));
    }

    #[test]
    fn expense_description_rules() {
        assert_eq!(
            validate_expense("Bar", "1", ""),
            Err(ValidationError::DescriptionMissing)
        );
        assert_eq!(
            validate_expense("Bar", "1", "ab"),
            Err(ValidationError::DescriptionTooShort)
        );
        assert_eq!(validate_expense("Bar", "1", "abc"), Ok(()));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Expense name must be at least 2 characters long"
        );
        assert_eq!(
            ValidationError::AmountTooLarge.to_string(),
            "Amount cannot exceed $999,999.99"
        );
    }
}
