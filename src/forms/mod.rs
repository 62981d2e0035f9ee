//! Login and signup forms with client-side validation.
//!
//! A form never talks to the network. Submitting it either yields an
//! [`AuthRequest`](crate::session::AuthRequest) for the auth gateway or the
//! per-field errors to show inline.

use std::collections::BTreeMap;
use std::fmt;

mod login;
mod signup;
pub mod validate;

pub use login::{LoginForm, LoginMode};
pub use signup::{Gender, SignupForm};
pub use validate::{PASSWORD_RULES_MESSAGE, PasswordCheck};

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    Dob,
    Gender,
    Password,
    ConfirmPassword,
    TermsAccepted,
    Otp,
}

impl Field {
    /// Form field name as the server and the markup know it.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Dob => "dob",
            Field::Gender => "gender",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::TermsAccepted => "termsAccepted",
            Field::Otp => "otp",
        }
    }
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.name(), message)?;
            first = false;
        }
        Ok(())
    }
}

impl From<FieldErrors> for crate::HrError {
    fn from(errors: FieldErrors) -> Self {
        crate::HrError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Password, "too weak");
        errors.insert(Field::FullName, "Full name is required");
        assert_eq!(
            errors.to_string(),
            "fullName: Full name is required; password: too weak"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.clone().into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
