//! Account creation form.

use std::fmt;
use std::str::FromStr;

use super::validate::{PASSWORD_RULES_MESSAGE, PasswordCheck, is_present, looks_like_email};
use super::{Field, FieldErrors};
use crate::error::HrError;
use crate::session::AuthRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(HrError::Custom(format!("Unknown gender: {}", other))),
        }
    }
}

/// State of the signup form.
///
/// Date of birth, gender and the terms checkbox are required to submit but
/// are not sent; registration only carries name, email and password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    /// Date of birth as entered (`YYYY-MM-DD` from a date input).
    pub dob: String,
    pub gender: Option<Gender>,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
    errors: FieldErrors,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages from the last submit or password edit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Update the password and the live complexity hint.
    ///
    /// An empty password clears the hint; it is only reported once the user
    /// has typed something.
    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
        let mut errors = FieldErrors::new();
        for (field, message) in self.errors.iter().filter(|(f, _)| *f != Field::Password) {
            errors.insert(field, message);
        }
        if !password.is_empty() && !PasswordCheck::of(password).is_acceptable() {
            errors.insert(Field::Password, PASSWORD_RULES_MESSAGE);
        }
        self.errors = errors;
    }

    /// Check every field without touching the stored messages.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if !is_present(&self.full_name) {
            errors.insert(Field::FullName, "Full name is required");
        }
        if !is_present(&self.email) {
            errors.insert(Field::Email, "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }
        if !is_present(&self.dob) {
            errors.insert(Field::Dob, "Date of birth is required");
        }
        if self.gender.is_none() {
            errors.insert(Field::Gender, "Gender is required");
        }
        if !self.terms_accepted {
            errors.insert(Field::TermsAccepted, "You must agree to the terms");
        }
        if !PasswordCheck::of(&self.password).is_acceptable() {
            errors.insert(Field::Password, PASSWORD_RULES_MESSAGE);
        }
        if self.password != self.confirm_password {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }

        errors
    }

    /// Validate, remember the messages, and build the register request.
    pub fn submit(&mut self) -> Result<AuthRequest, FieldErrors> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        Ok(AuthRequest::Register {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
