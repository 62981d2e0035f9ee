//! Sign-in form: password login, or a one-time passcode sent by email.

use super::validate::{is_present, looks_like_email};
use super::{Field, FieldErrors};
use crate::session::AuthRequest;

/// Maximum OTP length the form accepts.
pub const OTP_MAX_LEN: usize = 6;

/// Which credential the form is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Password,
    Otp,
}

/// State of the sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub otp: String,
    pub show_password: bool,
    mode: LoginMode,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            LoginMode::Password => "Welcome Back",
            LoginMode::Otp => "Verify OTP",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.mode {
            LoginMode::Password => "Secure your medical records with us",
            LoginMode::Otp => "Enter the OTP sent to your email",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            LoginMode::Password => "Sign In",
            LoginMode::Otp => "Verify OTP",
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Ask for a passcode to be sent to the entered email.
    ///
    /// Does nothing and returns `None` while the email field is blank;
    /// otherwise switches to OTP mode and returns the `send-otp` request.
    pub fn request_otp(&mut self) -> Option<AuthRequest> {
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        let request = AuthRequest::SendOtp {
            email: email.to_string(),
        };
        self.mode = LoginMode::Otp;
        self.otp.clear();
        Some(request)
    }

    /// Return to password sign-in.
    pub fn back_to_login(&mut self) {
        self.mode = LoginMode::Password;
        self.otp.clear();
    }

    /// Validate the visible fields and build the request for this mode.
    pub fn submit(&self) -> Result<AuthRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = self.email.trim();

        if !is_present(email) {
            errors.insert(Field::Email, "Email is required");
        } else if !looks_like_email(email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }

        match self.mode {
            LoginMode::Password => {
                if self.password.is_empty() {
                    errors.insert(Field::Password, "Password is required");
                }
                errors.into_result()?;
                Ok(AuthRequest::Login {
                    email: email.to_string(),
                    password: self.password.clone(),
                })
            }
            LoginMode::Otp => {
                let otp = self.otp.trim();
                if otp.is_empty() {
                    errors.insert(Field::Otp, "OTP is required");
                } else if otp.chars().count() > OTP_MAX_LEN {
                    errors.insert(Field::Otp, "OTP must be at most 6 characters");
                }
                errors.into_result()?;
                Ok(AuthRequest::VerifyOtp {
                    email: email.to_string(),
                    otp: otp.to_string(),
                    full_name: None,
                    password: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn test_password_login_request() {
        let form = filled(" a@b.com ", "secret");
        assert_eq!(
            form.submit().unwrap(),
            AuthRequest::Login {
                email: "a@b.com".into(),
                password: "secret".into()
            }
        );
    }

    #[test]
    fn test_required_fields() {
        let errors = LoginForm::new().submit().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));

        let errors = filled("not-an-email", "x").submit().unwrap_err();
        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_otp_needs_email() {
        let mut form = LoginForm::new();
        assert_eq!(form.request_otp(), None);
        assert_eq!(form.mode(), LoginMode::Password);
    }

    #[test]
    fn test_otp_flow() {
        let mut form = filled("a@b.com", "");
        assert_eq!(
            form.request_otp(),
            Some(AuthRequest::SendOtp {
                email: "a@b.com".into()
            })
        );
        assert_eq!(form.mode(), LoginMode::Otp);
        assert_eq!(form.title(), "Verify OTP");
        assert_eq!(form.submit_label(), "Verify OTP");

        // Password is hidden in OTP mode and not required.
        let errors = form.submit().unwrap_err();
        assert!(!errors.contains(Field::Password));
        assert_eq!(errors.get(Field::Otp), Some("OTP is required"));

        form.otp = "1234567".into();
        assert_eq!(
            form.submit().unwrap_err().get(Field::Otp),
            Some("OTP must be at most 6 characters")
        );

        form.otp = "123456".into();
        assert_eq!(
            form.submit().unwrap(),
            AuthRequest::VerifyOtp {
                email: "a@b.com".into(),
                otp: "123456".into(),
                full_name: None,
                password: None,
            }
        );

        form.back_to_login();
        assert_eq!(form.mode(), LoginMode::Password);
        assert!(form.otp.is_empty());
        assert_eq!(form.title(), "Welcome Back");
    }

    #[test]
    fn test_password_visibility_toggle() {
        let mut form = LoginForm::new();
        form.toggle_password_visibility();
        assert!(form.show_password);
        form.toggle_password_visibility();
        assert!(!form.show_password);
    }
}
