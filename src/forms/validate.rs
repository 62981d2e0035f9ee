//! Field-level validation rules shared by the forms.

/// Message shown when a password fails [`PasswordCheck::is_acceptable`].
pub const PASSWORD_RULES_MESSAGE: &str =
    "Password must have 8 characters, a capital letter, a special character and a number";

/// Characters that count as "special" for password complexity.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Which complexity rules a password meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordCheck {
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
    pub long_enough: bool,
}

impl PasswordCheck {
    pub fn of(password: &str) -> Self {
        Self {
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            long_enough: password.chars().count() >= MIN_PASSWORD_LEN,
        }
    }

    /// Lowercase letters are reported but not required.
    pub fn is_acceptable(&self) -> bool {
        self.long_enough && self.has_uppercase && self.has_digit && self.has_special
    }
}

/// Shape check for an email address: `local@domain` with no whitespace and
/// a domain made of non-empty dot-separated labels.
pub fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Non-blank after trimming.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
