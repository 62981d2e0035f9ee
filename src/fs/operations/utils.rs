//! Shared helpers for node operations.

use crate::error::{HrError, Result};

/// Normalize a user-entered node name (trim whitespace, reject empty or
/// path-like names).
pub fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HrError::Custom("Name cannot be empty".to_string()));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(HrError::Custom(format!(
            "Name cannot contain path separators: {}",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}
