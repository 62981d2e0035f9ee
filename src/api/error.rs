//! Mapping of error responses to [`HrError`].

use serde::Deserialize;

use crate::error::HrError;
use crate::http::HttpResponse;

/// Error body shapes the backend produces.
///
/// Spring's default error page uses `error`, the application's own
/// handlers use `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Whether a status means the bearer token was not accepted.
pub fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

/// Turn a non-2xx response into an error.
pub fn error_from_response(response: &HttpResponse) -> HrError {
    if is_auth_failure(response.status) {
        return HrError::Unauthorized;
    }

    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => HrError::ApiError {
            status: response.status,
            message,
        },
        None => HrError::HttpError(response.status),
    }
}
