//! Authentication endpoints.
//!
//! All four actions share one shape: POST a JSON body to `auth/<action>` and
//! read whatever JSON comes back. The reply, not the status code, decides the
//! outcome: a `token` means signed in, a `message` is shown to the user.

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::session::{Session, User, UserId};
use crate::api::ApiClient;
use crate::error::Result;

/// The auth endpoint an [`AuthRequest`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
    SendOtp,
    VerifyOtp,
}

impl AuthAction {
    /// Path segment under `auth/`.
    pub fn path(&self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Register => "register",
            AuthAction::SendOtp => "send-otp",
            AuthAction::VerifyOtp => "verify-otp",
        }
    }
}

/// A validated request for one of the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login {
        email: String,
        password: String,
    },
    Register {
        full_name: String,
        email: String,
        password: String,
    },
    SendOtp {
        email: String,
    },
    VerifyOtp {
        email: String,
        otp: String,
        full_name: Option<String>,
        password: Option<String>,
    },
}

impl AuthRequest {
    pub fn action(&self) -> AuthAction {
        match self {
            AuthRequest::Login { .. } => AuthAction::Login,
            AuthRequest::Register { .. } => AuthAction::Register,
            AuthRequest::SendOtp { .. } => AuthAction::SendOtp,
            AuthRequest::VerifyOtp { .. } => AuthAction::VerifyOtp,
        }
    }

    /// JSON body for the request. Absent optional fields are omitted.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        let mut put = |key: &str, value: &str| {
            body.insert(key.to_string(), Value::String(value.to_string()));
        };

        match self {
            AuthRequest::Login { email, password } => {
                put("email", email);
                put("password", password);
            }
            AuthRequest::Register {
                full_name,
                email,
                password,
            } => {
                put("fullName", full_name);
                put("email", email);
                put("password", password);
            }
            AuthRequest::SendOtp { email } => put("email", email),
            AuthRequest::VerifyOtp {
                email,
                otp,
                full_name,
                password,
            } => {
                put("email", email);
                put("otp", otp);
                if let Some(name) = full_name {
                    put("fullName", name);
                }
                if let Some(password) = password {
                    put("password", password);
                }
            }
        }

        Value::Object(body)
    }
}

/// How an auth reply was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The reply carried a token.
    Authenticated(Session),
    /// No token, but a message for the user.
    Message(String),
    /// Neither a token nor a message.
    Unrecognised,
}

impl AuthOutcome {
    /// Classify a decoded auth reply.
    ///
    /// `{token, userId, email, fullName}` becomes a session; a missing or
    /// empty token falls through to `message`.
    pub fn from_response(reply: &Value) -> Self {
        let token = reply
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());

        if let Some(token) = token {
            let user = User {
                id: reply.get("userId").and_then(user_id),
                email: string_field(reply, "email"),
                full_name: string_field(reply, "fullName"),
            };
            return AuthOutcome::Authenticated(Session::new(token, user));
        }

        match reply
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            Some(message) => AuthOutcome::Message(message.to_string()),
            None => AuthOutcome::Unrecognised,
        }
    }
}

fn string_field(reply: &Value, key: &str) -> String {
    reply
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn user_id(value: &Value) -> Option<UserId> {
    match value {
        Value::Number(n) => n.as_i64().map(UserId::Number),
        Value::String(s) => Some(UserId::Text(s.clone())),
        _ => None,
    }
}

/// Client for the `auth/*` endpoints.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    /// Create a gateway. Any token on `api` is not sent.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POST the request and return the decoded reply as is.
    ///
    /// # Errors
    /// Only transport failures and non-JSON bodies. An HTTP error status with
    /// a JSON body is a normal reply.
    pub async fn call(&self, request: &AuthRequest) -> Result<Value> {
        let action = request.action();
        debug!("auth {}", action.path());
        self.api
            .post_unchecked(&["auth", action.path()], &request.body())
            .await
    }

    /// [`AuthGateway::call`] followed by [`AuthOutcome::from_response`].
    pub async fn submit(&self, request: &AuthRequest) -> Result<AuthOutcome> {
        let reply = self.call(request).await?;
        let outcome = AuthOutcome::from_response(&reply);
        if let AuthOutcome::Authenticated(session) = &outcome {
            info!("signed in as {}", session.user.email);
        }
        Ok(outcome)
    }
}
