//! Root state machine: signed out, signed in, and the moves between them.

use tracing::{info, warn};

use super::routes::{self, Resolved, Route};
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::error::{HrError, Result};
use crate::forms::{LoginForm, SignupForm};
use crate::session::{
    AuthGateway, AuthOutcome, AuthRequest, FileStore, Session, SessionStore, StoredSession, User,
};

/// Banner shown when an auth call fails at the network level.
pub const AUTH_NETWORK_ERROR: &str = "Network error. Please try again.";
/// Banner shown after the server rejects a stored token.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Which form is showing while signed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScreen {
    Login(LoginForm),
    Signup(SignupForm),
}

impl Default for AuthScreen {
    fn default() -> Self {
        AuthScreen::Login(LoginForm::new())
    }
}

/// Top-level application state.
#[derive(Debug, Clone)]
pub enum AppState {
    /// Before [`RootController::start`].
    Loading,
    Anonymous(AuthScreen),
    Authenticated(Box<Dashboard>),
}

/// Owns the session and decides what is on screen.
#[derive(Debug)]
pub struct RootController {
    api: ApiClient,
    gateway: AuthGateway,
    store: SessionStore,
    state: AppState,
    auth_error: Option<String>,
}

impl RootController {
    /// Create a controller. `api` should carry no token.
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self {
            gateway: AuthGateway::new(api.clone()),
            api,
            store,
            state: AppState::Loading,
            auth_error: None,
        }
    }

    /// Controller over `reqwest` and a [`FileStore`] at the configured path.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let store = SessionStore::new(FileStore::open(&config.storage_path)?);
        Ok(Self::new(api, store))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Message for the auth banner, if any.
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AppState::Authenticated(_))
    }

    /// Signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.dashboard().map(Dashboard::user)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.state {
            AppState::Authenticated(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.state {
            AppState::Authenticated(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    /// Like [`RootController::dashboard_mut`], as an error when signed out.
    pub fn require_dashboard(&mut self) -> Result<&mut Dashboard> {
        self.dashboard_mut().ok_or(HrError::NotAuthenticated)
    }

    /// Resolve a URL path against the current state.
    pub fn route(&self, path: &str) -> Resolved {
        routes::resolve(&Route::parse(path), self.is_authenticated())
    }

    /// Load the persisted session and leave the loading state.
    ///
    /// A stored session opens the dashboard (and lists the root folder). An
    /// unreadable one has already been cleared by the store and simply
    /// leaves the user signed out.
    pub async fn start(&mut self) -> Result<()> {
        match self.store.load()? {
            StoredSession::Found(session) => {
                info!("restored session for {}", session.user.email);
                self.open_dashboard(session).await;
            }
            StoredSession::Empty | StoredSession::Discarded => {
                self.state = AppState::Anonymous(AuthScreen::default());
            }
        }
        Ok(())
    }

    /// Show the login form. Ignored while signed in.
    pub fn show_login(&mut self) {
        if let AppState::Anonymous(screen) = &mut self.state {
            if !matches!(screen, AuthScreen::Login(_)) {
                *screen = AuthScreen::Login(LoginForm::new());
            }
        }
    }

    /// Show the signup form. Ignored while signed in.
    pub fn show_signup(&mut self) {
        if let AppState::Anonymous(screen) = &mut self.state {
            if !matches!(screen, AuthScreen::Signup(_)) {
                *screen = AuthScreen::Signup(SignupForm::new());
            }
        }
    }

    pub fn login_form_mut(&mut self) -> Option<&mut LoginForm> {
        match &mut self.state {
            AppState::Anonymous(AuthScreen::Login(form)) => Some(form),
            _ => None,
        }
    }

    pub fn signup_form_mut(&mut self) -> Option<&mut SignupForm> {
        match &mut self.state {
            AppState::Anonymous(AuthScreen::Signup(form)) => Some(form),
            _ => None,
        }
    }

    /// Submit the login form in its current mode.
    ///
    /// Field errors are returned as [`HrError::Validation`] and nothing is
    /// sent.
    pub async fn login(&mut self) -> Result<AuthOutcome> {
        let form = self.login_form_mut().ok_or_else(|| not_showing("login"))?;
        let request = form.submit()?;
        self.authenticate(request).await
    }

    /// Ask for an OTP for the login form's email.
    ///
    /// `Ok(None)` when the email is blank: no request is made.
    pub async fn request_otp(&mut self) -> Result<Option<AuthOutcome>> {
        let form = self.login_form_mut().ok_or_else(|| not_showing("login"))?;
        let Some(request) = form.request_otp() else {
            return Ok(None);
        };
        self.authenticate(request).await.map(Some)
    }

    /// Submit the signup form.
    pub async fn register(&mut self) -> Result<AuthOutcome> {
        let form = self.signup_form_mut().ok_or_else(|| not_showing("signup"))?;
        let request = form.submit()?;
        self.authenticate(request).await
    }

    /// Send an auth request and act on the reply.
    ///
    /// The banner is cleared first. A token saves the session and opens the
    /// dashboard; a message goes to the banner; a network failure shows
    /// [`AUTH_NETWORK_ERROR`] and is returned.
    pub async fn authenticate(&mut self, request: AuthRequest) -> Result<AuthOutcome> {
        if self.is_authenticated() {
            return Err(HrError::Custom("Already signed in".to_string()));
        }
        self.auth_error = None;

        let outcome = match self.gateway.submit(&request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("auth {} failed: {}", request.action().path(), e);
                self.auth_error = Some(AUTH_NETWORK_ERROR.to_string());
                return Err(e);
            }
        };

        match &outcome {
            AuthOutcome::Authenticated(session) => {
                self.store.save(session)?;
                self.open_dashboard(session.clone()).await;
            }
            AuthOutcome::Message(message) => {
                self.auth_error = Some(message.clone());
            }
            AuthOutcome::Unrecognised => {
                warn!("auth {} reply had neither token nor message", request.action().path());
            }
        }
        Ok(outcome)
    }

    /// Forget the session and return to the login form.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(user) = self.user() {
            info!("signed out {}", user.email);
        }
        self.state = AppState::Anonymous(AuthScreen::default());
        self.auth_error = None;
        Ok(())
    }

    /// Pass a dashboard result through, ending the session on
    /// [`HrError::Unauthorized`].
    pub fn observe<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(HrError::Unauthorized) = &result {
            self.expire_session();
        }
        result
    }

    fn expire_session(&mut self) {
        if !self.is_authenticated() {
            return;
        }
        warn!("server rejected the session token; signing out");
        if let Err(e) = self.store.clear() {
            warn!("failed to clear stored session: {}", e);
        }
        self.state = AppState::Anonymous(AuthScreen::default());
        self.auth_error = Some(SESSION_EXPIRED.to_string());
    }

    async fn open_dashboard(&mut self, session: Session) {
        let api = self.api.authorized(&session.token);
        let mut dashboard = Dashboard::new(api, session.user);
        let entered = dashboard.enter().await;
        self.state = AppState::Authenticated(Box::new(dashboard));
        // Other failures stay on the dashboard banner.
        let _ = self.observe(entered);
    }
}

fn not_showing(form: &str) -> HrError {
    HrError::Custom(format!("The {} form is not showing", form))
}
