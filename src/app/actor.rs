//! Actor front end for the root controller.
//!
//! The controller runs on its own task and handles one command at a time;
//! [`AppHandle`] is a cheap, cloneable sender for it.

use std::path::PathBuf;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::controller::{AppState, AuthScreen, RootController};
use crate::dashboard::{OpenAction, View};
use crate::error::{HrError, Result};
use crate::forms::SignupForm;
use crate::fs::{AccessDuration, Node, ShareResult};
use crate::session::{AuthOutcome, User};

/// What a front end needs to draw the current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Login {
        otp_mode: bool,
        banner: Option<String>,
    },
    Signup {
        banner: Option<String>,
    },
    Dashboard(DashboardView),
}

/// Snapshot of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user: User,
    pub view: View,
    pub breadcrumb: Vec<String>,
    pub search_term: String,
    /// The listing after the search filter.
    pub files: Vec<Node>,
    pub loading: bool,
    pub banner: Option<String>,
}

#[derive(Clone)]
pub struct AppHandle {
    tx: mpsc::Sender<AppCommand>,
}

enum AppCommand {
    Screen {
        reply: oneshot::Sender<Result<Screen>>,
    },
    Login {
        email: String,
        password: String,
        reply: oneshot::Sender<Result<AuthOutcome>>,
    },
    SendOtp {
        email: String,
        reply: oneshot::Sender<Result<Option<AuthOutcome>>>,
    },
    VerifyOtp {
        otp: String,
        reply: oneshot::Sender<Result<AuthOutcome>>,
    },
    BackToLogin {
        reply: oneshot::Sender<Result<()>>,
    },
    Register {
        form: Box<SignupForm>,
        reply: oneshot::Sender<Result<AuthOutcome>>,
    },
    Logout {
        reply: oneshot::Sender<Result<()>>,
    },
    SelectView {
        view: View,
        reply: oneshot::Sender<Result<()>>,
    },
    Refresh {
        reply: oneshot::Sender<Result<()>>,
    },
    Search {
        term: String,
        reply: oneshot::Sender<Result<Vec<Node>>>,
    },
    Open {
        name: String,
        reply: oneshot::Sender<Result<OpenAction>>,
    },
    Download {
        name: String,
        reply: oneshot::Sender<Result<String>>,
    },
    GoHome {
        reply: oneshot::Sender<Result<()>>,
    },
    NavigateTo {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    CreateFolder {
        name: String,
        reply: oneshot::Sender<Result<Option<Node>>>,
    },
    Delete {
        name: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    Rename {
        name: String,
        new_name: String,
        reply: oneshot::Sender<Result<Node>>,
    },
    Upload {
        local: PathBuf,
        reply: oneshot::Sender<Result<Node>>,
    },
    Share {
        name: String,
        email: String,
        duration: AccessDuration,
        reply: oneshot::Sender<Result<ShareResult>>,
    },
    DismissError {
        reply: oneshot::Sender<Result<()>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

impl AppHandle {
    /// Start the controller (load the stored session) and spawn its task.
    pub async fn start(mut controller: RootController) -> Result<Self> {
        controller.start().await?;
        Ok(AppActor::spawn(controller))
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R>>) -> AppCommand,
    ) -> Result<R> {
        let (tx, rx) = oneshot::channel();
        let cmd = build(tx);
        self.tx
            .send(cmd)
            .await
            .map_err(|_| HrError::Custom("App actor stopped".to_string()))?;
        rx.await
            .map_err(|_| HrError::Custom("App actor stopped".to_string()))?
    }

    pub async fn screen(&self) -> Result<Screen> {
        self.request(|reply| AppCommand::Screen { reply }).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        self.request(|reply| AppCommand::Login {
            email: email.to_string(),
            password: password.to_string(),
            reply,
        })
        .await
    }

    /// Request an OTP; the login form switches to OTP mode.
    pub async fn send_otp(&self, email: &str) -> Result<Option<AuthOutcome>> {
        self.request(|reply| AppCommand::SendOtp {
            email: email.to_string(),
            reply,
        })
        .await
    }

    /// Submit the OTP for the email given to [`AppHandle::send_otp`].
    pub async fn verify_otp(&self, otp: &str) -> Result<AuthOutcome> {
        self.request(|reply| AppCommand::VerifyOtp {
            otp: otp.to_string(),
            reply,
        })
        .await
    }

    pub async fn back_to_login(&self) -> Result<()> {
        self.request(|reply| AppCommand::BackToLogin { reply }).await
    }

    /// Submit a filled-in signup form.
    pub async fn register(&self, form: SignupForm) -> Result<AuthOutcome> {
        self.request(|reply| AppCommand::Register {
            form: Box::new(form),
            reply,
        })
        .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.request(|reply| AppCommand::Logout { reply }).await
    }

    pub async fn select_view(&self, view: View) -> Result<()> {
        self.request(|reply| AppCommand::SelectView { view, reply })
            .await
    }

    pub async fn refresh(&self) -> Result<()> {
        self.request(|reply| AppCommand::Refresh { reply }).await
    }

    /// Set the search term and return the matching items.
    pub async fn search(&self, term: &str) -> Result<Vec<Node>> {
        self.request(|reply| AppCommand::Search {
            term: term.to_string(),
            reply,
        })
        .await
    }

    /// Open the item called `name` in the current folder.
    pub async fn open(&self, name: &str) -> Result<OpenAction> {
        self.request(|reply| AppCommand::Open {
            name: name.to_string(),
            reply,
        })
        .await
    }

    pub async fn download(&self, name: &str) -> Result<String> {
        self.request(|reply| AppCommand::Download {
            name: name.to_string(),
            reply,
        })
        .await
    }

    pub async fn go_home(&self) -> Result<()> {
        self.request(|reply| AppCommand::GoHome { reply }).await
    }

    pub async fn navigate_to(&self, index: usize) -> Result<()> {
        self.request(|reply| AppCommand::NavigateTo { index, reply })
            .await
    }

    pub async fn create_folder(&self, name: &str) -> Result<Option<Node>> {
        self.request(|reply| AppCommand::CreateFolder {
            name: name.to_string(),
            reply,
        })
        .await
    }

    /// Delete the file called `name`. The caller has already confirmed.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        self.request(|reply| AppCommand::Delete {
            name: name.to_string(),
            reply,
        })
        .await
    }

    pub async fn rename(&self, name: &str, new_name: &str) -> Result<Node> {
        self.request(|reply| AppCommand::Rename {
            name: name.to_string(),
            new_name: new_name.to_string(),
            reply,
        })
        .await
    }

    /// Register a local file in the current folder.
    pub async fn upload<P: Into<PathBuf>>(&self, local: P) -> Result<Node> {
        self.request(|reply| AppCommand::Upload {
            local: local.into(),
            reply,
        })
        .await
    }

    pub async fn share(
        &self,
        name: &str,
        email: &str,
        duration: AccessDuration,
    ) -> Result<ShareResult> {
        self.request(|reply| AppCommand::Share {
            name: name.to_string(),
            email: email.to_string(),
            duration,
            reply,
        })
        .await
    }

    pub async fn dismiss_error(&self) -> Result<()> {
        self.request(|reply| AppCommand::DismissError { reply })
            .await
    }

    pub async fn shutdown(&self) {
        let (tx, rx) = oneshot::channel();
        let _ = self.tx.send(AppCommand::Shutdown { reply: tx }).await;
        let _ = rx.await;
    }
}

struct AppActor {
    controller: RootController,
    rx: mpsc::Receiver<AppCommand>,
}

impl AppActor {
    fn spawn(controller: RootController) -> AppHandle {
        let (tx, rx) = mpsc::channel(64);
        let actor = AppActor { controller, rx };
        tokio::spawn(actor.run());
        AppHandle { tx }
    }

    async fn run(mut self) {
        while let Some(cmd) = self.rx.recv().await {
            if self.handle_command(cmd).await {
                break;
            }
        }
        debug!("app actor stopped");
    }

    fn screen(&self) -> Screen {
        let banner = self.controller.auth_error().map(str::to_string);
        match self.controller.state() {
            AppState::Loading => Screen::Loading,
            AppState::Anonymous(AuthScreen::Login(form)) => Screen::Login {
                otp_mode: form.mode() == crate::forms::LoginMode::Otp,
                banner,
            },
            AppState::Anonymous(AuthScreen::Signup(_)) => Screen::Signup { banner },
            AppState::Authenticated(dashboard) => {
                let browser = dashboard.browser();
                Screen::Dashboard(DashboardView {
                    user: dashboard.user().clone(),
                    view: dashboard.view(),
                    breadcrumb: browser.breadcrumb().into_iter().map(str::to_string).collect(),
                    search_term: browser.search_term().to_string(),
                    files: browser.visible_files().into_iter().cloned().collect(),
                    loading: browser.loading(),
                    banner: browser.error().map(str::to_string),
                })
            }
        }
    }

    /// Node called `name` in the current listing.
    fn find(&mut self, name: &str) -> Result<Node> {
        self.controller
            .require_dashboard()?
            .browser()
            .files()
            .iter()
            .find(|n| n.name == name)
            .cloned()
            .ok_or_else(|| HrError::Custom(format!("No such item: {}", name)))
    }

    async fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Screen { reply } => {
                let _ = reply.send(Ok(self.screen()));
            }
            AppCommand::Login {
                email,
                password,
                reply,
            } => {
                self.controller.show_login();
                let res = match self.controller.login_form_mut() {
                    Some(form) => {
                        form.back_to_login();
                        form.email = email;
                        form.password = password;
                        self.controller.login().await
                    }
                    None => Err(HrError::Custom("Already signed in".to_string())),
                };
                let _ = reply.send(res);
            }
            AppCommand::SendOtp { email, reply } => {
                self.controller.show_login();
                let res = match self.controller.login_form_mut() {
                    Some(form) => {
                        form.email = email;
                        self.controller.request_otp().await
                    }
                    None => Err(HrError::Custom("Already signed in".to_string())),
                };
                let _ = reply.send(res);
            }
            AppCommand::VerifyOtp { otp, reply } => {
                let res = match self.controller.login_form_mut() {
                    Some(form) if form.mode() == crate::forms::LoginMode::Otp => {
                        form.otp = otp;
                        self.controller.login().await
                    }
                    _ => Err(HrError::Custom("No OTP has been requested".to_string())),
                };
                let _ = reply.send(res);
            }
            AppCommand::BackToLogin { reply } => {
                if let Some(form) = self.controller.login_form_mut() {
                    form.back_to_login();
                }
                let _ = reply.send(Ok(()));
            }
            AppCommand::Register { form, reply } => {
                self.controller.show_signup();
                let res = match self.controller.signup_form_mut() {
                    Some(current) => {
                        *current = *form;
                        self.controller.register().await
                    }
                    None => Err(HrError::Custom("Already signed in".to_string())),
                };
                let _ = reply.send(res);
            }
            AppCommand::Logout { reply } => {
                let _ = reply.send(self.controller.logout());
            }
            AppCommand::SelectView { view, reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => dashboard.select_view(view).await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Refresh { reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => dashboard.browser_mut().refresh().await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Search { term, reply } => {
                let res = self.controller.require_dashboard().map(|dashboard| {
                    let browser = dashboard.browser_mut();
                    browser.set_search(&term);
                    browser.visible_files().into_iter().cloned().collect()
                });
                let _ = reply.send(res);
            }
            AppCommand::Open { name, reply } => {
                let res = match self.find(&name) {
                    Ok(node) => match self.controller.require_dashboard() {
                        Ok(dashboard) => dashboard.browser_mut().open(&node).await,
                        Err(e) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Download { name, reply } => {
                let res = self.find(&name).and_then(|node| {
                    self.controller
                        .require_dashboard()
                        .and_then(|dashboard| dashboard.browser().download(&node))
                });
                let _ = reply.send(res);
            }
            AppCommand::GoHome { reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => dashboard.browser_mut().go_home().await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::NavigateTo { index, reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => dashboard.browser_mut().navigate_to(index).await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::CreateFolder { name, reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => dashboard.browser_mut().create_folder(Some(&name)).await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Delete { name, reply } => {
                let res = match self.find(&name) {
                    Ok(node) => match self.controller.require_dashboard() {
                        Ok(dashboard) => dashboard.browser_mut().delete(&node, |_| true).await,
                        Err(e) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Rename {
                name,
                new_name,
                reply,
            } => {
                let res = match self.find(&name) {
                    Ok(node) => match self.controller.require_dashboard() {
                        Ok(dashboard) => dashboard.browser_mut().rename(&node, &new_name).await,
                        Err(e) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Upload { local, reply } => {
                let res = match self.controller.require_dashboard() {
                    Ok(dashboard) => {
                        let selected = dashboard.open_upload().select_path(&local).map(|_| ());
                        match selected {
                            Ok(()) => dashboard.submit_upload().await,
                            Err(e) => {
                                dashboard.close_upload();
                                Err(e)
                            }
                        }
                    }
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::Share {
                name,
                email,
                duration,
                reply,
            } => {
                let res = match self.find(&name) {
                    Ok(node) => match self.controller.require_dashboard() {
                        Ok(dashboard) => {
                            let opened = dashboard.open_share(&node).map(|dialog| {
                                dialog.email = email;
                                dialog.duration = duration;
                            });
                            match opened {
                                Ok(()) => dashboard.submit_share().await,
                                Err(e) => Err(e),
                            }
                        }
                        Err(e) => Err(e),
                    },
                    Err(e) => Err(e),
                };
                let _ = reply.send(self.controller.observe(res));
            }
            AppCommand::DismissError { reply } => {
                if let Some(dashboard) = self.controller.dashboard_mut() {
                    dashboard.browser_mut().dismiss_error();
                }
                let _ = reply.send(Ok(()));
            }
            AppCommand::Shutdown { reply } => {
                let _ = reply.send(());
                return true;
            }
        }
        false
    }
}
