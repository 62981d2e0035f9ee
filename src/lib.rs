//! # healthrecords
//!
//! Rust client library for the Secured Health Records storage service.
//!
//! ## Features
//!
//! - **Authentication**: Sign in with email/password or a one-time passcode
//!   sent by email, and account registration.
//!   - Client-side form validation (password rules, confirmation, OTP length).
//!   - The session (token and user profile) is persisted in a local
//!     key/value store and restored on start.
//! - **Files**:
//!   - Browse folders with a breadcrumb path and a local search filter.
//!   - Create folders, rename items, delete files.
//!   - Register uploaded files and open or download them via server URLs.
//! - **Sharing**: Grant a recipient time-limited access to a file.
//!
//! The library has no UI. [`RootController`] is the application state
//! machine a front end drives; [`AppHandle`] runs it on its own task.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use healthrecords::{AppHandle, ClientConfig, RootController, Screen};
//!
//! # async fn example() -> healthrecords::Result<()> {
//! let config = ClientConfig::from_env();
//! let app = AppHandle::start(RootController::from_config(&config)?).await?;
//!
//! // Sign in unless a stored session was restored
//! if !matches!(app.screen().await?, Screen::Dashboard(_)) {
//!     app.login("user@example.com", "Passw0rd!").await?;
//! }
//!
//! if let Screen::Dashboard(view) = app.screen().await? {
//!     for node in view.files {
//!         println!("{} ({})", node.name, node.summary());
//!     }
//! }
//!
//! app.create_folder("Lab Results").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Direct API access
//!
//! ```no_run
//! use healthrecords::{AccessDuration, ApiClient, ClientConfig, ShareRequest};
//!
//! # async fn example() -> healthrecords::Result<()> {
//! let api = ApiClient::new(&ClientConfig::from_env())?.authorized("token");
//! let files = api.list_nodes(None).await?;
//! if let Some(file) = files.iter().find(|n| n.is_file()) {
//!     let request = ShareRequest::new("dr@clinic.org", vec![file.id.clone()], AccessDuration::OneWeek);
//!     api.share_nodes(&request).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod fs;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use api::ApiClient;
pub use app::{AppHandle, AppState, RootController, Screen};
pub use config::ClientConfig;
pub use dashboard::{Dashboard, FileBrowser, View};
pub use error::{HrError, Result};
pub use fs::{AccessDuration, Node, NodeType, ShareRequest, ShareResult, UploadRequest};
pub use session::{AuthGateway, AuthOutcome, AuthRequest, Session, SessionStore, User};
