//! Application state: the root controller, its actor, and URL routing.

pub mod actor;
pub mod controller;
pub mod routes;

pub use actor::{AppHandle, DashboardView, Screen};
pub use controller::{AUTH_NETWORK_ERROR, AppState, AuthScreen, RootController, SESSION_EXPIRED};
pub use routes::{Page, Resolved, Route};
