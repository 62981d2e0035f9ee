//! Session persistence and authentication.

mod auth;
mod session;
pub mod store;

pub use auth::{AuthAction, AuthGateway, AuthOutcome, AuthRequest};
pub use session::{Session, User, UserId};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStore, StoredSession};
