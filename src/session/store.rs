//! Persistent key/value storage for the session.
//!
//! The store mirrors browser local storage: string keys, string values, no
//! expiry. [`SessionStore`] keeps the session under two keys, `token` (the
//! raw bearer token) and `user` (JSON profile).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::session::{Session, User};
use crate::error::{HrError, Result};

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// String key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.entries.lock() {
            for (k, v) in entries {
                map.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    fn map(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| HrError::Custom("Memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.map()?.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file.
///
/// The whole file is rewritten on every change. A missing file is an empty
/// store; an unreadable one is logged and treated as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, reading it if it exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str(&raw) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("ignoring unreadable store {}: {}", path.display(), e);
                        BTreeMap::new()
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        debug!("wrote {} keys to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// What [`SessionStore::load`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSession {
    /// No token or no user record.
    Empty,
    Found(Session),
    /// A user record was present but unreadable; both keys were removed.
    Discarded,
}

/// Session persistence on top of a [`KeyValueStore`].
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Read the persisted session.
    ///
    /// Both keys must be non-empty for a session to be considered. A `user`
    /// value that does not decode clears the store.
    pub fn load(&mut self) -> Result<StoredSession> {
        let token = self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let raw_user = self.store.get(USER_KEY)?.filter(|u| !u.is_empty());

        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            return Ok(StoredSession::Empty);
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Ok(StoredSession::Found(Session::new(token, user))),
            Err(e) => {
                warn!("discarding stored session with unreadable user record: {}", e);
                self.clear()?;
                Ok(StoredSession::Discarded)
            }
        }
    }

    /// Persist `session`: the token verbatim, the user as JSON.
    pub fn save(&mut self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user)?;
        self.store.set(TOKEN_KEY, &session.token)?;
        self.store.set(USER_KEY, &user)?;
        Ok(())
    }

    /// Remove both session keys.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }
}
