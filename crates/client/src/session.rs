//! Session lifecycle: `Uninitialized → Hydrating → {Authenticated,
//! Anonymous}`, then `Authenticated ⇄ Anonymous` via login/logout.
//!
//! The persisted record is one serialized [`User`], written on login,
//! cleared on logout, read once at startup. A corrupted record must
//! never block startup: hydration swallows the failure and starts
//! anonymous.

use std::{fs, path::PathBuf};

use api_types::user::User;

use crate::error::Result;

/// Persistence collaborator for the session record.
pub trait SessionStore {
    fn load(&self) -> Result<Option<User>>;
    fn save(&mut self, user: &User) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// File-backed store: one pretty-printed JSON `User` per file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Option<User>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>> {
        Ok(self.user.clone())
    }

    fn save(&mut self, user: &User) -> Result<()> {
        self.user = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.user = None;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Hydrating,
    Authenticated,
    Anonymous,
}

/// The one process-wide authentication state machine.
///
/// `ready()` is false only before hydration completes; it transitions
/// false→true exactly once and never reverts. Callers gating
/// navigation must not make authorization decisions while
/// `ready() == false`.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    user: Option<User>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            user: None,
        }
    }

    pub fn ready(&self) -> bool {
        matches!(self.phase, Phase::Authenticated | Phase::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// One-shot startup hydration; idempotent once ready.
    ///
    /// Absence of a record or a read/parse failure both end anonymous:
    /// a corrupted local session is treated as "no session".
    pub fn hydrate(&mut self, store: &impl SessionStore) {
        if self.ready() {
            return;
        }
        self.phase = Phase::Hydrating;
        match store.load() {
            Ok(Some(user)) => {
                tracing::debug!("session hydrated for {}", user.username);
                self.user = Some(user);
                self.phase = Phase::Authenticated;
            }
            Ok(None) => {
                tracing::debug!("no persisted session");
                self.user = None;
                self.phase = Phase::Anonymous;
            }
            Err(err) => {
                tracing::warn!("session hydration failed, starting anonymous: {err}");
                self.user = None;
                self.phase = Phase::Anonymous;
            }
        }
    }

    /// Marks the session authenticated and persists the user.
    /// Idempotent when called again with the same user.
    pub fn login(&mut self, store: &mut impl SessionStore, user: User) -> Result<()> {
        store.save(&user)?;
        self.user = Some(user);
        self.phase = Phase::Authenticated;
        Ok(())
    }

    /// Clears to anonymous and removes the persisted record.
    pub fn logout(&mut self, store: &mut impl SessionStore) -> Result<()> {
        store.clear()?;
        self.user = None;
        self.phase = Phase::Anonymous;
        Ok(())
    }
}
