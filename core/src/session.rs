//! Session context: the single bearer token and who gets told when it moves.
//!
//! # Design
//! The token is the only piece of state this layer owns. Instead of an
//! ambient global, a [`Session`] is constructed once and injected into the
//! client; it is a cheap `Arc` handle, so concurrent in-flight requests
//! read the same value. The only writers are `set_token` (login flow,
//! tests) and `clear` (logout, 401) — a last-writer-wins race between
//! concurrent clears is benign because the result is the same empty state.
//!
//! Durable storage sits behind [`TokenStore`]. Persistence failures are
//! logged and swallowed: a token that fails to write degrades to
//! "unauthenticated" on the next start, which is exactly what the caller
//! must already handle.
//!
//! Subscribers registered with [`Session::subscribe`] are invoked with the
//! new token on every mutation (`None` after logout). The `None` event is
//! the library's substitute for the original UI's redirect-to-login.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

/// Durable storage for the session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-process store with no persistence. Used by tests and by embedders
/// that manage durability themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}

/// Stores the token as a single file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform user-data directory
    /// (`<data_local_dir>/bookstore/token`). `None` when the platform has
    /// no such directory.
    pub fn in_user_data() -> Option<Self> {
        let dir = dirs::data_local_dir()?.join("bookstore");
        Some(Self::new(dir.join("token")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("failed to read token file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("failed to create token directory {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            log::warn!("failed to write token file {}: {e}", self.path.display());
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("failed to remove token file {}: {e}", self.path.display());
            }
        }
    }
}

type Watcher = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// Shared session context injected into [`crate::BookstoreClient`].
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<String>>,
    watchers: Mutex<Vec<Watcher>>,
}

impl Session {
    /// Create a session over `store`, picking up any previously persisted
    /// token.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let token = store.load();
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: RwLock::new(token),
                watchers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Session with no durable storage.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().unwrap().clone()
    }

    /// True when a non-empty token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap()
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Store a new token (the login flow's entry point) and notify
    /// subscribers.
    pub fn set_token(&self, token: &str) {
        self.inner.store.save(token);
        *self.inner.token.write().unwrap() = Some(token.to_string());
        self.notify(Some(token));
    }

    /// Drop the token from memory and durable storage, then notify
    /// subscribers with `None`. Idempotent.
    pub fn clear(&self) {
        self.inner.store.clear();
        *self.inner.token.write().unwrap() = None;
        self.notify(None);
    }

    /// Register a watcher invoked with the new token after every mutation.
    pub fn subscribe(&self, watcher: impl Fn(Option<&str>) + Send + Sync + 'static) {
        self.inner.watchers.lock().unwrap().push(Box::new(watcher));
    }

    fn notify(&self, token: Option<&str>) {
        for watcher in self.inner.watchers.lock().unwrap().iter() {
            watcher(token);
        }
    }
}
