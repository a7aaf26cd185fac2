//! Process-wide session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The credential gateway reports restored
//! and changed sessions here; views mirror the store into a signal.
//!
//! DESIGN
//! ======
//! `SessionStore` is a shared handle rather than a global. Listeners are
//! invoked after the mutation is committed and the lock released, so a
//! listener can read the store without deadlocking and never observes a
//! half-applied session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::net::gateway::Identity;

/// Authentication state tracking the current identity and whether the
/// provider has finished restoring the initial session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub resolved: bool,
}

/// Three-valued reading of a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Initial check still running; a missing identity means nothing yet.
    Unknown,
    SignedOut,
    SignedIn,
}

impl Session {
    pub fn status(&self) -> SessionStatus {
        match (self.resolved, self.identity.is_some()) {
            (_, true) => SessionStatus::SignedIn,
            (false, false) => SessionStatus::Unknown,
            (true, false) => SessionStatus::SignedOut,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Listener,
}

#[derive(Default)]
struct Inner {
    session: Session,
    listeners: Vec<ListenerEntry>,
}

/// Shared single-owner session store with subscribe/notify semantics.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("session", &inner.session)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Never blocks on listeners.
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    /// Register `listener` for every later change to the session.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        self.lock().listeners.push(ListenerEntry {
            id,
            active: Arc::clone(&active),
            callback: Arc::new(listener),
        });
        Subscription { id, active, store: Arc::downgrade(&self.inner) }
    }

    /// Apply a provider session report. Marks the session resolved and
    /// replaces the identity; listeners run only if something changed.
    pub fn apply_external_update(&self, identity: Option<Identity>) {
        self.mutate(|session| {
            let changed = !session.resolved || session.identity != identity;
            session.resolved = true;
            session.identity = identity;
            changed
        });
    }

    /// Explicit sign-out. The session stays resolved.
    pub fn clear(&self) {
        self.mutate(|session| {
            let changed = !session.resolved || session.identity.is_some();
            session.resolved = true;
            session.identity = None;
            changed
        });
    }

    fn mutate<F>(&self, apply: F)
    where
        F: FnOnce(&mut Session) -> bool,
    {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if !apply(&mut inner.session) {
                return;
            }
            let listeners: Vec<(Arc<AtomicBool>, Listener)> = inner
                .listeners
                .iter()
                .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.callback)))
                .collect();
            (inner.session.clone(), listeners)
        };

        for (active, callback) in listeners {
            if active.load(Ordering::Acquire) {
                callback(&snapshot);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by `SessionStore::subscribe`.
///
/// Dropping the handle keeps the listener registered; call `unsubscribe`
/// to stop notifications.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    store: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Stop notifications for this listener. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(inner) = self.store.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|entry| entry.id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
