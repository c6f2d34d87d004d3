//! In-process identity provider.
//!
//! Holds the session in memory and lets the caller drive sign-in, sign-out
//! and refresh by hand.  Used for local previews of the site and as the
//! provider in tests.  A lookup answers with the session as it was when the
//! lookup started, the way a network round-trip would.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use pl_domain::error::{Error, Result};
use pl_domain::identity::{AuthChangeEvent, Identity, Session};

use crate::provider::{IdentityProvider, ListenerHandle, SessionCallback};

type Listeners = Arc<Mutex<Vec<(u64, SessionCallback)>>>;

pub struct LocalProvider {
    id: String,
    session: Mutex<Option<Session>>,
    lookup_delay: Duration,
    lookup_error: Option<String>,
    listeners: Listeners,
    next_listener: AtomicU64,
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalProvider {
    pub fn new() -> Self {
        Self {
            id: "local".into(),
            session: Mutex::new(None),
            lookup_delay: Duration::ZERO,
            lookup_error: None,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Start out with an existing session.
    pub fn with_session(self, session: Session) -> Self {
        *self.session.lock() = Some(session);
        self
    }

    /// Make every lookup take `delay` before answering.
    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    /// Make every lookup fail with `message`.
    pub fn with_lookup_error(mut self, message: impl Into<String>) -> Self {
        self.lookup_error = Some(message.into());
        self
    }

    pub fn current(&self) -> Option<Session> {
        self.session.lock().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn sign_in(&self, user: Identity) {
        let session = Session::new(user);
        *self.session.lock() = Some(session.clone());
        self.deliver(AuthChangeEvent::SignedIn, Some(session));
    }

    pub fn sign_out(&self) {
        *self.session.lock() = None;
        self.deliver(AuthChangeEvent::SignedOut, None);
    }

    /// Re-announce the current session as refreshed.  Returns `false` (and
    /// delivers nothing) when nobody is signed in.
    pub fn refresh_token(&self) -> bool {
        let Some(session) = self.current() else {
            return false;
        };
        self.deliver(AuthChangeEvent::TokenRefreshed, Some(session));
        true
    }

    /// Replace the signed-in user's record.  Returns `false` when nobody is
    /// signed in.
    pub fn update_user(&self, user: Identity) -> bool {
        let session = {
            let mut current = self.session.lock();
            let Some(session) = current.as_mut() else {
                return false;
            };
            session.user = user;
            session.clone()
        };
        self.deliver(AuthChangeEvent::UserUpdated, Some(session));
        true
    }

    fn deliver(&self, change: AuthChangeEvent, session: Option<Session>) {
        let snapshot: Vec<SessionCallback> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        tracing::debug!(%change, listeners = snapshot.len(), "local provider event");
        for cb in snapshot {
            cb(change, session.clone());
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for LocalProvider {
    async fn get_current_session(&self) -> Result<Option<Session>> {
        let answer = self.current();
        if !self.lookup_delay.is_zero() {
            tokio::time::sleep(self.lookup_delay).await;
        }
        match &self.lookup_error {
            Some(message) => Err(Error::Provider {
                provider: self.id.clone(),
                message: message.clone(),
            }),
            None => Ok(answer),
        }
    }

    fn on_session_change(&self, callback: SessionCallback) -> ListenerHandle {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, callback));

        let listeners = Arc::clone(&self.listeners);
        ListenerHandle::new(move || {
            listeners.lock().retain(|(lid, _)| *lid != id);
        })
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}
