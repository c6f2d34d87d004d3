use std::sync::Arc;

use parking_lot::Mutex;

use pl_domain::error::Result;
use pl_domain::identity::{AuthChangeEvent, Session};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Listener registration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Callback invoked by a provider for each session change.
pub type SessionCallback = Arc<dyn Fn(AuthChangeEvent, Option<Session>) + Send + Sync>;

/// Handle for a standing change-listener registration.
///
/// The registration stays live until [`unsubscribe`](Self::unsubscribe) is
/// called; dropping the handle does not tear it down.
pub struct ListenerHandle {
    teardown: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl ListenerHandle {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Mutex::new(Some(Box::new(teardown))),
        }
    }

    /// A handle with nothing to tear down.
    pub fn noop() -> Self {
        Self {
            teardown: Mutex::new(None),
        }
    }

    /// Remove the listener.  Later calls are no-ops.
    pub fn unsubscribe(&self) {
        let teardown = self.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    pub fn is_active(&self) -> bool {
        self.teardown.lock().is_some()
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An external identity provider (hosted auth service, SSO bridge, …).
///
/// Session refresh, token storage and the network protocol stay inside the
/// implementation; Parkline only asks for the current session and listens
/// for changes.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the session as the provider currently knows it.
    async fn get_current_session(&self) -> Result<Option<Session>>;

    /// Register `callback` for sign-in, sign-out, token refresh and other
    /// session changes.  Callbacks must be invoked in delivery order.
    fn on_session_change(&self, callback: SessionCallback) -> ListenerHandle;

    /// A unique identifier for this provider instance.
    fn provider_id(&self) -> &str;
}
