//! Keeps a [`SessionMirror`] in step with an [`IdentityProvider`].
//!
//! Two independent sources feed the mirror: a one-shot lookup of the current
//! session dispatched at startup, and a standing change listener.  The lookup
//! can land after an event that already carries newer state; [`LookupPolicy`]
//! decides whether such a late result is applied or dropped.
//!
//! Provider failures are never surfaced to consumers.  A failed or timed-out
//! lookup is logged and leaves the visitor anonymous.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use pl_domain::config::{AuthConfig, LookupPolicy};
use pl_domain::error::Error;
use pl_domain::identity::{AuthChangeEvent, Identity, Session};
use pl_domain::trace::TraceEvent;

use crate::mirror::SessionMirror;
use crate::provider::{IdentityProvider, ListenerHandle};

/// Tunables for [`SessionSync::start`].  The default matches
/// [`AuthConfig::default`].
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub policy: LookupPolicy,
    /// `None` waits for the provider indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl SyncOptions {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            policy: config.lookup_policy,
            lookup_timeout: (config.lookup_timeout_ms > 0)
                .then(|| Duration::from_millis(config.lookup_timeout_ms)),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

/// A running synchronization between one provider and one mirror.
pub struct SessionSync {
    listener: ListenerHandle,
    lookup: JoinHandle<()>,
    settled: watch::Receiver<bool>,
}

impl SessionSync {
    /// Dispatch the startup lookup and register the change listener.
    ///
    /// Returns immediately; the lookup completes in the background.  Must be
    /// called from within a Tokio runtime.
    pub fn start(
        provider: Arc<dyn IdentityProvider>,
        mirror: SessionMirror,
        options: SyncOptions,
    ) -> Self {
        // Number of change events delivered so far.  The lookup checks it
        // under the mirror's dispatch lock, so the check and the write
        // cannot interleave with an event.
        let events_seen = Arc::new(AtomicU64::new(0));
        let (settled_tx, settled) = watch::channel(false);
        let SyncOptions {
            policy,
            lookup_timeout,
        } = options;

        let lookup = tokio::spawn({
            let provider = Arc::clone(&provider);
            let mirror = mirror.clone();
            let events_seen = Arc::clone(&events_seen);
            async move {
                let identity = lookup_identity(provider.as_ref(), lookup_timeout).await;

                let mut seen = 0;
                let applied = mirror.set_unless(identity, || {
                    seen = events_seen.load(Ordering::SeqCst);
                    policy == LookupPolicy::EventsWin && seen > 0
                });
                if !applied {
                    tracing::debug!(
                        provider = provider.provider_id(),
                        events_seen = seen,
                        "dropping stale session lookup"
                    );
                    TraceEvent::SessionLookupDiscarded {
                        provider: provider.provider_id().to_owned(),
                        events_seen: seen,
                    }
                    .emit();
                }
                let _ = settled_tx.send(true);
            }
        });

        let provider_id = provider.provider_id().to_owned();
        let listener = provider.on_session_change(Arc::new(
            move |change: AuthChangeEvent, session: Option<Session>| {
                events_seen.fetch_add(1, Ordering::SeqCst);

                let identity = session.map(|s| s.user);
                tracing::debug!(
                    provider = %provider_id,
                    %change,
                    authenticated = identity.is_some(),
                    "session changed"
                );
                TraceEvent::SessionChanged {
                    provider: provider_id.clone(),
                    change: change.to_string(),
                    authenticated: identity.is_some(),
                }
                .emit();
                mirror.set(identity);
            },
        ));

        tracing::info!(
            provider = provider.provider_id(),
            ?policy,
            "session sync started"
        );

        Self {
            listener,
            lookup,
            settled,
        }
    }

    /// Wait until the startup lookup has been applied or dropped.
    ///
    /// Also returns if the lookup was aborted by [`shutdown`](Self::shutdown).
    pub async fn settled(&self) {
        let mut rx = self.settled.clone();
        let _ = rx.wait_for(|done| *done).await;
    }

    pub fn is_settled(&self) -> bool {
        *self.settled.borrow()
    }

    /// Remove the change listener and abort a lookup still in flight.
    pub fn shutdown(&self) {
        self.listener.unsubscribe();
        self.lookup.abort();
        tracing::debug!("session sync stopped");
    }
}

impl std::fmt::Debug for SessionSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSync")
            .field("listener", &self.listener)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Run the startup lookup, collapsing every failure to "no identity".
async fn lookup_identity(
    provider: &dyn IdentityProvider,
    timeout: Option<Duration>,
) -> Option<Identity> {
    let started = Instant::now();
    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.get_current_session())
            .await
            .unwrap_or_else(|_| {
                Err(Error::Timeout(format!(
                    "session lookup exceeded {}ms",
                    limit.as_millis()
                )))
            }),
        None => provider.get_current_session().await,
    };

    match outcome {
        Ok(session) => {
            let identity = session.map(|s| s.user);
            TraceEvent::SessionLookupCompleted {
                provider: provider.provider_id().to_owned(),
                authenticated: identity.is_some(),
                duration_ms: started.elapsed().as_millis() as u64,
            }
            .emit();
            identity
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.provider_id(),
                error = %e,
                "session lookup failed, treating visitor as anonymous"
            );
            TraceEvent::SessionLookupFailed {
                provider: provider.provider_id().to_owned(),
                reason: e.to_string(),
            }
            .emit();
            None
        }
    }
}
