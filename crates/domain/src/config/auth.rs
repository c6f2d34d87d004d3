use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session mirror
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How the session mirror follows the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Resolution of the race between the startup session lookup and
    /// change events that arrive before it completes.
    #[serde(default)]
    pub lookup_policy: LookupPolicy,

    /// Upper bound on the startup session lookup.  A lookup that takes
    /// longer is treated as "no session".  `0` waits indefinitely.
    #[serde(default = "d_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lookup_policy: LookupPolicy::default(),
            lookup_timeout_ms: d_lookup_timeout_ms(),
        }
    }
}

/// What to do with a startup lookup result that lands after a change event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Change events win: a lookup finishing after any event is dropped.
    #[default]
    EventsWin,
    /// Whatever lands last is applied, even a stale lookup.
    LastWriteWins,
}

fn d_lookup_timeout_ms() -> u64 {
    10_000
}
