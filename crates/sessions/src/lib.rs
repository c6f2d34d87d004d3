//! Session mirroring for Parkline.
//!
//! An external identity provider owns the real session.  This crate keeps a
//! local, observable copy of "who is signed in" that UI code can read
//! synchronously and subscribe to, and wires it to the provider through one
//! startup lookup plus a standing change listener.

pub mod local;
pub mod mirror;
pub mod provider;
pub mod sync;

pub use local::LocalProvider;
pub use mirror::{SessionMirror, Subscription};
pub use provider::{IdentityProvider, ListenerHandle, SessionCallback};
pub use sync::{SessionSync, SyncOptions};
