//! Shared types for Parkline: errors, structured trace events, configuration,
//! locales and the identity records handed out by identity providers.

pub mod config;
pub mod error;
pub mod identity;
pub mod locale;
pub mod trace;
