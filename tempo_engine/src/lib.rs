//! Timebox state machine for the Tempo bot.
//!
//! All state lives in a single [`Snapshot`]: global completion aggregates
//! plus an audience-key → person → ordered-sequence map of [`Timebox`]
//! records. The [`Engine`] wraps a snapshot together with the configured
//! [`Policy`] and enforces the session invariants: within one
//! (audience key, person) sequence at most the last record may be running,
//! sequences are append-only except for removal of the last element, and
//! the periodic sweeps bound both the age and the count of retained
//! records.
//!
//! The engine is deliberately synchronous and free of I/O; the connection
//! supervisor owns it and calls in between polls. [`StateStore`] handles
//! the opaque load/persist of the snapshot document.

mod timebox;
pub use timebox::*;

mod policy;
pub use policy::*;

mod engine;
pub use engine::*;

mod store;
pub use store::*;

mod duration_format;
pub use duration_format::format_duration;

/// Current time as seconds since the epoch.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
