//! The Tempo IRC bot: connection supervision and command handling.
//!
//! [`Supervisor`](supervisor::Supervisor) owns the socket lifecycle and the
//! processing loop; each iteration polls for at most one protocol line,
//! routes any channel or private message through the
//! [`command`] layer, then runs the timebox sweeps and persists the state
//! snapshot. Everything below it, the [`tempo_engine::Engine`] and the
//! [`tempo_irc`] codec, is synchronous and owned by the supervisor, so
//! there is no shared state to lock.

pub mod command;
pub mod config;
pub mod supervisor;
