//! Storage is organized through [record_storage::CheckinStorage].
//! The basic idea is:
//!   - Every user has one streak record and two append-only logs: goals and completed goals.
//!   - Records are keyed by the user's display name.
//!   - Logs are sequences of dated blocks, see [block].

pub mod block;
pub mod entities;
pub mod record_storage;
