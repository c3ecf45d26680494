//! # Session Store
//!
//! In-memory conversation histories keyed by session id.
//!
//! Every session lives in its own slot with two locks:
//!
//! - a FIFO *turn* lock, held by one chat request from its first append to
//!   its last, so requests against the same id are applied in arrival order;
//! - a short synchronous lock around the message list itself, so readers
//!   (`GET /conversation`) never wait on a model call in flight.
//!
//! The id → slot map is only locked for lookup, insertion and removal.
//! Sessions are never evicted.

mod error;
mod store;

pub use error::SessionError;
pub use store::{Session, SessionHandle, SessionStore, SessionTurn};

/// Session used when a caller does not name one.
pub const DEFAULT_SESSION_ID: &str = "default";
