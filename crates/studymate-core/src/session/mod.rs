//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The in-memory `Session` and its persisted record
//! - `restore`: The `RestorePolicy` capability used at startup

mod model;
mod restore;

// Re-export public API
pub use model::{PersistedSession, Session};
pub use restore::{RestorePolicy, TrustCachedSession};
