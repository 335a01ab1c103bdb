//! Application layer for StudyMate.
//!
//! This crate owns the client-side stores and the [`StudyMateApp`] that
//! coordinates them with a [`studymate_core::backend::StudyBackend`] and
//! durable [`studymate_core::storage::ClientStorage`].

pub mod app;
pub mod restore;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use app::StudyMateApp;
pub use restore::RevalidateWithBackend;
pub use snapshot::AppSnapshot;
pub use store::NavigationOutcome;
