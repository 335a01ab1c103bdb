//! HTTP collaborator for the StudyMate client.

pub mod http_backend;
pub mod wire;

pub use http_backend::HttpStudyBackend;
