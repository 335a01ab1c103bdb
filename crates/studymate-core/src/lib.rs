//! Domain model and collaborator contracts for the StudyMate client.
//!
//! This crate has no I/O. Storage lives in `studymate-infrastructure`, the
//! HTTP collaborator in `studymate-interaction`, and the stores that tie them
//! together in `studymate-application`.

pub mod action;
pub mod artifact;
pub mod backend;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::{Result, StudyMateError};
