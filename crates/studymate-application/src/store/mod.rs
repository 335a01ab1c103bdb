//! Client-side stores.
//!
//! # Module Structure
//!
//! - `session_store`: Signed-in identity and its persisted copy
//! - `navigation_controller`: Screen history and drawer
//! - `action_runner`: Per-kind async action slots
//! - `artifact_store`: Study artifact, quiz and history state
//! - `notification_center`: Single-slot user notifications
//! - `preferences`: Theme preference

mod action_runner;
mod artifact_store;
mod navigation_controller;
mod notification_center;
mod preferences;
mod session_store;

pub use action_runner::{ActionTicket, AsyncActionRunner};
pub use artifact_store::StudyArtifactStore;
pub use navigation_controller::{NavigationController, NavigationOutcome, UPLOAD_REQUIRED_MESSAGE};
pub use notification_center::NotificationCenter;
pub use preferences::Preferences;
pub use session_store::SessionStore;
