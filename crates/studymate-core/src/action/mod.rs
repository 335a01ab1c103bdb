//! Async action domain module.

mod model;

pub use model::{ActionKind, ActionState, AsyncAction, Generation};
