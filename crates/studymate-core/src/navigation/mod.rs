//! Navigation domain module.
//!
//! - `screen`: The `Screen` enum and its artifact guard
//! - `model`: `NavigationState` (current screen, history, drawer)

mod model;
mod screen;

pub use model::NavigationState;
pub use screen::Screen;
