//! State layer for the Vazi wardrobe and styling app
//!
//! Umbrella crate re-exporting the workspace members. Application
//! shells depend on this crate alone.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_core;
pub use app_state;
pub use app_ui;
pub use storage;
