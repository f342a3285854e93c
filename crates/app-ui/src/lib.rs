//! Navigation and presentation-layer state for Vazi
//!
//! This crate owns the route definitions, the serialized navigation stack,
//! the auth-gated root navigator, deep linking, theming, and the selection
//! sub-flow glue. It renders nothing; a UI framework binds to these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod root;
pub mod router;
pub mod selector;
pub mod theme;

pub use navigation::{
    NavCommand, NavigationError, NavigationStack, Navigator, Route, RouteKind, StackEntry,
};
pub use root::{AuthGate, RootScreen};
pub use router::Router;
pub use selector::{ModalSelector, SelectionFlow};
pub use theme::{Theme, ThemeName};
