//! Screen state management for Vazi
//!
//! This crate provides the state primitives every screen composes instead of
//! hand-rolling its own loading/error handling: the async operation state
//! machine, the list pagination controller, and selection-set state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod async_op;
pub mod error;
pub mod pagination;
pub mod selection;

pub use async_op::{AsyncConfig, AsyncController, AsyncState, AsyncStatus, FetchMode, RunOutcome};
pub use error::{ErrorInfo, ErrorKind};
pub use pagination::{ListFilters, Page, PageFetcher, Paginator, DEFAULT_PAGE_SIZE};
pub use selection::{ItemRef, SelectionOutcome, SelectionSession, SelectionSet};
