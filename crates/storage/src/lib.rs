//! In-memory storage for Vazi
//!
//! This crate provides the repository layer behind the same interface a real
//! database would implement, so swapping in persistence later requires no
//! caller changes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod repository;

pub use repository::{ItemStore, MemoryStore, Record, StorageError};
