//! Item repository
//!
//! An arena-backed, id-indexed in-memory store. Callers program against the
//! [`ItemStore`] trait; [`MemoryStore`] is the only implementation today and
//! a persistent one can replace it without touching call sites.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// No item with the given id exists
    #[error("Item not found: {0}")]
    NotFound(String),

    /// An item with the given id is already stored
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// A record that can live in an [`ItemStore`].
pub trait Record: Clone + Send + Sync {
    /// Stable identifier for this record
    fn record_id(&self) -> &str;
}

/// Store interface for a single record type
///
/// Mirrors the surface a real persistence layer would expose: point reads,
/// inserts, updates, deletes, and a full listing.
#[async_trait]
pub trait ItemStore<T: Record>: Send + Sync {
    /// Fetch an item by id
    async fn get_item(&self, id: &str) -> Result<T>;

    /// Insert a new item (fails if the id is taken)
    async fn save_item(&self, item: T) -> Result<()>;

    /// Replace an existing item (fails if the id is unknown)
    async fn update_item(&self, item: T) -> Result<()>;

    /// Remove an item, returning the removed record
    async fn delete_item(&self, id: &str) -> Result<T>;

    /// List all items in insertion order
    async fn list_items(&self) -> Result<Vec<T>>;
}

/// Arena of record slots plus an id index
struct Arena<T> {
    slots: Vec<Option<T>>,
    index: HashMap<String, usize>,
}

impl<T: Record> Arena<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, item: T) -> Result<()> {
        let id = item.record_id().to_string();
        if self.index.contains_key(&id) {
            return Err(StorageError::AlreadyExists(id));
        }
        self.index.insert(id, self.slots.len());
        self.slots.push(Some(item));
        Ok(())
    }
}

/// In-memory [`ItemStore`] implementation
///
/// Deleted slots are tombstoned rather than compacted so indices stay stable
/// for the lifetime of the store.
pub struct MemoryStore<T: Record> {
    arena: RwLock<Arena<T>>,
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            arena: RwLock::new(Arena::new()),
        }
    }

    /// Create a store pre-populated with the given items
    ///
    /// Duplicate ids in the seed set are rejected.
    pub async fn seeded(items: Vec<T>) -> Result<Self> {
        let store = Self::new();
        {
            let mut arena = store.arena.write().await;
            for item in items {
                arena.insert(item)?;
            }
        }
        Ok(store)
    }

    /// Number of live items
    pub async fn len(&self) -> usize {
        self.arena.read().await.index.len()
    }

    /// Whether the store holds no items
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> ItemStore<T> for MemoryStore<T> {
    async fn get_item(&self, id: &str) -> Result<T> {
        let arena = self.arena.read().await;
        arena
            .index
            .get(id)
            .and_then(|&slot| arena.slots[slot].clone())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn save_item(&self, item: T) -> Result<()> {
        let mut arena = self.arena.write().await;
        tracing::debug!(id = item.record_id(), "saving item");
        arena.insert(item)
    }

    async fn update_item(&self, item: T) -> Result<()> {
        let mut arena = self.arena.write().await;
        let id = item.record_id().to_string();
        let slot = *arena
            .index
            .get(&id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        tracing::debug!(id = %id, "updating item");
        arena.slots[slot] = Some(item);
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<T> {
        let mut arena = self.arena.write().await;
        let slot = arena
            .index
            .remove(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        tracing::debug!(id = %id, "deleting item");
        arena.slots[slot]
            .take()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn list_items(&self) -> Result<Vec<T>> {
        let arena = self.arena.read().await;
        Ok(arena.slots.iter().filter_map(|s| s.clone()).collect())
    }
}
