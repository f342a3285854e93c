//! Wardrobe domain model and flows
//!
//! The full wardrobe item record, its lightweight cross-screen reference
//! form, and CRUD flows over the repository. A missing item id is a
//! `NotFound` error that the detail screen surfaces as a blocking alert and
//! answers with back-navigation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use app_state::{ErrorInfo, ErrorKind, ItemRef, ListFilters, Page, PageFetcher};
use async_trait::async_trait;
use storage::{ItemStore, Record, StorageError};

/// Errors that can occur during wardrobe operations
#[derive(Debug, thiserror::Error)]
pub enum WardrobeError {
    /// Input validation failure; surfaced inline on the form
    #[error("{0}")]
    Validation(String),

    /// Repository failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WardrobeError {
    /// Displayable form with the right handling classification
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            WardrobeError::Validation(msg) => ErrorInfo::validation(msg.clone()),
            WardrobeError::Storage(StorageError::NotFound(_)) => {
                ErrorInfo::new(ErrorKind::NotFound, "Item not found.")
            }
            WardrobeError::Storage(err) => ErrorInfo::fetch(err.to_string()),
        }
    }
}

/// Result type for wardrobe operations
pub type Result<T> = std::result::Result<T, WardrobeError>;

/// Garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Shirts, tees, blouses
    Tops,
    /// Trousers, skirts, jeans
    Bottoms,
    /// One-piece garments
    Dresses,
    /// Jackets, coats
    Outerwear,
    /// Footwear
    Shoes,
    /// Bags, jewelry, scarves
    Accessories,
}

impl Category {
    /// All categories in display order
    pub fn all() -> [Category; 6] {
        [
            Category::Tops,
            Category::Bottoms,
            Category::Dresses,
            Category::Outerwear,
            Category::Shoes,
            Category::Accessories,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::Dresses => "Dresses",
            Category::Outerwear => "Outerwear",
            Category::Shoes => "Shoes",
            Category::Accessories => "Accessories",
        };
        write!(f, "{name}")
    }
}

/// Season a garment suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Spring
    Spring,
    /// Summer
    Summer,
    /// Autumn
    Autumn,
    /// Winter
    Winter,
}

/// Full wardrobe item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Stable id
    pub id: String,
    /// Display name
    pub name: String,
    /// Garment category
    pub category: Category,
    /// Dominant colors
    pub colors: Vec<String>,
    /// Fabric composition
    pub fabrics: Vec<String>,
    /// Seasons this item suits
    pub seasons: Vec<Season>,
    /// Brand, if known
    pub brand: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// How many times the item has been worn
    pub wear_count: u32,
    /// Last time the item was worn
    pub last_worn: Option<DateTime<Utc>>,
    /// Purchase price as entered
    pub price: Option<String>,
    /// Image location
    pub image_url: String,
}

impl WardrobeItem {
    /// The lightweight reference form used for cross-screen transport
    pub fn to_ref(&self) -> ItemRef {
        ItemRef::new(self.id.clone(), self.name.clone())
    }
}

impl Record for WardrobeItem {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Wardrobe flows over the item repository
#[derive(Clone)]
pub struct Wardrobe {
    store: Arc<dyn ItemStore<WardrobeItem>>,
}

impl Wardrobe {
    /// Wardrobe over any store implementation
    pub fn new(store: Arc<dyn ItemStore<WardrobeItem>>) -> Self {
        Self { store }
    }

    /// Fetch a single item; missing ids are `NotFound`
    pub async fn get_item(&self, id: &str) -> Result<WardrobeItem> {
        Ok(self.store.get_item(id).await?)
    }

    /// Add a new item after validating the form
    pub async fn add_item(&self, item: WardrobeItem) -> Result<()> {
        validate_item(&item)?;
        self.store.save_item(item).await?;
        Ok(())
    }

    /// Update an existing item after validating the form
    pub async fn update_item(&self, item: WardrobeItem) -> Result<()> {
        validate_item(&item)?;
        self.store.update_item(item).await?;
        Ok(())
    }

    /// Remove an item, returning the removed record
    pub async fn delete_item(&self, id: &str) -> Result<WardrobeItem> {
        Ok(self.store.delete_item(id).await?)
    }

    /// All items, newest last
    pub async fn list_items(&self) -> Result<Vec<WardrobeItem>> {
        Ok(self.store.list_items().await?)
    }

    /// Record a wear: bumps the count and stamps `last_worn`
    pub async fn mark_worn(&self, id: &str) -> Result<WardrobeItem> {
        let mut item = self.store.get_item(id).await?;
        item.wear_count += 1;
        item.last_worn = Some(Utc::now());
        self.store.update_item(item.clone()).await?;
        Ok(item)
    }
}

fn validate_item(item: &WardrobeItem) -> Result<()> {
    if item.name.trim().is_empty() {
        return Err(WardrobeError::Validation(
            "Please give the item a name.".to_string(),
        ));
    }
    Ok(())
}

/// Page fetcher over the wardrobe store
///
/// Lets the wardrobe list screen use the same pagination controller as the
/// marketplace: name search, category filter, pages in listing order.
pub struct WardrobePageFetcher {
    store: Arc<dyn ItemStore<WardrobeItem>>,
    page_size: usize,
}

impl WardrobePageFetcher {
    /// Fetcher with the app-wide default page size
    pub fn new(store: Arc<dyn ItemStore<WardrobeItem>>) -> Self {
        Self {
            store,
            page_size: app_state::DEFAULT_PAGE_SIZE,
        }
    }
}

#[async_trait]
impl PageFetcher<WardrobeItem> for WardrobePageFetcher {
    async fn fetch_page(
        &self,
        filters: &ListFilters,
        page: u32,
    ) -> std::result::Result<Page<WardrobeItem>, ErrorInfo> {
        let items = self
            .store
            .list_items()
            .await
            .map_err(|e| ErrorInfo::fetch(e.to_string()))?;

        let matched: Vec<WardrobeItem> = items
            .into_iter()
            .filter(|item| {
                filters
                    .search
                    .as_ref()
                    .map(|s| item.name.to_lowercase().contains(&s.to_lowercase()))
                    .unwrap_or(true)
                    && filters
                        .category
                        .as_ref()
                        .map(|c| item.category.to_string() == *c)
                        .unwrap_or(true)
            })
            .collect();

        let total_count = matched.len();
        let start = (page as usize).saturating_sub(1) * self.page_size;
        let page_items = matched.into_iter().skip(start).take(self.page_size).collect();
        Ok(Page {
            items: page_items,
            total_count,
        })
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Seed wardrobe items used by the mock build
pub fn seed_items() -> Vec<WardrobeItem> {
    fn item(id: &str, name: &str, category: Category, colors: &[&str], image: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            name: name.to_string(),
            category,
            colors: colors.iter().map(|c| c.to_string()).collect(),
            fabrics: Vec::new(),
            seasons: Vec::new(),
            brand: None,
            notes: None,
            wear_count: 0,
            last_worn: None,
            price: None,
            image_url: format!("https://via.placeholder.com/300/{image}"),
        }
    }

    vec![
        item("wd1", "Blue Denim Jacket", Category::Outerwear, &["Blue"], "77AADD/FFFFFF?text=Jacket"),
        item("wd2", "Floral Summer Dress", Category::Dresses, &["Pink"], "FFC0CB/333333?text=Dress"),
        item("wd3", "Classic White Tee", Category::Tops, &["White"], "EFEFEF/333333?text=T-Shirt"),
        item("wd4", "Black Skinny Jeans", Category::Bottoms, &["Black"], "333333/FFFFFF?text=Jeans"),
        item("wd5", "Running Sneakers", Category::Shoes, &["Grey"], "A0A0A0/FFFFFF?text=Shoes"),
        item("wd6", "Leather Handbag", Category::Accessories, &["Brown"], "8B4513/FFFFFF?text=Bag"),
    ]
}
