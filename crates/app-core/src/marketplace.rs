//! Marketplace browsing
//!
//! The listing model and the mock fetch collaborator behind the marketplace
//! grid: case-insensitive name search, exact category match, fixed-size
//! pages. The browse screen composes this with the shared pagination
//! controller.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use app_state::{ErrorInfo, ListFilters, Page, PageFetcher, DEFAULT_PAGE_SIZE};
use async_trait::async_trait;

/// A marketplace listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable id
    pub id: String,
    /// Display name
    pub name: String,
    /// Asking price as entered by the seller
    pub price: String,
    /// Condition description
    pub condition: String,
    /// Garment size
    pub size: String,
    /// Image location
    pub image_url: String,
    /// Listing category
    pub category: String,
    /// Seller handle
    pub seller: String,
}

/// Categories shown as filter chips on the browse screen
pub fn categories() -> Vec<&'static str> {
    vec![
        "Dresses",
        "Outerwear",
        "Tops",
        "Bottoms",
        "Shoes",
        "Accessories",
        "Swap Only",
    ]
}

/// Mock listing backend
///
/// Reproduces the backend contract over an in-memory listing set: filter by
/// search and category, then slice into pages. `total_count` is the filtered
/// total, so the paginator can detect the last page.
pub struct MockListingFetcher {
    listings: Vec<Listing>,
    page_size: usize,
    delay: Duration,
}

impl MockListingFetcher {
    /// Fetcher over the seeded listings
    pub fn new() -> Self {
        Self::with_listings(seed_listings())
    }

    /// Fetcher over an explicit listing set
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            page_size: DEFAULT_PAGE_SIZE,
            delay: Duration::from_millis(0),
        }
    }

    /// Add a simulated backend delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockListingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher<Listing> for MockListingFetcher {
    async fn fetch_page(
        &self,
        filters: &ListFilters,
        page: u32,
    ) -> Result<Page<Listing>, ErrorInfo> {
        tracing::debug!(?filters, page, "fetching listings");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let matched: Vec<Listing> = self
            .listings
            .iter()
            .filter(|listing| {
                filters
                    .search
                    .as_ref()
                    .map(|s| listing.name.to_lowercase().contains(&s.to_lowercase()))
                    .unwrap_or(true)
                    && filters
                        .category
                        .as_ref()
                        .map(|c| listing.category == *c)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();

        let total_count = matched.len();
        let start = (page as usize).saturating_sub(1) * self.page_size;
        let items = matched.into_iter().skip(start).take(self.page_size).collect();
        Ok(Page { items, total_count })
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Seed marketplace listings
pub fn seed_listings() -> Vec<Listing> {
    fn listing(
        id: &str,
        name: &str,
        price: &str,
        condition: &str,
        size: &str,
        category: &str,
        seller: &str,
    ) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            condition: condition.to_string(),
            size: size.to_string(),
            image_url: format!("https://via.placeholder.com/300?text={}", id),
            category: category.to_string(),
            seller: seller.to_string(),
        }
    }

    vec![
        listing("m1", "Vintage Floral Maxi Dress", "$65", "Gently Used", "M", "Dresses", "UserA"),
        listing("m2", "Leather Biker Jacket", "$120", "Excellent", "S", "Outerwear", "UserB"),
        listing("m3", "Silk Camisole Top", "$30", "New with Tags", "XS", "Tops", "UserC"),
        listing("m4", "Designer Handbag", "$250", "Like New", "N/A", "Accessories", "UserD"),
        listing("m5", "Bohemian Print Skirt", "$40", "Gently Used", "M", "Bottoms", "UserE"),
        listing("m6", "Statement Necklace", "$22", "Good", "N/A", "Accessories", "UserF"),
        listing("m7", "Classic Trench Coat", "$90", "Very Good", "L", "Outerwear", "UserG"),
        listing("m8", "Ankle Strap Heels", "$55", "Like New", "7", "Shoes", "UserH"),
        listing("m9", "Quilted Puffer Jacket", "$75", "Excellent", "M", "Outerwear", "UserI"),
        listing("m10", "Cropped Denim Jacket", "$48", "Gently Used", "S", "Outerwear", "UserJ"),
        listing("m11", "Suede Bomber Jacket", "$110", "Very Good", "M", "Outerwear", "UserK"),
        listing("m12", "Wool Varsity Jacket", "$85", "Good", "L", "Outerwear", "UserL"),
        listing("m13", "Corduroy Chore Jacket", "$60", "Gently Used", "M", "Outerwear", "UserM"),
        listing("m14", "Rain Shell Jacket", "$42", "Like New", "S", "Outerwear", "UserN"),
        listing("m15", "Linen Wrap Top", "$28", "Good", "M", "Tops", "UserO"),
        listing("m16", "Pleated Midi Skirt", "$38", "Excellent", "S", "Bottoms", "UserP"),
        listing("m17", "Oversized Jean Jacket", "$52", "Very Good", "L", "Outerwear", "UserQ"),
    ]
}
