//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Products with fewer units than this are flagged as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Display category.
    #[serde(default)]
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Image URLs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units available.
    #[serde(default)]
    pub stock: u32,
    /// Average rating shown on cards, 0-5.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews shown on cards.
    #[serde(default, alias = "reviews")]
    pub review_count: u32,
}

impl Product {
    /// Create a product with a name and price; everything else empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            images: Vec::new(),
            stock: 0,
            rating: 0.0,
            review_count: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the card rating and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// The image shown on cards and as the initial gallery image.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Detail page path for this product.
    pub fn path(&self) -> String {
        format!("/product/{}", self.id)
    }

    /// Stock status against a low-stock threshold.
    pub fn stock_status(&self, low_stock_threshold: u32) -> StockStatus {
        StockStatus::classify(self.stock, low_stock_threshold)
    }

    /// Check if the product can be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        self.stock > 0
    }
}

/// Stock level bucket used for badges and button states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// Plenty of stock.
    InStock,
    /// Fewer units than the threshold remain.
    LowStock(u32),
    /// Nothing left.
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock level.
    pub fn classify(stock: u32, low_stock_threshold: u32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock < low_stock_threshold {
            StockStatus::LowStock(stock)
        } else {
            StockStatus::InStock
        }
    }

    /// Badge text, if the status warrants one.
    pub fn badge(&self) -> Option<String> {
        match self {
            StockStatus::InStock => None,
            StockStatus::LowStock(n) => Some(format!("Only {} left", n)),
            StockStatus::OutOfStock => Some("Out of Stock".to_string()),
        }
    }

    /// Badge CSS modifier.
    pub fn badge_class(&self) -> &'static str {
        match self {
            StockStatus::InStock => "badge-secondary",
            StockStatus::LowStock(_) => "badge-warning",
            StockStatus::OutOfStock => "badge-error",
        }
    }
}
