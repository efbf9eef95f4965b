//! Collaborator contracts consumed by the storefront views.

use async_trait::async_trait;
use storefront_commerce::prelude::*;

use crate::ServiceError;

/// Catalog reads.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// All listed products.
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError>;

    /// One product by id.
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, ServiceError>;
}

/// The shopper's cart.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Current cart contents.
    async fn get_cart(&self) -> Result<Cart, ServiceError>;

    /// Add `quantity` units of a product, returning the updated cart.
    async fn add_item(&self, product: &Product, quantity: u32) -> Result<Cart, ServiceError>;

    /// Set a line's quantity; zero removes it.
    async fn update_quantity(&self, product_id: &ProductId, quantity: u32)
        -> Result<Cart, ServiceError>;

    /// Remove a line.
    async fn remove_item(&self, product_id: &ProductId) -> Result<Cart, ServiceError>;
}

/// Review listing and submission.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Reviews for one product, in display order.
    async fn get_by_product_id(&self, product_id: &ProductId) -> Result<Vec<Review>, ServiceError>;

    /// Persist a validated submission, returning the stored review.
    async fn create(&self, submission: ReviewSubmission) -> Result<Review, ServiceError>;
}
