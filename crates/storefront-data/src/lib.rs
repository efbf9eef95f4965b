//! Service collaborators for the storefront.
//!
//! The views never talk to a transport directly. They hold one of the
//! service traits below and await it:
//!
//! - `ProductService` - catalog listing and product lookup
//! - `CartService` - the shopper's cart
//! - `ReviewService` - review listing and submission
//!
//! In-memory implementations are provided for tests and local demos. Each
//! can be seeded with data and told to fail its next call.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::{InMemoryReviewService, ReviewService};
//!
//! let service = InMemoryReviewService::new();
//! let reviews = service.get_by_product_id(&product_id).await?;
//! ```

mod error;
mod memory;
mod service;

pub use error::ServiceError;
pub use memory::{InMemoryCartService, InMemoryProductService, InMemoryReviewService};
pub use service::{CartService, ProductService, ReviewService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartService, InMemoryCartService, InMemoryProductService, InMemoryReviewService,
        ProductService, ReviewService, ServiceError,
    };
}
