//! Storefront pages.
//!
//! Each page is a controller that owns its view state, talks to the service
//! collaborators, and renders server-side HTML sections:
//!
//! - `ProductGrid` - product listing cards with quick add
//! - `ProductDetail` - image gallery, quantity selector, add to cart / buy now
//! - `ReviewSection` - rating summary, distribution, review list and the
//!   review-authoring form
//! - `CartPage` - line items and subtotal
//! - `ProductPage` - product detail and reviews loaded side by side
//!
//! Failures never escape a section: a failed load becomes an error state
//! with a retry path, and transient outcomes are queued as toasts.

pub mod config;
pub mod notify;
pub mod page;
pub mod sections;
pub mod views;

pub use config::StorefrontConfig;
pub use notify::{Notifications, Toast, ToastKind};
pub use page::ProductPage;
pub use views::{
    CartAction, CartPage, ImageGallery, LoadState, Navigation, ProductCard, ProductDetail,
    ProductGrid, QuantitySelector, ReviewSection, ViewError,
};
