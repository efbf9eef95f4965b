//! Storefront domain types and logic.
//!
//! This crate holds everything the storefront views compute locally:
//!
//! - **Catalog**: Products, stock status, price display
//! - **Cart**: Line items, quantity limits, subtotals
//! - **Reviews**: Review records, rating summaries, star rendering states,
//!   submission validation and the review-authoring form state machine
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let reviews = vec![
//!     Review::new("r1", "p1", 5.0),
//!     Review::new("r2", "p1", 3.0),
//! ];
//!
//! let summary = summarize(&reviews);
//! assert_eq!(summary.total_count, 2);
//! assert_eq!(summary.average_label(), "4.0");
//! assert_eq!(summary.count_for(5), 1);
//!
//! let stars = classify_stars(3.5);
//! assert_eq!(stars[3], StarState::Half);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod reviews;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};

    // Cart
    pub use crate::cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};

    // Reviews
    pub use crate::reviews::{
        classify_stars, classify_stars_with, summarize, FormEvent, FormPhase, PendingSubmit,
        RawReview, Review, ReviewDraft, ReviewField, ReviewForm, ReviewSubmission, ReviewSummary,
        StarState, ValidationError, DEFAULT_STAR_COUNT,
    };
}
