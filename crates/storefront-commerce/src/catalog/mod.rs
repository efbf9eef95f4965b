//! Product catalog module.
//!
//! Contains the product record shown on listing cards and detail pages.

mod product;

pub use product::{Product, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
