//! View controllers.

mod cart;
mod grid;
mod product;
mod reviews;

pub use cart::CartPage;
pub use grid::{ProductCard, ProductGrid};
pub use product::{
    CartAction, ImageGallery, Navigation, ProductDetail, ProductDetailView, QuantitySelector,
};
pub use reviews::{ReviewSection, ReviewSectionView};

use storefront_commerce::prelude::*;
use thiserror::Error;

/// Remote data as a view sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Request in flight.
    #[default]
    Loading,
    /// Request failed; the message is shown with a retry action.
    Failed(String),
    /// Data arrived.
    Loaded(T),
}

impl<T> LoadState<T> {
    /// Loaded data, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Failure message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Project loaded data, keeping loading and failure as they are.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Failed(message) => LoadState::Failed(message.clone()),
            LoadState::Loaded(data) => LoadState::Loaded(f(data)),
        }
    }
}

/// Errors surfaced by view actions.
///
/// None of these are fatal; each maps to an inline message, an error state
/// or a toast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    /// A load failed.
    #[error("{0}")]
    Fetch(String),

    /// The review form rejected its input; no service was called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The review service refused an otherwise valid review.
    #[error("{0}")]
    Submission(String),

    /// The cart service refused an add or update.
    #[error("{0}")]
    Cart(String),

    /// Action needs the product, which is not loaded.
    #[error("Product is not loaded")]
    NotLoaded,

    /// A cart request from this view is still pending.
    #[error("Another cart update is in progress")]
    Busy,

    /// Action not possible for an out-of-stock product.
    #[error("This item is currently out of stock")]
    OutOfStock,

    /// Action not allowed in the current state.
    #[error(transparent)]
    State(#[from] CommerceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let loading: LoadState<u32> = LoadState::default();
        assert!(loading.is_loading());
        assert_eq!(loading.loaded(), None);

        let failed: LoadState<u32> = LoadState::Failed("Nope".into());
        assert_eq!(failed.error(), Some("Nope"));
        assert_eq!(failed.map(|n| n * 2), LoadState::Failed("Nope".into()));

        let loaded = LoadState::Loaded(21);
        assert_eq!(loaded.map(|n| n * 2).loaded(), Some(&42));
    }

    #[test]
    fn test_view_error_messages() {
        let err = ValidationError {
            field: ReviewField::ReviewText,
            message: "Please write your review".to_string(),
        };
        assert_eq!(ViewError::from(err).to_string(), "Please write your review");
        assert_eq!(
            ViewError::OutOfStock.to_string(),
            "This item is currently out of stock"
        );
    }
}
