//! Requests abandoned mid-flight leave the views usable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storefront_commerce::prelude::*;
use storefront_data::{CartService, InMemoryProductService, ReviewService, ServiceError};
use storefront_observability::{StructuredLogger, ViewId};
use storefront_pages::{CartAction, ProductDetail, ReviewSection, ViewError};
use tokio::time::timeout;

const SHORT: Duration = Duration::from_millis(20);

/// Review service whose first `create` never answers.
#[derive(Default)]
struct StallingReviews {
    stalled: AtomicBool,
}

#[async_trait]
impl ReviewService for StallingReviews {
    async fn get_by_product_id(&self, _product_id: &ProductId) -> Result<Vec<Review>, ServiceError> {
        Ok(Vec::new())
    }

    async fn create(&self, submission: ReviewSubmission) -> Result<Review, ServiceError> {
        if !self.stalled.swap(true, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(Review::new("r-new", submission.product_id, f64::from(submission.rating)))
    }
}

/// Cart service whose first `add_item` never answers.
#[derive(Default)]
struct StallingCart {
    stalled: AtomicBool,
}

#[async_trait]
impl CartService for StallingCart {
    async fn get_cart(&self) -> Result<Cart, ServiceError> {
        Ok(Cart::default())
    }

    async fn add_item(&self, product: &Product, quantity: u32) -> Result<Cart, ServiceError> {
        if !self.stalled.swap(true, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let mut cart = Cart::default();
        cart.add_item(
            product.id.clone(),
            product.name.clone(),
            i64::from(quantity),
            product.price,
        )?;
        Ok(cart)
    }

    async fn update_quantity(&self, _product_id: &ProductId, _quantity: u32) -> Result<Cart, ServiceError> {
        Ok(Cart::default())
    }

    async fn remove_item(&self, _product_id: &ProductId) -> Result<Cart, ServiceError> {
        Ok(Cart::default())
    }
}

fn logger() -> StructuredLogger {
    StructuredLogger::new(ViewId::from_string("cancel"))
}

#[tokio::test]
async fn test_abandoned_submit_returns_form_to_editing() {
    let mut reviews = ReviewSection::new(
        ProductId::new("p1"),
        Arc::new(StallingReviews::default()),
        logger(),
    );
    reviews.load().await;
    reviews.open_form().unwrap();
    reviews.set_rating(4);
    reviews.set_reviewer_name("Ada");
    reviews.set_review_text("Solid");

    assert!(timeout(SHORT, reviews.submit()).await.is_err());

    assert_eq!(reviews.form().phase(), FormPhase::Editing);
    assert_eq!(reviews.form().draft().reviewer_name, "Ada");
    assert!(reviews.form().can_submit());

    let review = reviews.submit().await.unwrap();
    assert_eq!(review.rating, 4.0);
    assert_eq!(reviews.form().phase(), FormPhase::Hidden);
}

#[tokio::test]
async fn test_abandoned_submit_can_be_cancelled() {
    let mut reviews = ReviewSection::new(
        ProductId::new("p1"),
        Arc::new(StallingReviews::default()),
        logger(),
    );
    reviews.open_form().unwrap();
    reviews.set_rating(2);
    reviews.set_reviewer_name("Bo");
    reviews.set_review_text("Meh");

    assert!(timeout(SHORT, reviews.submit()).await.is_err());
    assert_eq!(reviews.cancel_form().unwrap(), FormPhase::Hidden);
    assert_eq!(reviews.open_form().unwrap(), FormPhase::Editing);
    assert_eq!(reviews.form().draft().review_text, "Meh");
}

#[tokio::test]
async fn test_abandoned_add_to_cart_releases_the_button() {
    let products = Arc::new(InMemoryProductService::new(vec![Product::new(
        "p1",
        "Desk Lamp",
        Money::new(4999, Currency::USD),
    )
    .with_stock(5)]));
    let mut detail = ProductDetail::new(
        ProductId::new("p1"),
        products,
        Arc::new(StallingCart::default()),
        logger(),
    );
    detail.load().await;

    assert!(timeout(SHORT, detail.add_to_cart()).await.is_err());
    assert_eq!(detail.action(), CartAction::Idle);
    assert!(!detail.render().contains("Adding..."));

    let result = detail.add_to_cart().await;
    assert_ne!(result.as_ref().err(), Some(&ViewError::Busy));
    assert_eq!(result.unwrap().item_count(), 1);
}
