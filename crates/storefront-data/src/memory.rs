//! In-memory service implementations.
//!
//! Used by tests and local demos in place of the remote services. Every
//! service can be primed with `fail_next` to return an error from its next
//! call, and counts calls so tests can assert a service was never reached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use storefront_commerce::prelude::*;

use crate::{CartService, ProductService, ReviewService, ServiceError};

/// Shared plumbing: guarded state, one-shot failure, call counter.
#[derive(Debug, Default)]
struct Store<T> {
    state: Mutex<T>,
    fail_next: Mutex<Option<ServiceError>>,
    calls: AtomicUsize,
}

impl<T> Store<T> {
    fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
            fail_next: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Count the call, then hand out the state unless a failure is primed.
    fn enter(&self) -> Result<MutexGuard<'_, T>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let primed = self
            .fail_next
            .lock()
            .map_err(|_| ServiceError::Unavailable("store lock poisoned".into()))?
            .take();
        if let Some(err) = primed {
            return Err(err);
        }
        self.state
            .lock()
            .map_err(|_| ServiceError::Unavailable("store lock poisoned".into()))
    }

    fn fail_next(&self, err: ServiceError) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(err);
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Product catalog held in memory.
#[derive(Debug, Default)]
pub struct InMemoryProductService {
    store: Store<Vec<Product>>,
}

impl InMemoryProductService {
    /// Create a catalog with the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            store: Store::new(products),
        }
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.store.fail_next(err);
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.store.calls()
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.enter()?.clone())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, ServiceError> {
        self.store
            .enter()?
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound {
                kind: "Product",
                id: id.to_string(),
            })
    }
}

/// A single shopper's cart held in memory.
///
/// Adds are checked against the product's stock.
#[derive(Debug, Default)]
pub struct InMemoryCartService {
    store: Store<Cart>,
}

impl InMemoryCartService {
    /// Create an empty USD cart.
    pub fn new() -> Self {
        Self::with_cart(Cart::default())
    }

    /// Start from an existing cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            store: Store::new(cart),
        }
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.store.fail_next(err);
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.store.calls()
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn get_cart(&self) -> Result<Cart, ServiceError> {
        Ok(self.store.enter()?.clone())
    }

    async fn add_item(&self, product: &Product, quantity: u32) -> Result<Cart, ServiceError> {
        let mut cart = self.store.enter()?;
        let in_cart = cart
            .get_item(&product.id)
            .map(|item| item.quantity)
            .unwrap_or(0);
        let requested = in_cart + i64::from(quantity);
        if requested > i64::from(product.stock) {
            return Err(CommerceError::InsufficientStock {
                product_id: product.id.to_string(),
                requested,
                available: i64::from(product.stock),
            }
            .into());
        }
        cart.add_item(
            product.id.clone(),
            product.name.clone(),
            i64::from(quantity),
            product.price,
        )?;
        Ok(cart.clone())
    }

    async fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ServiceError> {
        let mut cart = self.store.enter()?;
        if !cart.update_quantity(product_id, i64::from(quantity))? {
            return Err(ServiceError::NotFound {
                kind: "Cart item",
                id: product_id.to_string(),
            });
        }
        Ok(cart.clone())
    }

    async fn remove_item(&self, product_id: &ProductId) -> Result<Cart, ServiceError> {
        let mut cart = self.store.enter()?;
        cart.remove_item(product_id);
        Ok(cart.clone())
    }
}

/// Reviews for every product, held in memory.
#[derive(Debug, Default)]
pub struct InMemoryReviewService {
    store: Store<Vec<Review>>,
}

impl InMemoryReviewService {
    /// Create an empty review store.
    pub fn new() -> Self {
        Self::with_reviews(Vec::new())
    }

    /// Seed with reviews.
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            store: Store::new(reviews),
        }
    }

    /// Seed from a JSON array of service payloads.
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let reviews: Vec<Review> = serde_json::from_str(json)?;
        Ok(Self::with_reviews(reviews))
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.store.fail_next(err);
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.store.calls()
    }
}

#[async_trait]
impl ReviewService for InMemoryReviewService {
    async fn get_by_product_id(&self, product_id: &ProductId) -> Result<Vec<Review>, ServiceError> {
        Ok(self
            .store
            .enter()?
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn create(&self, submission: ReviewSubmission) -> Result<Review, ServiceError> {
        let mut reviews = self.store.enter()?;
        let review = Review::new(
            ReviewId::generate(),
            submission.product_id,
            f64::from(submission.rating),
        )
        .with_customer_name(submission.reviewer_name)
        .with_comment(submission.review_text)
        .with_date(Utc::now());
        reviews.push(review.clone());
        Ok(review)
    }
}
