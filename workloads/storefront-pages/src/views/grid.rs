//! Product listing grid.

use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::{CartService, ProductService};
use storefront_observability::StructuredLogger;

use crate::notify::Notifications;
use crate::sections::render_product_grid;
use crate::views::{LoadState, ViewError};

const LOAD_FAILED: &str = "Failed to load products";
const ADD_FAILED: &str = "Failed to add item to cart";

/// What one listing card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub href: String,
    pub image: Option<String>,
    pub price: String,
    pub rating: f64,
    pub review_count: String,
    pub stock: StockStatus,
    pub show_quick_add: bool,
}

impl ProductCard {
    pub fn from_product(product: &Product, low_stock_threshold: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            href: product.path(),
            image: product.primary_image().map(str::to_string),
            price: product.price.display(),
            rating: product.rating,
            review_count: format!("{} reviews", product.review_count),
            stock: product.stock_status(low_stock_threshold),
            show_quick_add: product.is_purchasable(),
        }
    }
}

/// Listing of every product with a quick-add button per card.
pub struct ProductGrid<P, C>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
{
    products: Arc<P>,
    cart: Arc<C>,
    state: LoadState<Vec<Product>>,
    notifications: Notifications,
    low_stock_threshold: u32,
    logger: StructuredLogger,
}

impl<P, C> ProductGrid<P, C>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
{
    pub fn new(products: Arc<P>, cart: Arc<C>, logger: StructuredLogger) -> Self {
        Self {
            products,
            cart,
            state: LoadState::Loading,
            notifications: Notifications::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            logger: logger.for_component("product-grid"),
        }
    }

    pub fn with_low_stock_threshold(mut self, threshold: u32) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Fetch the catalog.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.products.get_all().await {
            Ok(products) => {
                self.logger
                    .info_builder("Products loaded")
                    .field("count", products.len())
                    .emit();
                self.state = LoadState::Loaded(products);
            }
            Err(e) => {
                self.logger
                    .warn_builder("Product list failed")
                    .field("error", e.to_string())
                    .emit();
                self.state = LoadState::Failed(e.message_or(LOAD_FAILED));
            }
        }
    }

    /// Add one unit of a listed product to the cart.
    pub async fn quick_add(&mut self, product_id: &ProductId) -> Result<Cart, ViewError> {
        let product = self
            .state
            .loaded()
            .and_then(|products| products.iter().find(|p| &p.id == product_id))
            .cloned()
            .ok_or(ViewError::NotLoaded)?;
        if !product.is_purchasable() {
            return Err(ViewError::OutOfStock);
        }

        match self.cart.add_item(&product, 1).await {
            Ok(cart) => {
                self.notifications
                    .success(format!("{} added to cart!", product.name));
                Ok(cart)
            }
            Err(e) => {
                self.logger
                    .error_builder("Quick add failed")
                    .field("product_id", product.id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.notifications.error(ADD_FAILED);
                Err(ViewError::Cart(e.message_or(ADD_FAILED)))
            }
        }
    }

    pub fn state(&self) -> &LoadState<Vec<Product>> {
        &self.state
    }

    /// Cards for the loaded products, in catalog order.
    pub fn cards(&self) -> Vec<ProductCard> {
        self.state
            .loaded()
            .map(|products| self.cards_for(products))
            .unwrap_or_default()
    }

    fn cards_for(&self, products: &[Product]) -> Vec<ProductCard> {
        products
            .iter()
            .map(|p| ProductCard::from_product(p, self.low_stock_threshold))
            .collect()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn render(&self) -> String {
        render_product_grid(&self.state.map(|products| self.cards_for(products)))
    }
}
