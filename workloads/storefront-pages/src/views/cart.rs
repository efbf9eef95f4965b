//! Cart page controller.

use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::CartService;
use storefront_observability::StructuredLogger;

use crate::config::StorefrontConfig;
use crate::notify::Notifications;
use crate::sections::render_cart;
use crate::views::{LoadState, ViewError};

const LOAD_FAILED: &str = "Failed to load cart";
const UPDATE_FAILED: &str = "Failed to update cart";

/// The shopper's cart with quantity edits and removal.
pub struct CartPage<C: CartService + ?Sized> {
    cart: Arc<C>,
    state: LoadState<Cart>,
    notifications: Notifications,
    free_shipping_threshold: Money,
    free_shipping_label: String,
    logger: StructuredLogger,
}

impl<C: CartService + ?Sized> CartPage<C> {
    pub fn new(cart: Arc<C>, logger: StructuredLogger) -> Self {
        Self::with_config(cart, logger, &StorefrontConfig::default())
    }

    pub fn with_config(cart: Arc<C>, logger: StructuredLogger, config: &StorefrontConfig) -> Self {
        Self {
            cart,
            state: LoadState::Loading,
            notifications: Notifications::new(),
            free_shipping_threshold: config.free_shipping_threshold(),
            free_shipping_label: config.free_shipping_label(),
            logger: logger.for_component("cart-page"),
        }
    }

    /// Fetch the cart.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.cart.get_cart().await {
            Ok(cart) => {
                self.logger
                    .info_builder("Cart loaded")
                    .field("items", cart.item_count())
                    .emit();
                self.state = LoadState::Loaded(cart);
            }
            Err(e) => {
                self.logger
                    .warn_builder("Cart load failed")
                    .field("error", e.to_string())
                    .emit();
                self.state = LoadState::Failed(e.message_or(LOAD_FAILED));
            }
        }
    }

    /// Change a line's quantity; zero removes the line.
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ViewError> {
        let result = self.cart.update_quantity(product_id, quantity).await;
        self.apply(result, product_id, "update")
    }

    /// Remove a line.
    pub async fn remove(&mut self, product_id: &ProductId) -> Result<(), ViewError> {
        let result = self.cart.remove_item(product_id).await;
        self.apply(result, product_id, "remove")
    }

    fn apply(
        &mut self,
        result: Result<Cart, storefront_data::ServiceError>,
        product_id: &ProductId,
        action: &str,
    ) -> Result<(), ViewError> {
        match result {
            Ok(cart) => {
                self.state = LoadState::Loaded(cart);
                Ok(())
            }
            Err(e) => {
                self.logger
                    .error_builder("Cart change failed")
                    .field("action", action)
                    .field("product_id", product_id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.notifications.error(UPDATE_FAILED);
                Err(ViewError::Cart(e.message_or(UPDATE_FAILED)))
            }
        }
    }

    pub fn state(&self) -> &LoadState<Cart> {
        &self.state
    }

    pub fn item_count(&self) -> i64 {
        self.state.loaded().map(Cart::item_count).unwrap_or(0)
    }

    /// Subtotal of the loaded cart.
    pub fn subtotal(&self) -> Option<Money> {
        self.state.loaded().and_then(|cart| cart.subtotal().ok())
    }

    /// Whether the subtotal reaches the free-shipping threshold.
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.subtotal().is_some_and(|subtotal| {
            subtotal.currency == self.free_shipping_threshold.currency
                && subtotal.amount_cents >= self.free_shipping_threshold.amount_cents
        })
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn render(&self) -> String {
        render_cart(
            &self.state,
            self.qualifies_for_free_shipping(),
            &self.free_shipping_label,
        )
    }
}
