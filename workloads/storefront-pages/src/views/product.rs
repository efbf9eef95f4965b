//! Product detail controller.

use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::{CartService, ProductService};
use storefront_observability::StructuredLogger;

use crate::config::{CatalogConfig, StorefrontConfig};
use crate::notify::Notifications;
use crate::sections::render_product_detail;
use crate::views::{LoadState, ViewError};

const NOT_FOUND: &str = "Product not found";
const ADD_FAILED: &str = "Failed to add item to cart";

/// Selected image among a product's images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageGallery {
    images: Vec<String>,
    selected: usize,
}

impl ImageGallery {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, selected: 0 }
    }

    /// Select an image; out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.images.get(self.selected).map(String::as_str)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Thumbnails only make sense with more than one image.
    pub fn has_thumbnails(&self) -> bool {
        self.images.len() > 1
    }
}

/// Quantity picker bounded by `1..=stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u32,
    max: u32,
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self::new(0)
    }
}

impl QuantitySelector {
    /// Start at 1 with `max` units available.
    pub fn new(max: u32) -> Self {
        Self { value: 1, max }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > 1
    }

    pub fn increment(&mut self) -> u32 {
        if self.can_increment() {
            self.value += 1;
        }
        self.value
    }

    pub fn decrement(&mut self) -> u32 {
        if self.can_decrement() {
            self.value -= 1;
        }
        self.value
    }
}

/// Whether an add-to-cart request is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartAction {
    #[default]
    Idle,
    Adding,
}

/// Holds `CartAction::Adding` for one cart request. Resets to `Idle` when
/// dropped, including when the request future is cancelled.
struct AddInFlight<'a>(&'a mut CartAction);

impl<'a> AddInFlight<'a> {
    fn begin(action: &'a mut CartAction) -> Self {
        *action = CartAction::Adding;
        Self(action)
    }
}

impl Drop for AddInFlight<'_> {
    fn drop(&mut self) {
        *self.0 = CartAction::Idle;
    }
}

/// Where the shell should navigate after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Back to the listing.
    Back,
    Cart,
    Product(ProductId),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Back => "/".to_string(),
            Navigation::Cart => "/cart".to_string(),
            Navigation::Product(id) => format!("/product/{}", id),
        }
    }
}

/// Product detail page: gallery, quantity selector and cart actions.
pub struct ProductDetail<P, C>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
{
    product_id: ProductId,
    products: Arc<P>,
    cart: Arc<C>,
    state: LoadState<Product>,
    gallery: ImageGallery,
    quantity: QuantitySelector,
    action: CartAction,
    notifications: Notifications,
    catalog: CatalogConfig,
    free_shipping_label: String,
    logger: StructuredLogger,
}

/// Borrowed snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct ProductDetailView<'a> {
    pub state: &'a LoadState<Product>,
    pub gallery: &'a ImageGallery,
    pub quantity: &'a QuantitySelector,
    pub action: CartAction,
    pub low_stock_threshold: u32,
    pub free_shipping_label: &'a str,
}

impl<P, C> ProductDetail<P, C>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
{
    pub fn new(
        product_id: ProductId,
        products: Arc<P>,
        cart: Arc<C>,
        logger: StructuredLogger,
    ) -> Self {
        let config = StorefrontConfig::default();
        Self {
            product_id,
            products,
            cart,
            state: LoadState::Loading,
            gallery: ImageGallery::default(),
            quantity: QuantitySelector::default(),
            action: CartAction::Idle,
            notifications: Notifications::new(),
            free_shipping_label: config.free_shipping_label(),
            catalog: config.catalog,
            logger: logger.for_component("product-detail"),
        }
    }

    /// Use catalog display settings from config.
    pub fn with_config(mut self, config: &StorefrontConfig) -> Self {
        self.catalog = config.catalog.clone();
        self.free_shipping_label = config.free_shipping_label();
        self
    }

    /// Fetch the product. Also the retry action after a failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.products.get_by_id(&self.product_id).await {
            Ok(product) => {
                self.logger
                    .info_builder("Product loaded")
                    .field("product_id", self.product_id.as_str())
                    .field("stock", product.stock)
                    .emit();
                self.gallery = ImageGallery::new(product.images.clone());
                self.quantity = QuantitySelector::new(product.stock);
                self.state = LoadState::Loaded(product);
            }
            Err(e) => {
                self.logger
                    .warn_builder("Product load failed")
                    .field("product_id", self.product_id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.gallery = ImageGallery::default();
                self.quantity = QuantitySelector::default();
                self.state = LoadState::Failed(NOT_FOUND.to_string());
            }
        }
    }

    /// Add the selected quantity to the cart.
    pub async fn add_to_cart(&mut self) -> Result<Cart, ViewError> {
        if self.action == CartAction::Adding {
            return Err(ViewError::Busy);
        }
        let product = self.state.loaded().cloned().ok_or(ViewError::NotLoaded)?;
        if !product.is_purchasable() {
            return Err(ViewError::OutOfStock);
        }

        let quantity = self.quantity.value();
        let result = {
            let _adding = AddInFlight::begin(&mut self.action);
            self.cart.add_item(&product, quantity).await
        };

        match result {
            Ok(cart) => {
                self.logger
                    .info_builder("Added to cart")
                    .field("product_id", product.id.as_str())
                    .field("quantity", quantity)
                    .field("cart_items", cart.item_count())
                    .emit();
                self.notifications
                    .success(format!("{} added to cart!", product.name));
                Ok(cart)
            }
            Err(e) => {
                self.logger
                    .error_builder("Add to cart failed")
                    .field("product_id", product.id.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.notifications.error(ADD_FAILED);
                Err(ViewError::Cart(e.message_or(ADD_FAILED)))
            }
        }
    }

    /// Add to cart, then head to the cart.
    pub async fn buy_now(&mut self) -> Result<Navigation, ViewError> {
        self.add_to_cart().await.map(|_| Navigation::Cart)
    }

    pub fn select_image(&mut self, index: usize) -> bool {
        self.gallery.select(index)
    }

    pub fn increment_quantity(&mut self) -> u32 {
        self.quantity.increment()
    }

    pub fn decrement_quantity(&mut self) -> u32 {
        self.quantity.decrement()
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn state(&self) -> &LoadState<Product> {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        self.state.loaded()
    }

    /// Stock status under the configured low-stock threshold.
    pub fn stock_status(&self) -> Option<StockStatus> {
        self.product()
            .map(|p| p.stock_status(self.catalog.low_stock_threshold))
    }

    pub fn gallery(&self) -> &ImageGallery {
        &self.gallery
    }

    pub fn quantity(&self) -> &QuantitySelector {
        &self.quantity
    }

    pub fn action(&self) -> CartAction {
        self.action
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn view(&self) -> ProductDetailView<'_> {
        ProductDetailView {
            state: &self.state,
            gallery: &self.gallery,
            quantity: &self.quantity,
            action: self.action,
            low_stock_threshold: self.catalog.low_stock_threshold,
            free_shipping_label: &self.free_shipping_label,
        }
    }

    /// Render the product detail as HTML.
    pub fn render(&self) -> String {
        render_product_detail(&self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastKind;
    use storefront_data::{InMemoryCartService, InMemoryProductService, ServiceError};
    use storefront_observability::ViewId;

    type Detail = ProductDetail<InMemoryProductService, InMemoryCartService>;

    fn catalog() -> Arc<InMemoryProductService> {
        Arc::new(InMemoryProductService::new(vec![
            Product::new("p1", "Desk Lamp", Money::new(4999, Currency::USD))
                .with_image("/img/lamp-1.jpg")
                .with_image("/img/lamp-2.jpg")
                .with_stock(3),
            Product::new("p2", "Sold Out Chair", Money::new(12900, Currency::USD)).with_stock(0),
        ]))
    }

    fn detail(id: &str, cart: &Arc<InMemoryCartService>) -> Detail {
        ProductDetail::new(
            ProductId::new(id),
            catalog(),
            Arc::clone(cart),
            StructuredLogger::new(ViewId::from_string("test")),
        )
    }

    #[test]
    fn test_gallery_ignores_out_of_range() {
        let mut gallery = ImageGallery::new(vec!["a".into(), "b".into()]);
        assert!(gallery.has_thumbnails());
        assert!(gallery.select(1));
        assert!(!gallery.select(2));
        assert_eq!(gallery.selected_image(), Some("b"));

        let single = ImageGallery::new(vec!["a".into()]);
        assert!(!single.has_thumbnails());
    }

    #[test]
    fn test_quantity_bounds() {
        let mut qty = QuantitySelector::new(2);
        assert_eq!(qty.value(), 1);
        assert!(!qty.can_decrement());
        assert_eq!(qty.decrement(), 1);
        assert_eq!(qty.increment(), 2);
        assert!(!qty.can_increment());
        assert_eq!(qty.increment(), 2);

        let none = QuantitySelector::new(0);
        assert!(!none.can_increment());
    }

    #[test]
    fn test_add_in_flight_resets_on_drop() {
        let mut action = CartAction::Idle;
        {
            let _adding = AddInFlight::begin(&mut action);
        }
        assert_eq!(action, CartAction::Idle);
    }

    #[test]
    fn test_navigation_paths() {
        assert_eq!(Navigation::Cart.path(), "/cart");
        assert_eq!(Navigation::Product(ProductId::new("p9")).path(), "/product/p9");
    }

    #[tokio::test]
    async fn test_load_resets_gallery_and_quantity() {
        let cart = Arc::new(InMemoryCartService::new());
        let mut page = detail("p1", &cart);
        page.load().await;

        assert_eq!(page.product().map(|p| p.name.as_str()), Some("Desk Lamp"));
        assert_eq!(page.quantity().max(), 3);
        assert_eq!(page.stock_status(), Some(StockStatus::LowStock(3)));

        page.select_image(1);
        page.load().await;
        assert_eq!(page.gallery().selected(), 0);
    }

    #[tokio::test]
    async fn test_missing_product_fails_with_message() {
        let cart = Arc::new(InMemoryCartService::new());
        let mut page = detail("nope", &cart);
        page.load().await;
        assert_eq!(page.state().error(), Some(NOT_FOUND));

        let err = page.add_to_cart().await.unwrap_err();
        assert_eq!(err, ViewError::NotLoaded);
    }

    #[tokio::test]
    async fn test_add_to_cart_uses_selected_quantity() {
        let cart = Arc::new(InMemoryCartService::new());
        let mut page = detail("p1", &cart);
        page.load().await;
        page.increment_quantity();

        let updated = page.add_to_cart().await.unwrap();

        assert_eq!(updated.item_count(), 2);
        assert_eq!(page.action(), CartAction::Idle);
        assert_eq!(
            page.notifications().last().map(|t| t.message.as_str()),
            Some("Desk Lamp added to cart!")
        );
    }

    #[tokio::test]
    async fn test_out_of_stock_never_reaches_cart() {
        let cart = Arc::new(InMemoryCartService::new());
        let mut page = detail("p2", &cart);
        page.load().await;

        assert_eq!(page.add_to_cart().await, Err(ViewError::OutOfStock));
        assert_eq!(cart.calls(), 0);
    }

    #[tokio::test]
    async fn test_buy_now_failure_does_not_navigate() {
        let cart = Arc::new(InMemoryCartService::new());
        let mut page = detail("p1", &cart);
        page.load().await;

        cart.fail_next(ServiceError::Unavailable("timeout".into()));
        assert!(page.buy_now().await.is_err());
        assert_eq!(
            page.notifications().last().map(|t| (t.kind, t.message.as_str())),
            Some((ToastKind::Error, ADD_FAILED))
        );

        assert_eq!(page.buy_now().await, Ok(Navigation::Cart));
    }
}
