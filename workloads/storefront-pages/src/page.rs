//! Product page: detail and reviews side by side.

use std::sync::Arc;

use storefront_commerce::prelude::*;
use storefront_data::{CartService, ProductService, ReviewService};
use storefront_observability::{StructuredLogger, ViewId};

use crate::config::StorefrontConfig;
use crate::notify::Toast;
use crate::sections::escape_html;
use crate::views::{ProductDetail, ReviewSection};

const PAGE_STYLES: &str = r#"
.pdp-container { max-width: 1200px; margin: 0 auto; padding: 1rem; }
.product-hero { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.star--full, .star--half { color: #f5a623; }
.star--empty { color: #ccc; }
.rating-bar-track { background: #eee; height: 8px; flex: 1; }
.rating-bar-fill { background: #f5a623; height: 100%; }
.form-error, .error-message { color: #c0392b; }
"#;

/// Product detail page with its review section.
pub struct ProductPage<P, C, R>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
    R: ReviewService + ?Sized,
{
    view_id: ViewId,
    detail: ProductDetail<P, C>,
    reviews: ReviewSection<R>,
    logger: StructuredLogger,
}

impl<P, C, R> ProductPage<P, C, R>
where
    P: ProductService + ?Sized,
    C: CartService + ?Sized,
    R: ReviewService + ?Sized,
{
    pub fn new(
        product_id: ProductId,
        products: Arc<P>,
        cart: Arc<C>,
        reviews: Arc<R>,
        config: &StorefrontConfig,
    ) -> Self {
        let view_id = ViewId::generate();
        let logger = config
            .logger(view_id.clone())
            .with_route(format!("/product/{}", product_id));

        Self {
            detail: ProductDetail::new(product_id.clone(), products, cart, logger.clone())
                .with_config(config),
            reviews: ReviewSection::new(product_id, reviews, logger.clone())
                .with_options(config.reviews.clone()),
            logger: logger.for_component("product-page"),
            view_id,
        }
    }

    /// Load the product and its reviews concurrently.
    pub async fn load(&mut self) {
        self.logger.info("Product page load started");
        futures::join!(self.detail.load(), self.reviews.load());
        self.logger
            .info_builder("Product page loaded")
            .field("product_ok", self.detail.product().is_some())
            .field("reviews_ok", self.reviews.state().loaded().is_some())
            .field("elapsed_us", self.logger.elapsed_us())
            .emit();
    }

    pub fn view_id(&self) -> &ViewId {
        &self.view_id
    }

    pub fn detail(&self) -> &ProductDetail<P, C> {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> &mut ProductDetail<P, C> {
        &mut self.detail
    }

    pub fn reviews(&self) -> &ReviewSection<R> {
        &self.reviews
    }

    pub fn reviews_mut(&mut self) -> &mut ReviewSection<R> {
        &mut self.reviews
    }

    /// Take pending toasts from both sections.
    pub fn drain_notifications(&mut self) -> Vec<Toast> {
        let mut toasts = self.detail.notifications_mut().drain();
        toasts.extend(self.reviews.notifications_mut().drain());
        toasts
    }

    /// Render the whole page.
    pub fn render(&self) -> String {
        let title = self
            .detail
            .product()
            .map(|p| p.name.as_str())
            .unwrap_or("Product");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Storefront</title>
    <style>{styles}</style>
</head>
<body>
    <header class="site-header">
        <nav><a href="/">Products</a> / <a href="/cart">Cart</a></nav>
    </header>
    <main class="pdp-container" data-view-id="{view_id}">
        {hero}
        {reviews}
    </main>
</body>
</html>"#,
            title = escape_html(title),
            styles = PAGE_STYLES,
            view_id = self.view_id,
            hero = self.detail.render(),
            reviews = self.reviews.render()
        )
    }
}
